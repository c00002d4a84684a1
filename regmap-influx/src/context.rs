//! Template context built from a resolved site.
//!
//! Templates see `files`, a list mirroring the site hierarchy with every
//! identifier already resolved:
//!
//! ```text
//! files[].name, .disabled
//! files[].masters[].prefix, .host, .ignore
//! files[].masters[].devices[].prefix, .name, .display_name, .kind,
//!     .location, .building, .floor, .group_id, .deadman
//! files[].masters[].devices[].alerts[].field, .item, .check_name,
//!     .flux, .message, .min, .max
//! ```

use regmap_catalog::Alert;
use regmap_openhab::{DevicePlan, FilePlan, MasterPlan, SitePlan};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct FileContext {
    pub name: String,
    pub disabled: bool,
    pub masters: Vec<MasterContext>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MasterContext {
    pub prefix: String,
    pub host: String,
    pub ignore: bool,
    pub devices: Vec<DeviceContext>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeviceContext {
    pub prefix: String,
    pub name: String,
    pub display_name: String,
    pub kind: String,
    pub location: String,
    pub building: String,
    pub floor: String,
    pub group_id: String,
    /// Item id of the deadman property.
    pub deadman: Option<String>,
    pub alerts: Vec<AlertContext>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlertContext {
    pub field: String,
    /// Item id of the watched property.
    pub item: String,
    pub check_name: String,
    pub flux: String,
    pub message: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Build the `files` context of a site.
pub fn files(site: &SitePlan<'_>) -> Vec<FileContext> {
    site.files.iter().map(file).collect()
}

fn file(plan: &FilePlan<'_>) -> FileContext {
    FileContext {
        name: plan.name.to_string(),
        disabled: plan.disabled,
        masters: plan.masters.iter().map(master).collect(),
    }
}

fn master(plan: &MasterPlan<'_>) -> MasterContext {
    MasterContext {
        prefix: plan.prefix.clone(),
        host: plan.master.host.clone(),
        ignore: plan.master.ignore,
        devices: plan
            .slaves
            .iter()
            .flat_map(|slave| slave.devices.iter())
            .map(device)
            .collect(),
    }
}

fn device(plan: &DevicePlan<'_>) -> DeviceContext {
    let device = plan.device;
    let kind = &device.kind;

    DeviceContext {
        prefix: plan.prefix.clone(),
        name: device.name.clone(),
        display_name: plan.display_name.clone(),
        kind: kind.name().to_string(),
        location: device.location.to_string(),
        building: device.location.building().to_string(),
        floor: device.location.floor().to_string(),
        group_id: plan.group_id.clone(),
        deadman: kind.deadman().map(|id| plan.property_id(id)),
        alerts: kind.alerts().into_iter().map(|a| alert(plan, a)).collect(),
    }
}

fn alert(plan: &DevicePlan<'_>, alert: &Alert) -> AlertContext {
    let item = plan.property_id(alert.field());

    AlertContext {
        field: alert.field().to_string(),
        check_name: format!("{} range", item),
        item,
        flux: alert.flux(),
        message: alert.message(),
        min: alert.min(),
        max: alert.max(),
    }
}
