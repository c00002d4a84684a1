//! Resolved site topology.
//!
//! Every prefix and display name is computed once, when the plan is built,
//! and never reassigned. The catalog values themselves stay untouched, so
//! the same plan can be rendered by the openHAB generator and handed to the
//! task generator afterwards.

use regmap_catalog::{Device, FileGroup, Master, SlaveGroup};
use tracing::debug;

use crate::naming;

/// Resolved view of a whole site.
#[derive(Debug)]
pub struct SitePlan<'a> {
    pub files: Vec<FilePlan<'a>>,
}

/// Resolved view of one file group.
#[derive(Debug)]
pub struct FilePlan<'a> {
    pub name: &'a str,
    pub disabled: bool,
    pub masters: Vec<MasterPlan<'a>>,
}

/// Resolved view of one master.
#[derive(Debug)]
pub struct MasterPlan<'a> {
    pub master: &'a Master,
    pub prefix: String,
    pub slaves: Vec<SlavePlan<'a>>,
}

/// Resolved view of one slave group.
#[derive(Debug)]
pub struct SlavePlan<'a> {
    pub index: u32,
    pub slave: &'a SlaveGroup,
    /// Protocol slave id: index plus the master's slave offset.
    pub unit_id: u32,
    pub prefix: String,
    pub display_name: String,
    pub bridge_label: String,
    pub devices: Vec<DevicePlan<'a>>,
}

/// Resolved view of one device.
#[derive(Debug)]
pub struct DevicePlan<'a> {
    pub device: &'a Device,
    pub prefix: String,
    pub display_name: String,
    pub group_id: String,
}

impl<'a> SitePlan<'a> {
    /// Resolve the names of every file group, in declaration order.
    pub fn resolve(files: &'a [FileGroup]) -> Self {
        Self {
            files: files.iter().map(FilePlan::resolve).collect(),
        }
    }

    /// Devices of the whole site, in traversal order.
    pub fn devices(&self) -> impl Iterator<Item = &DevicePlan<'a>> {
        self.files.iter().flat_map(|file| file.devices())
    }
}

impl<'a> FilePlan<'a> {
    fn resolve(file: &'a FileGroup) -> Self {
        let masters = file
            .masters
            .iter()
            .map(|master| MasterPlan::resolve(&file.name, master))
            .collect();

        Self {
            name: &file.name,
            disabled: file.disabled,
            masters,
        }
    }

    pub fn devices(&self) -> impl Iterator<Item = &DevicePlan<'a>> {
        self.masters
            .iter()
            .flat_map(|master| master.slaves.iter())
            .flat_map(|slave| slave.devices.iter())
    }
}

impl<'a> MasterPlan<'a> {
    fn resolve(file: &str, master: &'a Master) -> Self {
        let prefix = naming::master_prefix(file, master);

        let slaves = master
            .slaves
            .iter()
            .map(|(index, slave)| SlavePlan::resolve(&prefix, master, *index, slave))
            .collect();

        Self {
            master,
            prefix,
            slaves,
        }
    }
}

impl<'a> SlavePlan<'a> {
    fn resolve(master_prefix: &str, master: &Master, index: u32, slave: &'a SlaveGroup) -> Self {
        let prefix = naming::slave_prefix(master_prefix, index, slave);
        let display_name = naming::slave_display_name(&prefix, slave);

        let devices = slave
            .devices()
            .iter()
            .map(|device| {
                let device_prefix = naming::device_prefix(&prefix, slave, device);
                DevicePlan {
                    device,
                    group_id: naming::group_id(&device_prefix),
                    display_name: naming::device_display_name(&display_name, slave, device),
                    prefix: device_prefix,
                }
            })
            .collect();

        debug!(slave = %prefix, index, "Resolved slave group");

        Self {
            index,
            slave,
            unit_id: index + master.slave_offset,
            bridge_label: naming::bridge_label(master_prefix, index, slave),
            display_name,
            prefix,
            devices,
        }
    }
}

impl DevicePlan<'_> {
    /// Item id of one of this device's properties.
    pub fn property_id(&self, short_id: &str) -> String {
        naming::property_id(&self.prefix, short_id)
    }

    pub fn group_label(&self) -> String {
        naming::group_label(&self.prefix, self.device)
    }
}
