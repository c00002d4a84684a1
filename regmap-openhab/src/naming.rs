//! Hierarchical identifiers and display names.
//!
//! Identifiers are derived from coordinates only (file, master, slave index,
//! device, property), so the same coordinates always give the same name no
//! matter what else is generated in the run.
//!
//! ```text
//! master prefix   SOL_Y            "{FILE}_{master.prefix}"
//! slave prefix    SOL_Y3           "{master prefix}{slave index}"
//! device prefix   SOL_Y3[_M1]      suffixed inside multi-device slaves
//! property id     sol_y3_temp      "{device prefix, lowercased}_{id}"
//! group id        gSolY3           camel-folded device prefix
//! ```

use regmap_catalog::{Device, Master, SlaveGroup};

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Prefix shared by every item below a master.
pub fn master_prefix(file: &str, master: &Master) -> String {
    match non_empty(master.id.as_deref()) {
        Some(id) => id.to_string(),
        None => format!("{}_{}", file.to_uppercase(), master.prefix),
    }
}

/// Prefix of a slave, used as the id of its TCP bridge.
pub fn slave_prefix(master_prefix: &str, index: u32, slave: &SlaveGroup) -> String {
    match non_empty(slave.id_override()) {
        Some(id) => id.to_string(),
        None => format!("{}{}", master_prefix, index),
    }
}

/// Label of a slave's TCP bridge.
///
/// Always built from the default prefix, so overrides keep the wire
/// coordinates visible.
pub fn bridge_label(master_prefix: &str, index: u32, slave: &SlaveGroup) -> String {
    format!("{}{}: {}", master_prefix, index, slave.name())
}

/// Display name shared by the devices of a slave.
pub fn slave_display_name(slave_prefix: &str, slave: &SlaveGroup) -> String {
    non_empty(slave.display_override())
        .unwrap_or(slave_prefix)
        .to_string()
}

/// Prefix of a device's pollers, items and groups.
///
/// An explicitly empty slave override drops the slave segment instead of
/// leaving an empty one behind.
pub fn device_prefix(slave_prefix: &str, slave: &SlaveGroup, device: &Device) -> String {
    let base = match slave.id_override() {
        Some("") => "",
        _ => slave_prefix,
    };

    let suffix = if slave.is_multi() {
        non_empty(device.id.as_deref())
    } else {
        None
    };

    match suffix {
        Some(suffix) if base.is_empty() => suffix.to_string(),
        Some(suffix) => format!("{}_{}", base, suffix),
        None => base.to_string(),
    }
}

/// Display name of a device, prefixing its poller and item labels.
pub fn device_display_name(slave_display: &str, slave: &SlaveGroup, device: &Device) -> String {
    let own = if slave.is_multi() {
        non_empty(device.display_name.as_deref())
    } else {
        None
    };
    own.unwrap_or(slave_display).to_string()
}

/// Item id of a property.
pub fn property_id(device_prefix: &str, short_id: &str) -> String {
    format!("{}_{}", device_prefix.to_lowercase(), short_id)
}

/// Group item id of a device: `SOL_Y3` becomes `gSolY3`.
///
/// The prefix is capitalized (first character upper, rest lower), then
/// every underscore followed by a letter is dropped and the letter
/// upper-cased.
pub fn group_id(device_prefix: &str) -> String {
    let mut chars = device_prefix.chars();
    let capitalized: String = match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    };

    let mut folded = String::with_capacity(capitalized.len() + 1);
    folded.push('g');

    let mut chars = capitalized.chars().peekable();
    while let Some(c) = chars.next() {
        match chars.peek() {
            Some(next) if c == '_' && next.is_ascii_lowercase() => {
                folded.push(next.to_ascii_uppercase());
                chars.next();
            }
            _ => folded.push(c),
        }
    }

    folded
}

/// Label of a device's group item.
pub fn group_label(device_prefix: &str, device: &Device) -> String {
    format!("{} ({})", device_prefix, device.name)
}
