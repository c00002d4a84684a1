//! Site topology: file groups, Modbus masters, slave groups and devices.

use std::sync::Arc;

use crate::error::{CatalogError, Result};
use crate::kind::DeviceKind;

/// Physical location code: a building character followed by a floor character.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location(String);

impl Location {
    pub fn new(code: impl Into<String>) -> Result<Self> {
        let code = code.into();
        if code.chars().count() != 2 {
            return Err(CatalogError::InvalidLocation(code));
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn building(&self) -> char {
        self.0.chars().next().unwrap_or_default()
    }

    pub fn floor(&self) -> char {
        self.0.chars().nth(1).unwrap_or_default()
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One physical device instance of a [`DeviceKind`].
#[derive(Debug, Clone)]
pub struct Device {
    pub kind: Arc<DeviceKind>,
    pub name: String,
    pub location: Location,
    /// Identifier override. For a lone device it replaces the slave prefix;
    /// inside a multi-device slave it is the disambiguating suffix.
    pub id: Option<String>,
    /// Display name override.
    pub display_name: Option<String>,
    /// Added to every register address of the device.
    pub offset: u32,
}

impl Device {
    pub fn new(kind: Arc<DeviceKind>, name: impl Into<String>, location: Location) -> Self {
        Self {
            kind,
            name: name.into(),
            location,
            id: None,
            display_name: None,
            offset: 0,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// One past the highest register read for this device, counting the
    /// device and group offsets. `None` when the sum does not fit a `u32`.
    pub fn register_end(&self) -> Option<u32> {
        self.kind
            .property_groups()
            .into_iter()
            .filter_map(|group| group.properties().last().map(|last| (group, last)))
            .try_fold(0, |end, (group, last)| {
                let group_end = last.end().checked_add(group.offset)?.checked_add(self.offset)?;
                Some(end.max(group_end))
            })
    }

    /// Check that every register of the device stays within the 16-bit
    /// address space.
    pub fn check_address_range(&self) -> Result<()> {
        match self.register_end() {
            Some(end) if end <= REGISTER_SPACE => Ok(()),
            _ => Err(CatalogError::AddressOutOfRange {
                device: self.name.clone(),
                offset: self.offset,
            }),
        }
    }
}

/// Number of addressable registers per table.
pub const REGISTER_SPACE: u32 = 1 << 16;

/// Devices sharing one protocol slave identity.
#[derive(Debug, Clone)]
pub enum SlaveGroup {
    /// A lone device answering on its own slave id.
    Single(Device),
    /// Several logical devices behind one slave id.
    Multi {
        name: String,
        devices: Vec<Device>,
        /// Slave prefix override. `Some("")` drops the slave segment from
        /// the device prefixes.
        id: Option<String>,
        display_name: Option<String>,
    },
}

impl SlaveGroup {
    pub fn multi(name: impl Into<String>, devices: Vec<Device>) -> Result<Self> {
        let name = name.into();
        if devices.is_empty() {
            return Err(CatalogError::EmptySlaveGroup(name));
        }
        Ok(Self::Multi {
            name,
            devices,
            id: None,
            display_name: None,
        })
    }

    /// Set the slave prefix override. A lone device carries it itself.
    pub fn with_id(self, id: impl Into<String>) -> Self {
        match self {
            SlaveGroup::Single(device) => SlaveGroup::Single(device.with_id(id)),
            SlaveGroup::Multi {
                name,
                devices,
                display_name,
                ..
            } => SlaveGroup::Multi {
                name,
                devices,
                id: Some(id.into()),
                display_name,
            },
        }
    }

    /// Set the display name override. A lone device carries it itself.
    pub fn with_display_name(self, display_name: impl Into<String>) -> Self {
        match self {
            SlaveGroup::Single(device) => SlaveGroup::Single(device.with_display_name(display_name)),
            SlaveGroup::Multi { name, devices, id, .. } => SlaveGroup::Multi {
                name,
                devices,
                id,
                display_name: Some(display_name.into()),
            },
        }
    }

    pub fn name(&self) -> &str {
        match self {
            SlaveGroup::Single(device) => &device.name,
            SlaveGroup::Multi { name, .. } => name,
        }
    }

    pub fn devices(&self) -> &[Device] {
        match self {
            SlaveGroup::Single(device) => std::slice::from_ref(device),
            SlaveGroup::Multi { devices, .. } => devices,
        }
    }

    pub fn id_override(&self) -> Option<&str> {
        match self {
            SlaveGroup::Single(device) => device.id.as_deref(),
            SlaveGroup::Multi { id, .. } => id.as_deref(),
        }
    }

    pub fn display_override(&self) -> Option<&str> {
        match self {
            SlaveGroup::Single(device) => device.display_name.as_deref(),
            SlaveGroup::Multi { display_name, .. } => display_name.as_deref(),
        }
    }

    pub fn is_multi(&self) -> bool {
        matches!(self, SlaveGroup::Multi { .. })
    }
}

impl From<Device> for SlaveGroup {
    fn from(device: Device) -> Self {
        SlaveGroup::Single(device)
    }
}

/// Default offset added to slave indices to form the protocol slave id.
pub const DEFAULT_SLAVE_OFFSET: u32 = 100;

/// Highest addressable protocol slave id.
pub const MAX_UNIT_ID: u32 = 247;

/// A Modbus TCP gateway polling a set of slaves.
#[derive(Debug, Clone)]
pub struct Master {
    pub host: String,
    /// Name prefix for every item below this master.
    pub prefix: String,
    pub slave_offset: u32,
    /// Slave groups keyed by index, in declaration order.
    pub slaves: Vec<(u32, SlaveGroup)>,
    /// Master prefix override.
    pub id: Option<String>,
    /// Skip this master when rendering binding files.
    pub ignore: bool,
}

impl Master {
    pub fn new(host: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            prefix: prefix.into(),
            slave_offset: DEFAULT_SLAVE_OFFSET,
            slaves: Vec::new(),
            id: None,
            ignore: false,
        }
    }

    /// Add a slave group. Reusing an index replaces the earlier group in
    /// place.
    pub fn with_slave(mut self, index: u32, slave: impl Into<SlaveGroup>) -> Self {
        let slave = slave.into();
        match self.slaves.iter_mut().find(|(i, _)| *i == index) {
            Some((_, existing)) => *existing = slave,
            None => self.slaves.push((index, slave)),
        }
        self
    }

    pub fn slave(&self, index: u32) -> Option<&SlaveGroup> {
        self.slaves
            .iter()
            .find_map(|(i, slave)| (*i == index).then_some(slave))
    }

    pub fn with_slave_offset(mut self, offset: u32) -> Self {
        self.slave_offset = offset;
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// A named set of masters rendered into one pair of output files.
#[derive(Debug, Clone)]
pub struct FileGroup {
    pub name: String,
    /// Disabled groups are written under a name the platform skips.
    pub disabled: bool,
    pub masters: Vec<Master>,
}

impl FileGroup {
    pub fn new(name: impl Into<String>, masters: Vec<Master>) -> Self {
        Self {
            name: name.into(),
            disabled: false,
            masters,
        }
    }
}
