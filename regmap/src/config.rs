//! Site configuration: file groups, masters, slaves and device instances.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use regmap_catalog::{
    CatalogError, Device, FileGroup, KindRegistry, Location, Master, SlaveGroup,
    topology::{DEFAULT_SLAVE_OFFSET, MAX_UNIT_ID},
};
use regmap_common::LoggingConfig;
use regmap_openhab::MAX_POLLER_LEN;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Complete site configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// openHAB configuration directory (default: "conf")
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Maximum poller length, in registers (default: 120)
    #[serde(default = "default_max_poller_len")]
    pub max_poller_len: u32,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Flux task generation settings
    #[serde(default)]
    pub tasks: TasksConfig,

    /// File groups, each rendered into one things and one items file
    pub files: Vec<FileConfig>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("conf")
}

fn default_max_poller_len() -> u32 {
    MAX_POLLER_LEN
}

/// Flux task generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasksConfig {
    /// Directory receiving the rendered scripts (default: "generated")
    #[serde(default = "default_tasks_dir")]
    pub output_dir: PathBuf,

    /// Directory of `*.flux` templates replacing the built-in ones
    #[serde(default)]
    pub templates_dir: Option<PathBuf>,
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            output_dir: default_tasks_dir(),
            templates_dir: None,
        }
    }
}

fn default_tasks_dir() -> PathBuf {
    PathBuf::from("generated")
}

/// A named group of masters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    /// File name tag, also the upper-cased prefix of every item below it
    pub name: String,

    /// Write the files with a suffix openHAB ignores
    #[serde(default)]
    pub disabled: bool,

    pub masters: Vec<MasterConfig>,
}

/// A Modbus TCP gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasterConfig {
    /// Gateway IP address or host name
    pub host: String,

    /// Name prefix appended to the file tag
    #[serde(default)]
    pub prefix: String,

    /// Added to slave indices to form the protocol slave id (default: 100)
    #[serde(default = "default_slave_offset")]
    pub slave_offset: u32,

    /// Replaces the computed master prefix
    #[serde(default)]
    pub id: Option<String>,

    /// Leave out of the openHAB files, keep for task generation
    #[serde(default)]
    pub ignore: bool,

    pub slaves: Vec<SlaveConfig>,
}

fn default_slave_offset() -> u32 {
    DEFAULT_SLAVE_OFFSET
}

/// One slave index: either a lone `device` or a named group of `devices`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlaveConfig {
    pub index: u32,

    #[serde(default)]
    pub device: Option<DeviceConfig>,

    #[serde(default)]
    pub devices: Option<Vec<DeviceConfig>>,

    /// Name of a multi-device slave
    #[serde(default)]
    pub name: Option<String>,

    /// Slave prefix override of a multi-device slave; "" drops the segment
    #[serde(default)]
    pub id: Option<String>,

    /// Display name override of a multi-device slave
    #[serde(default)]
    pub display_name: Option<String>,
}

/// A device instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Catalog kind, e.g. "bluelog_inverter"
    pub kind: String,

    pub name: String,

    /// Building and floor characters, e.g. "C3"
    pub location: String,

    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub display_name: Option<String>,

    /// Added to every register address of the device
    #[serde(default)]
    pub offset: u32,
}

impl SiteConfig {
    /// Load and validate a JSON5 site configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let config: Self = regmap_common::load_config(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON5 site configuration without validating it.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(regmap_common::parse_config(content)?)
    }

    /// Validate the structure of the configuration.
    ///
    /// Device kinds and locations are checked against the catalog by
    /// [`SiteConfig::file_groups`].
    pub fn validate(&self) -> Result<()> {
        if self.files.is_empty() {
            return Err(ConfigError::validation(
                "At least one file group must be configured",
            ));
        }

        if self.max_poller_len == 0 {
            return Err(ConfigError::validation("max_poller_len must be at least 1"));
        }

        let mut names = HashSet::new();
        for file in &self.files {
            if file.name.is_empty() {
                return Err(ConfigError::validation("File group name cannot be empty"));
            }

            if !names.insert(file.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "Duplicate file group '{}'",
                    file.name
                )));
            }

            for master in &file.masters {
                master.validate(&file.name)?;
            }
        }

        Ok(())
    }

    /// Validate, then build the site topology, resolving device kinds
    /// through `registry`.
    pub fn file_groups(&self, registry: &KindRegistry) -> Result<Vec<FileGroup>> {
        self.validate()?;

        self.files
            .iter()
            .map(|file| {
                let masters = file
                    .masters
                    .iter()
                    .map(|master| master.build(&file.name, registry))
                    .collect::<Result<Vec<_>>>()?;

                Ok(FileGroup {
                    name: file.name.clone(),
                    disabled: file.disabled,
                    masters,
                })
            })
            .collect()
    }
}

impl MasterConfig {
    fn validate(&self, file: &str) -> Result<()> {
        if self.host.is_empty() {
            return Err(ConfigError::Validation(format!(
                "File '{}': master host cannot be empty",
                file
            )));
        }

        let mut indices = HashSet::new();
        for slave in &self.slaves {
            let context = || format!("File '{}', master {}, slave {}", file, self.host, slave.index);

            if !indices.insert(slave.index) {
                return Err(ConfigError::Validation(format!(
                    "{}: duplicate slave index",
                    context()
                )));
            }

            match slave.index.checked_add(self.slave_offset) {
                Some(unit_id) if unit_id <= MAX_UNIT_ID => {}
                _ => {
                    return Err(ConfigError::Validation(format!(
                        "{}: slave id {} + {} is outside 0..={}",
                        context(),
                        slave.index,
                        self.slave_offset,
                        MAX_UNIT_ID
                    )));
                }
            }

            match (&slave.device, &slave.devices) {
                (Some(_), None) => {
                    if slave.name.is_some() || slave.id.is_some() || slave.display_name.is_some() {
                        return Err(ConfigError::Validation(format!(
                            "{}: name, id and display_name belong on the device of a single-device slave",
                            context()
                        )));
                    }
                }
                (None, Some(devices)) => {
                    if devices.is_empty() {
                        return Err(ConfigError::Validation(format!(
                            "{}: devices cannot be empty",
                            context()
                        )));
                    }
                    if slave.name.as_deref().is_none_or(str::is_empty) {
                        return Err(ConfigError::Validation(format!(
                            "{}: a multi-device slave needs a name",
                            context()
                        )));
                    }
                }
                _ => {
                    return Err(ConfigError::Validation(format!(
                        "{}: must specify exactly one of device or devices",
                        context()
                    )));
                }
            }
        }

        Ok(())
    }

    fn build(&self, file: &str, registry: &KindRegistry) -> Result<Master> {
        let mut master = Master::new(&self.host, &self.prefix).with_slave_offset(self.slave_offset);
        master.id = self.id.clone();
        master.ignore = self.ignore;

        for slave in &self.slaves {
            let group = slave.build(registry).map_err(|source| ConfigError::Device {
                file: file.to_string(),
                host: self.host.clone(),
                index: slave.index,
                source,
            })?;
            master = master.with_slave(slave.index, group);
        }

        Ok(master)
    }
}

impl SlaveConfig {
    fn build(&self, registry: &KindRegistry) -> std::result::Result<SlaveGroup, CatalogError> {
        let mut group = match (&self.device, &self.devices) {
            (Some(device), _) => SlaveGroup::Single(device.build(registry)?),
            (None, Some(devices)) => {
                let devices = devices
                    .iter()
                    .map(|device| device.build(registry))
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                SlaveGroup::multi(self.name.clone().unwrap_or_default(), devices)?
            }
            (None, None) => SlaveGroup::multi(self.name.clone().unwrap_or_default(), Vec::new())?,
        };

        if let Some(id) = &self.id {
            group = group.with_id(id.as_str());
        }
        if let Some(display_name) = &self.display_name {
            group = group.with_display_name(display_name.as_str());
        }

        Ok(group)
    }
}

impl DeviceConfig {
    fn build(&self, registry: &KindRegistry) -> std::result::Result<Device, CatalogError> {
        let mut device = Device::new(
            registry.get(&self.kind)?,
            &self.name,
            Location::new(&self.location)?,
        )
        .with_offset(self.offset);
        device.check_address_range()?;
        device.id = self.id.clone();
        device.display_name = self.display_name.clone();
        Ok(device)
    }
}
