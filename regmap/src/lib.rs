//! regmap
//!
//! Generates openHAB Modbus binding files and InfluxDB Flux tasks from a
//! site configuration and the built-in register catalogs.
//!
//! - [`Args`] - Command line arguments
//! - [`SiteConfig`] - JSON5 site configuration, validation and topology building
//! - [`Runner`] - One generation run
//!
//! # Example
//!
//! ```ignore
//! use regmap::{Runner, SiteConfig};
//! use regmap_catalog::KindRegistry;
//!
//! let config = SiteConfig::load("site.json5")?;
//! let registry = KindRegistry::builtin()?;
//! let summary = Runner::new(&config, &registry).with_tasks(false).run()?;
//! ```

mod args;
mod config;
mod error;
mod runner;

pub use args::Args;
pub use config::{DeviceConfig, FileConfig, MasterConfig, SiteConfig, SlaveConfig, TasksConfig};
pub use error::{ConfigError, Result};
pub use runner::{Runner, Summary};
