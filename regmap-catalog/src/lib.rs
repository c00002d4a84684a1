//! Declarative register catalogs for Modbus devices.
//!
//! - [`value_type`] - Wire encodings (size, scale, null sentinel, word order)
//! - [`property`] - Properties, property groups and repetition helpers
//! - [`quantity`] - Quantities, semantic tags, unit spellings and icons
//! - [`alert`] - Range alerts for the time-series database
//! - [`kind`] - Device kinds and their ancestor chains
//! - [`topology`] - Masters, slave groups, devices and file groups
//! - [`registry`] - Built-in device kinds by name
//! - [`devices`] - The built-in catalogs themselves

pub mod alert;
pub mod devices;
pub mod error;
pub mod kind;
pub mod property;
pub mod quantity;
pub mod registry;
pub mod topology;
pub mod value_type;

pub use alert::Alert;
pub use error::{CatalogError, Result};
pub use kind::DeviceKind;
pub use property::{PollKind, Property, PropertyGroup, prefixed, repeat};
pub use quantity::{Quantity, platform_unit};
pub use registry::KindRegistry;
pub use topology::{Device, FileGroup, Location, Master, SlaveGroup};
pub use value_type::{ValueType, WireKind};
