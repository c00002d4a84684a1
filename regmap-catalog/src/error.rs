//! Catalog construction errors.

use thiserror::Error;

/// Errors raised while declaring catalogs and topologies.
///
/// These surface when a catalog is built, never while generating artifacts.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Alert on '{field}' needs at least one of min or max")]
    UnboundedAlert { field: String },

    #[error("Property group '{group}': address {address} of '{property}' is not above {previous}")]
    UnorderedAddress {
        group: String,
        property: String,
        address: u32,
        previous: u32,
    },

    #[error("Invalid location '{0}': expected a building and a floor character (e.g. \"A4\")")]
    InvalidLocation(String),

    #[error("Slave group '{0}' has no devices")]
    EmptySlaveGroup(String),

    #[error("Unknown device kind '{0}'")]
    UnknownKind(String),

    #[error("Device '{device}': offset {offset} moves registers past the 16-bit address space")]
    AddressOutOfRange { device: String, offset: u32 },
}

/// Result type alias using [`CatalogError`].
pub type Result<T> = std::result::Result<T, CatalogError>;
