//! Built-in device catalogs.

pub mod bluelog;
pub mod evlink;
pub mod powidian;
