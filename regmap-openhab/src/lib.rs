//! openHAB Modbus binding generator.
//!
//! Turns a site of masters, slave groups and devices into one things file
//! and one items file per file group:
//!
//! ```text
//! conf/things/<file>.things[.unused]
//! conf/items/<file>.items[.unused]
//! ```
//!
//! - [`partition`] - Splitting property groups into bounded read windows
//! - [`naming`] - Hierarchical identifiers and display names
//! - [`plan`] - Resolved topology, shared with the task generator
//! - [`render`] - Things and items records
//! - [`generator`] - Traversal rendering everything in memory
//! - [`output`] - Writing the rendered files

pub mod error;
pub mod generator;
pub mod naming;
pub mod output;
pub mod partition;
pub mod plan;
pub mod render;

pub use error::{OutputError, Result};
pub use generator::{Artifacts, Generator};
pub use output::{DISABLED_SUFFIX, write_all};
pub use partition::{MAX_POLLER_LEN, Partitioner, Poller};
pub use plan::{DevicePlan, FilePlan, MasterPlan, SitePlan, SlavePlan};
