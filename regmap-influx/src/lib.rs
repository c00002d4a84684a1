//! InfluxDB Flux task generation.
//!
//! Renders Flux scripts (range alerts, deadman checks) for every device of
//! a resolved site. Templates are Tera templates; the built-in ones live in
//! `tasks/` and a site may point at its own directory instead.

pub mod context;
pub mod error;
pub mod tasks;

pub use error::{Result, TaskError};
pub use tasks::{RenderedTask, TaskGenerator, write_all};
