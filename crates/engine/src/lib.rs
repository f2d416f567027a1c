//! `arpc-engine` — aging and projection classification for AR collection reports.
//!
//! Pure engine crate: receives pre-loaded records, returns classified records
//! and aggregates. No CLI or IO dependencies.

pub mod classify;
pub mod collect;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod pivot;
pub mod week;

pub use config::ReportConfig;
pub use engine::run;
pub use error::ReportError;
pub use model::{ClassifiedRecord, RawRecord, ReportResult};
