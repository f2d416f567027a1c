//! `arpc-io` — file I/O for the collection-projection report.
//!
//! Import: SAP aging export (xlsx, xls, ods) into raw records.
//! Export: the three-sheet report workbook, plus a CSV detail dump.

pub mod csv;
pub mod export;
pub mod import;

pub use export::{export, ExportResult};
pub use import::{import, ImportResult};
