//! CSV detail export.
//!
//! Flat dump of the classified rows, same column layout as the DETALLE
//! sheet, for consumers that want the data without a workbook.

use std::path::Path;

use arpc_engine::error::ReportError;
use arpc_engine::model::ReportResult;

use crate::export::{COL_BRACKET, COL_PROJECTION, COL_STATUS};

pub fn export_detail(
    result: &ReportResult,
    source_headers: &[String],
    path: &Path,
) -> Result<(), ReportError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| ReportError::Export(format!("{}: {e}", path.display())))?;

    let headers: Vec<&str> = source_headers
        .iter()
        .map(String::as_str)
        .filter(|h| !h.is_empty())
        .chain([COL_BRACKET, COL_STATUS, COL_PROJECTION])
        .collect();
    writer
        .write_record(&headers)
        .map_err(|e| ReportError::Export(e.to_string()))?;

    for classified in &result.records {
        let mut row: Vec<String> = source_headers
            .iter()
            .filter(|h| !h.is_empty())
            .map(|h| {
                classified
                    .record
                    .raw_fields
                    .get(h)
                    .cloned()
                    .unwrap_or_default()
            })
            .collect();
        row.push(classified.bracket.to_string());
        row.push(classified.status.to_string());
        row.push(classified.projection.to_string());
        writer
            .write_record(&row)
            .map_err(|e| ReportError::Export(e.to_string()))?;
    }

    writer
        .flush()
        .map_err(|e| ReportError::Export(e.to_string()))?;
    Ok(())
}
