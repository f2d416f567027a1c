// Report workbook export (xlsx)
//
// Three fixed sheets: DETALLE (classified rows), PROYECCIONES (pivot
// tables), RESUMEN (key-value indicators). Sheet, column, and label names
// are part of the output contract; downstream consumers reference them
// by name.

use std::path::Path;
use std::time::Instant;

use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook, Worksheet, XlsxError};

use arpc_engine::error::ReportError;
use arpc_engine::model::ReportResult;
use arpc_engine::pivot::{PivotTable, TOTAL_LABEL};

pub const SHEET_DETAIL: &str = "DETALLE";
pub const SHEET_PIVOTS: &str = "PROYECCIONES";
pub const SHEET_SUMMARY: &str = "RESUMEN";

pub const COL_BRACKET: &str = "TRAMO";
pub const COL_STATUS: &str = "ESTATUS 1";
pub const COL_PROJECTION: &str = "PROYECCIÓN";

/// Result of a workbook export.
#[derive(Debug, Default)]
pub struct ExportResult {
    pub sheets_exported: usize,
    pub detail_rows: usize,
    pub export_duration_ms: u128,
}

impl ExportResult {
    /// One-line summary suitable for display.
    pub fn summary(&self) -> String {
        format!(
            "{} sheets · {} detail rows · {}ms",
            self.sheets_exported, self.detail_rows, self.export_duration_ms
        )
    }
}

fn xlsx_err(e: XlsxError) -> ReportError {
    ReportError::Export(e.to_string())
}

/// Write the report workbook. The workbook handle lives only inside this
/// call: saved on success, dropped on any error path.
pub fn export(
    result: &ReportResult,
    source_headers: &[String],
    path: &Path,
) -> Result<ExportResult, ReportError> {
    let start = Instant::now();
    let mut out = ExportResult::default();

    let mut workbook = XlsxWorkbook::new();
    let header_fmt = Format::new().set_bold();
    let money_fmt = Format::new().set_num_format("#,##0.00");

    {
        let ws = workbook
            .add_worksheet()
            .set_name(SHEET_DETAIL)
            .map_err(xlsx_err)?;
        out.detail_rows = write_detail(ws, result, source_headers, &header_fmt)?;
        out.sheets_exported += 1;
    }

    {
        let ws = workbook
            .add_worksheet()
            .set_name(SHEET_PIVOTS)
            .map_err(xlsx_err)?;
        let next = write_pivot(ws, 0, &result.week_pivot, &header_fmt, &money_fmt)?;
        write_pivot(ws, next + 1, &result.doc_type_pivot, &header_fmt, &money_fmt)?;
        out.sheets_exported += 1;
    }

    {
        let ws = workbook
            .add_worksheet()
            .set_name(SHEET_SUMMARY)
            .map_err(xlsx_err)?;
        write_summary(ws, result, &header_fmt, &money_fmt)?;
        out.sheets_exported += 1;
    }

    workbook
        .save(path)
        .map_err(|e| ReportError::Export(format!("{}: {e}", path.display())))?;

    out.export_duration_ms = start.elapsed().as_millis();
    Ok(out)
}

/// Detail dump: source columns in source order, then the derived labels.
/// Numeric-looking cells are written as numbers so Excel sums them.
fn write_detail(
    ws: &mut Worksheet,
    result: &ReportResult,
    source_headers: &[String],
    header_fmt: &Format,
) -> Result<usize, ReportError> {
    let headers: Vec<&str> = source_headers
        .iter()
        .map(String::as_str)
        .filter(|h| !h.is_empty())
        .chain([COL_BRACKET, COL_STATUS, COL_PROJECTION])
        .collect();

    for (c, header) in headers.iter().enumerate() {
        ws.write_string_with_format(0, c as u16, *header, header_fmt)
            .map_err(xlsx_err)?;
    }

    for (r, classified) in result.records.iter().enumerate() {
        let row = (r + 1) as u32;
        let mut col = 0u16;
        for header in source_headers.iter().filter(|h| !h.is_empty()) {
            if let Some(value) = classified.record.raw_fields.get(header) {
                match value.parse::<f64>() {
                    Ok(n) => ws.write_number(row, col, n).map_err(xlsx_err)?,
                    Err(_) => ws.write_string(row, col, value).map_err(xlsx_err)?,
                };
            }
            col += 1;
        }
        ws.write_string(row, col, classified.bracket.to_string())
            .map_err(xlsx_err)?;
        ws.write_string(row, col + 1, classified.status.to_string())
            .map_err(xlsx_err)?;
        ws.write_string(row, col + 2, classified.projection.to_string())
            .map_err(xlsx_err)?;
    }

    Ok(result.records.len())
}

/// Write one pivot block starting at `start_row`; returns the next free row.
fn write_pivot(
    ws: &mut Worksheet,
    start_row: u32,
    pivot: &PivotTable,
    header_fmt: &Format,
    money_fmt: &Format,
) -> Result<u32, ReportError> {
    ws.write_string_with_format(start_row, 0, &pivot.title, header_fmt)
        .map_err(xlsx_err)?;

    let head = start_row + 1;
    ws.write_string_with_format(head, 0, "Sectorista", header_fmt)
        .map_err(xlsx_err)?;
    for (c, label) in pivot.col_labels.iter().enumerate() {
        ws.write_string_with_format(head, (c + 1) as u16, label, header_fmt)
            .map_err(xlsx_err)?;
    }
    let total_col = (pivot.col_labels.len() + 1) as u16;
    ws.write_string_with_format(head, total_col, TOTAL_LABEL, header_fmt)
        .map_err(xlsx_err)?;

    let mut row = head + 1;
    for pivot_row in &pivot.rows {
        ws.write_string(row, 0, &pivot_row.label).map_err(xlsx_err)?;
        for (c, value) in pivot_row.cells.iter().enumerate() {
            ws.write_number_with_format(row, (c + 1) as u16, *value, money_fmt)
                .map_err(xlsx_err)?;
        }
        ws.write_number_with_format(row, total_col, pivot_row.total, money_fmt)
            .map_err(xlsx_err)?;
        row += 1;
    }

    ws.write_string_with_format(row, 0, TOTAL_LABEL, header_fmt)
        .map_err(xlsx_err)?;
    for (c, value) in pivot.col_totals.iter().enumerate() {
        ws.write_number_with_format(row, (c + 1) as u16, *value, money_fmt)
            .map_err(xlsx_err)?;
    }
    ws.write_number_with_format(row, total_col, pivot.grand_total, money_fmt)
        .map_err(xlsx_err)?;

    Ok(row + 1)
}

fn write_summary(
    ws: &mut Worksheet,
    result: &ReportResult,
    header_fmt: &Format,
    money_fmt: &Format,
) -> Result<(), ReportError> {
    let meta = &result.meta;
    let stats = &result.stats;

    ws.write_string_with_format(0, 0, &meta.config_name, header_fmt)
        .map_err(xlsx_err)?;

    let counts: [(&str, f64); 6] = [
        ("Filas leídas", meta.rows_read as f64),
        ("Filas descartadas", meta.rows_discarded as f64),
        ("Documentos procesados", stats.total_records as f64),
        ("Documentos DR", stats.dr_count as f64),
        ("Documentos DL", stats.dl_count as f64),
        ("Tiempo de proceso (ms)", meta.elapsed_ms as f64),
    ];
    let amounts: [(&str, f64); 3] = [
        ("Monto DR", stats.dr_amount),
        ("Monto DL", stats.dl_amount),
        ("Monto total", stats.total_amount),
    ];

    let mut row = 2u32;
    for (label, value) in counts {
        ws.write_string(row, 0, label).map_err(xlsx_err)?;
        ws.write_number(row, 1, value).map_err(xlsx_err)?;
        row += 1;
    }
    for (label, value) in amounts {
        ws.write_string(row, 0, label).map_err(xlsx_err)?;
        ws.write_number_with_format(row, 1, value, money_fmt)
            .map_err(xlsx_err)?;
        row += 1;
    }

    ws.write_string(row, 0, "Fecha de reporte").map_err(xlsx_err)?;
    ws.write_string(row, 1, &meta.run_at).map_err(xlsx_err)?;
    ws.write_string(row + 1, 0, "Versión del motor")
        .map_err(xlsx_err)?;
    ws.write_string(row + 1, 1, &meta.engine_version)
        .map_err(xlsx_err)?;

    Ok(())
}
