// Aging export import (xlsx, xls, ods)
//
// One-way conversion into RawRecords. Cell values degrade to the documented
// defaults (blank → 0 / 0.0 / missing); only structural problems — unreadable
// file, missing required column — are errors.

use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

use calamine::{open_workbook_auto, Data, Reader};
use chrono::NaiveDate;

use arpc_engine::config::ReportConfig;
use arpc_engine::error::ReportError;
use arpc_engine::model::RawRecord;

/// Result of an import operation.
#[derive(Debug, Default)]
pub struct ImportResult {
    pub records: Vec<RawRecord>,
    /// Header row in source column order; drives the detail dump layout.
    pub headers: Vec<String>,
    pub rows_read: usize,
    pub rows_blank: usize,
    /// Date cells that had a value but could not be parsed.
    pub date_fallbacks: usize,
    pub import_duration_ms: u128,
}

impl ImportResult {
    /// One-line summary suitable for display.
    pub fn summary(&self) -> String {
        let mut parts = vec![format!(
            "{} row{}",
            self.rows_read,
            if self.rows_read == 1 { "" } else { "s" }
        )];
        if self.rows_blank > 0 {
            parts.push(format!("{} blank skipped", self.rows_blank));
        }
        if self.date_fallbacks > 0 {
            parts.push(format!("{} unparsable dates", self.date_fallbacks));
        }
        parts.push(format!("{}ms", self.import_duration_ms));
        parts.join(" · ")
    }
}

/// Column indexes resolved against the header row.
struct ColumnIndexes {
    doc_type: usize,
    days_overdue: usize,
    agent: usize,
    amount: usize,
    net_due_date: Option<usize>,
    base_payment_date: Option<usize>,
    reference_note: Option<usize>,
    header_reference_key: Option<usize>,
}

pub fn import(path: &Path, config: &ReportConfig) -> Result<ImportResult, ReportError> {
    let start = Instant::now();

    let mut workbook = open_workbook_auto(path)
        .map_err(|e| ReportError::SourceFile(format!("{}: {e}", path.display())))?;

    let sheet_name = match config.sheet {
        Some(ref name) => name.clone(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ReportError::SourceFile("workbook contains no sheets".into()))?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| ReportError::SourceFile(format!("sheet '{sheet_name}': {e}")))?;

    let mut result = ImportResult::default();
    let mut rows = range.rows();

    // Header row = first row with any non-blank cell. Leading banner rows
    // in the export are skipped the same way.
    let header_row = loop {
        match rows.next() {
            Some(row) if row.iter().any(|c| cell_str(c).is_some()) => break row,
            Some(_) => continue,
            None => {
                return Err(ReportError::SourceFile(format!(
                    "sheet '{sheet_name}' has no header row"
                )))
            }
        }
    };
    result.headers = header_row
        .iter()
        .map(|c| cell_str(c).unwrap_or_default())
        .collect();

    let indexes = resolve_columns(&result.headers, config)?;

    for row in rows {
        if row.iter().all(|c| cell_str(c).is_none()) {
            result.rows_blank += 1;
            continue;
        }

        let mut raw_fields = HashMap::new();
        for (i, header) in result.headers.iter().enumerate() {
            if header.is_empty() {
                continue;
            }
            if let Some(value) = row.get(i).and_then(cell_str) {
                raw_fields.insert(header.clone(), value);
            }
        }

        result.records.push(RawRecord {
            doc_type: cell_str(cell_at(row, indexes.doc_type)).unwrap_or_default(),
            days_overdue: cell_i64(cell_at(row, indexes.days_overdue)),
            agent: cell_str(cell_at(row, indexes.agent)),
            amount: cell_f64(cell_at(row, indexes.amount)),
            net_due_date: indexes.net_due_date.and_then(|i| {
                cell_date(cell_at(row, i), &config.date_format, &mut result.date_fallbacks)
            }),
            base_payment_date: indexes.base_payment_date.and_then(|i| {
                cell_date(cell_at(row, i), &config.date_format, &mut result.date_fallbacks)
            }),
            reference_note: indexes
                .reference_note
                .and_then(|i| cell_str(cell_at(row, i))),
            header_reference_key: indexes
                .header_reference_key
                .and_then(|i| cell_str(cell_at(row, i))),
            raw_fields,
        });
        result.rows_read += 1;
    }

    result.import_duration_ms = start.elapsed().as_millis();
    Ok(result)
}

fn resolve_columns(headers: &[String], config: &ReportConfig) -> Result<ColumnIndexes, ReportError> {
    let find = |name: &str| headers.iter().position(|h| h.trim() == name.trim());
    let require = |name: &str| {
        find(name).ok_or_else(|| ReportError::MissingColumn {
            column: name.to_string(),
        })
    };

    let cols = &config.columns;
    Ok(ColumnIndexes {
        doc_type: require(&cols.doc_type)?,
        days_overdue: require(&cols.days_overdue)?,
        agent: require(&cols.agent)?,
        amount: require(&cols.amount)?,
        net_due_date: find(&cols.net_due_date),
        base_payment_date: find(&cols.base_payment_date),
        reference_note: find(&cols.reference_note),
        header_reference_key: find(&cols.header_reference_key),
    })
}

// ---------------------------------------------------------------------------
// Cell coercion
// ---------------------------------------------------------------------------

/// Cell at `i`; rows narrower than the header count read as blank.
fn cell_at(row: &[Data], i: usize) -> &Data {
    static EMPTY: Data = Data::Empty;
    row.get(i).unwrap_or(&EMPTY)
}

/// Display string for a cell; `None` when blank. Integral floats are
/// rendered without decimals, dates in day/month/year order.
fn cell_str(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => {
            let t = s.trim();
            (!t.is_empty()).then(|| t.to_string())
        }
        Data::Float(n) => {
            if n.fract() == 0.0 && n.abs() < 1e15 {
                Some(format!("{}", *n as i64))
            } else {
                Some(format!("{n}"))
            }
        }
        Data::Int(n) => Some(format!("{n}")),
        Data::Bool(b) => Some(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.format("%d/%m/%Y").to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
        Data::Error(_) => None,
    }
}

fn cell_i64(cell: &Data) -> i64 {
    match cell {
        Data::Int(n) => *n,
        Data::Float(n) => *n as i64,
        Data::String(s) => {
            let t = s.trim();
            t.parse::<i64>()
                .ok()
                .or_else(|| t.parse::<f64>().ok().map(|f| f as i64))
                .unwrap_or(0)
        }
        _ => 0,
    }
}

fn cell_f64(cell: &Data) -> f64 {
    match cell {
        Data::Float(n) => *n,
        Data::Int(n) => *n as f64,
        Data::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn cell_date(cell: &Data, format: &str, fallbacks: &mut usize) -> Option<NaiveDate> {
    match cell {
        Data::Empty => None,
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(d) => Some(d.date()),
            None => {
                *fallbacks += 1;
                None
            }
        },
        Data::String(s) => {
            let t = s.trim();
            if t.is_empty() {
                return None;
            }
            match NaiveDate::parse_from_str(t, format) {
                Ok(d) => Some(d),
                Err(_) => {
                    *fallbacks += 1;
                    None
                }
            }
        }
        _ => {
            *fallbacks += 1;
            None
        }
    }
}
