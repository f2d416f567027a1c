//! Console summary table.
//!
//! Human-readable digest on stderr so stdout stays clean for --json piping.

use arpc_engine::model::ReportResult;
use arpc_engine::pivot::{PivotTable, TOTAL_LABEL};

const LABEL_WIDTH: usize = 18;
const CELL_WIDTH: usize = 14;

/// Format an amount with thousands separators and two decimals.
fn format_amount(value: f64) -> String {
    let negative = value < 0.0;
    let rounded = format!("{:.2}", value.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((&rounded, "00"));

    let mut grouped = String::new();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

/// Pad or truncate a label to the fixed column width.
fn fit_label(label: &str) -> String {
    if label.chars().count() > LABEL_WIDTH {
        let truncated: String = label.chars().take(LABEL_WIDTH - 1).collect();
        format!("{truncated}…")
    } else {
        format!("{label:<LABEL_WIDTH$}")
    }
}

fn format_row(label: &str, cells: &[f64], total: f64) -> String {
    let mut line = fit_label(label);
    for cell in cells {
        let amount = format_amount(*cell);
        line.push_str(&format!("{amount:>CELL_WIDTH$}"));
    }
    let amount = format_amount(total);
    line.push_str(&format!("{amount:>CELL_WIDTH$}"));
    line
}

fn format_header(pivot: &PivotTable) -> String {
    let mut line = fit_label("Sectorista");
    for label in &pivot.col_labels {
        line.push_str(&format!("{label:>CELL_WIDTH$}"));
    }
    line.push_str(&format!("{:>CELL_WIDTH$}", "Total"));
    line
}

/// Print the run digest and the top-N agent projection table to stderr.
pub fn print_summary(result: &ReportResult, top: usize) {
    let stats = &result.stats;
    let meta = &result.meta;

    eprintln!(
        "{}: {} documentos ({} DR, {} DL) · {} por {} en {}ms",
        meta.config_name,
        stats.total_records,
        stats.dr_count,
        stats.dl_count,
        format_amount(stats.total_amount),
        "cobrar",
        meta.elapsed_ms,
    );
    if meta.rows_discarded > 0 {
        eprintln!(
            "  {} de {} filas descartadas (sin gestor, tipo desconocido o letra sin referencia)",
            meta.rows_discarded, meta.rows_read
        );
    }

    let pivot = &result.week_pivot;
    if pivot.rows.is_empty() {
        return;
    }

    eprintln!();
    eprintln!("{}", format_header(pivot));
    for row in pivot.top_rows(top) {
        eprintln!("{}", format_row(&row.label, &row.cells, row.total));
    }
    if pivot.rows.len() > top {
        eprintln!("  … y {} sectoristas más", pivot.rows.len() - top);
    }
    eprintln!(
        "{}",
        format_row(TOTAL_LABEL, &pivot.col_totals, pivot.grand_total)
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_are_grouped_by_thousands() {
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(950.5), "950.50");
        assert_eq!(format_amount(1234.5), "1,234.50");
        assert_eq!(format_amount(1_234_567.891), "1,234,567.89");
        assert_eq!(format_amount(-1234.0), "-1,234.00");
    }

    #[test]
    fn labels_are_padded_to_column_width() {
        let fitted = fit_label("LOPEZ");
        assert_eq!(fitted.len(), LABEL_WIDTH);
        assert!(fitted.starts_with("LOPEZ"));
    }

    #[test]
    fn long_labels_are_truncated_with_ellipsis() {
        let fitted = fit_label("SECTORISTA CON NOMBRE MUY LARGO");
        assert_eq!(fitted.chars().count(), LABEL_WIDTH);
        assert!(fitted.ends_with('…'));
    }

    #[test]
    fn rows_align_cells_and_total() {
        let line = format_row("GARCIA", &[100.0, 0.0], 100.0);
        assert_eq!(line.len(), LABEL_WIDTH + 3 * CELL_WIDTH);
        assert!(line.ends_with("100.00"));
    }
}
