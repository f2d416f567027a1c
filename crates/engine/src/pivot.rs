use std::collections::BTreeMap;

use serde::Serialize;

use crate::classify::{DOC_TYPE_INVOICE, DOC_TYPE_NOTE};
use crate::model::{ClassifiedRecord, ProjectionWeek};

/// Margin label for synthesized total rows and columns.
pub const TOTAL_LABEL: &str = "Total general";

#[derive(Debug, Clone, Serialize)]
pub struct PivotRow {
    pub label: String,
    pub cells: Vec<f64>,
    pub total: f64,
}

/// Cross-tabulation of summed amounts by agent, with row and column margins.
#[derive(Debug, Clone, Serialize)]
pub struct PivotTable {
    pub title: String,
    pub col_labels: Vec<String>,
    /// One row per agent, sorted by label.
    pub rows: Vec<PivotRow>,
    pub col_totals: Vec<f64>,
    pub grand_total: f64,
}

impl PivotTable {
    fn build(
        title: &str,
        col_labels: Vec<String>,
        records: &[ClassifiedRecord],
        col_of: impl Fn(&ClassifiedRecord) -> Option<usize>,
    ) -> Self {
        let cols = col_labels.len();
        let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();

        for rec in records {
            let Some(col) = col_of(rec) else { continue };
            let cells = groups
                .entry(rec.record.agent_label().to_string())
                .or_insert_with(|| vec![0.0; cols]);
            cells[col] += rec.record.amount;
        }

        let mut col_totals = vec![0.0; cols];
        let mut grand_total = 0.0;
        let rows: Vec<PivotRow> = groups
            .into_iter()
            .map(|(label, cells)| {
                let total: f64 = cells.iter().sum();
                for (i, v) in cells.iter().enumerate() {
                    col_totals[i] += v;
                }
                grand_total += total;
                PivotRow { label, cells, total }
            })
            .collect();

        Self {
            title: title.into(),
            col_labels,
            rows,
            col_totals,
            grand_total,
        }
    }

    /// Rows sorted by total descending (ties by label), at most `n`.
    pub fn top_rows(&self, n: usize) -> Vec<&PivotRow> {
        let mut sorted: Vec<&PivotRow> = self.rows.iter().collect();
        sorted.sort_by(|a, b| {
            b.total
                .partial_cmp(&a.total)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.label.cmp(&b.label))
        });
        sorted.truncate(n);
        sorted
    }
}

/// Agent × projection week amounts. Valid records only carry the five
/// weekly labels or "POR VENCER"; "NO_PROCESAR" never reaches a pivot.
pub fn agent_week_pivot(records: &[ClassifiedRecord]) -> PivotTable {
    let col_labels: Vec<String> = [
        ProjectionWeek::Semana1,
        ProjectionWeek::Semana2,
        ProjectionWeek::Semana3,
        ProjectionWeek::Semana4,
        ProjectionWeek::Semana5,
        ProjectionWeek::PorVencer,
    ]
    .iter()
    .map(ToString::to_string)
    .collect();

    PivotTable::build(
        "PROYECCIÓN SEMANAL POR SECTORISTA",
        col_labels,
        records,
        |rec| match rec.projection {
            ProjectionWeek::Semana1 => Some(0),
            ProjectionWeek::Semana2 => Some(1),
            ProjectionWeek::Semana3 => Some(2),
            ProjectionWeek::Semana4 => Some(3),
            ProjectionWeek::Semana5 => Some(4),
            ProjectionWeek::PorVencer => Some(5),
            ProjectionWeek::NoProcesar => None,
        },
    )
}

/// Agent × document type amounts.
pub fn agent_doc_type_pivot(records: &[ClassifiedRecord]) -> PivotTable {
    PivotTable::build(
        "MONTO POR TIPO DE DOCUMENTO",
        vec![DOC_TYPE_INVOICE.into(), DOC_TYPE_NOTE.into()],
        records,
        |rec| match rec.record.doc_type.as_str() {
            DOC_TYPE_INVOICE => Some(0),
            DOC_TYPE_NOTE => Some(1),
            _ => None,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::model::RawRecord;
    use std::collections::HashMap;

    fn rec(agent: &str, doc_type: &str, days: i64, amount: f64) -> ClassifiedRecord {
        classify(RawRecord {
            doc_type: doc_type.into(),
            days_overdue: days,
            agent: Some(agent.into()),
            amount,
            net_due_date: None,
            base_payment_date: None,
            reference_note: if doc_type == "DL" { Some("L-1".into()) } else { None },
            header_reference_key: None,
            raw_fields: HashMap::new(),
        })
    }

    #[test]
    fn week_pivot_sums_and_margins() {
        // d=3 → SEMANA_1, d=10 → SEMANA_2
        let records = vec![
            rec("LOPEZ", "DR", 3, 100.0),
            rec("LOPEZ", "DR", 10, 50.0),
            rec("GARCIA", "DR", 3, 200.0),
        ];
        let pivot = agent_week_pivot(&records);

        assert_eq!(pivot.col_labels[0], "SEMANA_1");
        // BTreeMap ordering: GARCIA before LOPEZ
        assert_eq!(pivot.rows[0].label, "GARCIA");
        assert!((pivot.rows[0].cells[0] - 200.0).abs() < 1e-9);
        assert_eq!(pivot.rows[1].label, "LOPEZ");
        assert!((pivot.rows[1].cells[0] - 100.0).abs() < 1e-9);
        assert!((pivot.rows[1].cells[1] - 50.0).abs() < 1e-9);
        assert!((pivot.rows[1].total - 150.0).abs() < 1e-9);

        assert!((pivot.col_totals[0] - 300.0).abs() < 1e-9);
        assert!((pivot.col_totals[1] - 50.0).abs() < 1e-9);
        assert!((pivot.grand_total - 350.0).abs() < 1e-9);
    }

    #[test]
    fn week_pivot_carries_por_vencer_column() {
        // d=0 with no due date → POR VENCER
        let records = vec![rec("LOPEZ", "DR", 0, 75.0)];
        let pivot = agent_week_pivot(&records);
        assert_eq!(pivot.col_labels[5], "POR VENCER");
        assert!((pivot.rows[0].cells[5] - 75.0).abs() < 1e-9);
    }

    #[test]
    fn doc_type_pivot_splits_dr_dl() {
        let records = vec![
            rec("LOPEZ", "DR", 5, 100.0),
            rec("LOPEZ", "DL", 5, 40.0),
        ];
        let pivot = agent_doc_type_pivot(&records);
        assert_eq!(pivot.col_labels, vec!["DR", "DL"]);
        assert!((pivot.rows[0].cells[0] - 100.0).abs() < 1e-9);
        assert!((pivot.rows[0].cells[1] - 40.0).abs() < 1e-9);
        assert!((pivot.grand_total - 140.0).abs() < 1e-9);
    }

    #[test]
    fn top_rows_by_total_descending() {
        let records = vec![
            rec("A", "DR", 5, 10.0),
            rec("B", "DR", 5, 300.0),
            rec("C", "DR", 5, 200.0),
        ];
        let pivot = agent_week_pivot(&records);
        let top: Vec<_> = pivot.top_rows(2).iter().map(|r| r.label.clone()).collect();
        assert_eq!(top, vec!["B", "C"]);
    }
}
