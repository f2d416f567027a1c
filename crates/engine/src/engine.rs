use std::time::Instant;

use crate::classify::classify;
use crate::collect::Collector;
use crate::config::ReportConfig;
use crate::model::{RawRecord, ReportMeta, ReportResult};
use crate::pivot::{agent_doc_type_pivot, agent_week_pivot};

/// Classify and aggregate one batch of raw rows.
///
/// Classification is total, so the run itself cannot fail; only the IO
/// around it can. Rows are processed in order and the valid ones keep
/// their source order in the result.
pub fn run(config: &ReportConfig, rows: Vec<RawRecord>) -> ReportResult {
    let start = Instant::now();
    let rows_read = rows.len();

    let mut collector = Collector::new();
    let mut rows_discarded = 0usize;
    for row in rows {
        if !collector.add(classify(row)) {
            rows_discarded += 1;
        }
    }

    let stats = collector.stats();
    let records = collector.into_records();
    let week_pivot = agent_week_pivot(&records);
    let doc_type_pivot = agent_doc_type_pivot(&records);

    ReportResult {
        meta: ReportMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
            elapsed_ms: start.elapsed().as_millis() as u64,
            rows_read,
            rows_discarded,
        },
        stats,
        week_pivot,
        doc_type_pivot,
        records,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn raw(doc_type: &str, agent: Option<&str>, days: i64, amount: f64) -> RawRecord {
        RawRecord {
            doc_type: doc_type.into(),
            days_overdue: days,
            agent: agent.map(Into::into),
            amount,
            net_due_date: None,
            base_payment_date: None,
            reference_note: if doc_type == "DL" { Some("L-1".into()) } else { None },
            header_reference_key: None,
            raw_fields: HashMap::new(),
        }
    }

    #[test]
    fn run_collects_valid_and_counts_discarded() {
        let config = ReportConfig::default();
        let rows = vec![
            raw("DR", Some("LOPEZ"), 5, 100.0),
            raw("DR", None, 5, 50.0),     // missing agent
            raw("KR", Some("LOPEZ"), 5, 50.0), // unknown doc type
            raw("DL", Some("GARCIA"), 70, 300.0),
        ];

        let result = run(&config, rows);
        assert_eq!(result.meta.rows_read, 4);
        assert_eq!(result.meta.rows_discarded, 2);
        assert_eq!(result.records.len(), 2);
        assert_eq!(result.stats.total_records, 2);
        assert!((result.stats.total_amount - 400.0).abs() < 1e-9);
        assert_eq!(result.stats.dr_count, 1);
        assert_eq!(result.stats.dl_count, 1);
        assert_eq!(result.week_pivot.rows.len(), 2);
        assert_eq!(result.meta.config_name, config.name);
    }

    #[test]
    fn empty_batch_yields_empty_report() {
        let result = run(&ReportConfig::default(), Vec::new());
        assert_eq!(result.stats, Default::default());
        assert!(result.records.is_empty());
        assert!(result.week_pivot.rows.is_empty());
        assert_eq!(result.week_pivot.grand_total, 0.0);
    }
}
