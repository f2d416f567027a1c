use crate::classify::{DOC_TYPE_INVOICE, DOC_TYPE_NOTE};
use crate::model::{AggregateStats, ClassifiedRecord};

/// Ordered store of valid classified records.
///
/// Insertion order is source row order. Invalid records are dropped at the
/// door: they never participate in stats, pivots, or the detail dump.
#[derive(Debug, Default)]
pub struct Collector {
    records: Vec<ClassifiedRecord>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append when valid. Returns whether the record was kept.
    pub fn add(&mut self, record: ClassifiedRecord) -> bool {
        if record.is_valid {
            self.records.push(record);
            true
        } else {
            false
        }
    }

    pub fn records(&self) -> &[ClassifiedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<ClassifiedRecord> {
        self.records
    }

    /// Full scan on every call; no incremental caching. The pipeline is
    /// single-pass batch, so this runs once per export.
    pub fn stats(&self) -> AggregateStats {
        let mut stats = AggregateStats::default();
        for c in &self.records {
            stats.total_records += 1;
            stats.total_amount += c.record.amount;
            match c.record.doc_type.as_str() {
                DOC_TYPE_INVOICE => {
                    stats.dr_count += 1;
                    stats.dr_amount += c.record.amount;
                }
                DOC_TYPE_NOTE => {
                    stats.dl_count += 1;
                    stats.dl_amount += c.record.amount;
                }
                _ => {}
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::model::RawRecord;
    use std::collections::HashMap;

    fn raw(doc_type: &str, agent: Option<&str>, amount: f64) -> RawRecord {
        RawRecord {
            doc_type: doc_type.into(),
            days_overdue: 10,
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
    fn invalid_records_never_enter() {
        let mut collector = Collector::new();
        assert!(collector.add(classify(raw("DR", Some("A"), 100.0))));
        assert!(!collector.add(classify(raw("DR", None, 100.0))));
        assert!(!collector.add(classify(raw("KR", Some("A"), 100.0))));
        assert_eq!(collector.len(), 1);
    }

    #[test]
    fn stats_split_by_doc_type() {
        let mut collector = Collector::new();
        collector.add(classify(raw("DR", Some("A"), 100.0)));
        collector.add(classify(raw("DR", Some("B"), 250.5)));
        collector.add(classify(raw("DL", Some("A"), 400.0)));

        let stats = collector.stats();
        assert_eq!(stats.total_records, 3);
        assert_eq!(stats.dr_count, 2);
        assert_eq!(stats.dl_count, 1);
        assert!((stats.dr_amount - 350.5).abs() < 1e-9);
        assert!((stats.dl_amount - 400.0).abs() < 1e-9);
        // only DR and DL are valid, so the split is exhaustive
        assert!((stats.dr_amount + stats.dl_amount - stats.total_amount).abs() < 1e-9);
    }

    #[test]
    fn excluded_records_do_not_count() {
        let mut collector = Collector::new();
        collector.add(classify(raw("DR", Some("A"), 100.0)));
        collector.add(classify(raw("DR", None, 9999.0)));
        assert!((collector.stats().total_amount - 100.0).abs() < 1e-9);
    }

    #[test]
    fn insertion_order_preserved() {
        let mut collector = Collector::new();
        collector.add(classify(raw("DR", Some("Z"), 1.0)));
        collector.add(classify(raw("DR", Some("A"), 2.0)));
        let agents: Vec<_> = collector
            .records()
            .iter()
            .map(|c| c.record.agent_label().to_string())
            .collect();
        assert_eq!(agents, vec!["Z", "A"]);
    }
}
