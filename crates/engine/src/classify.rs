use crate::model::{AgingBracket, ClassifiedRecord, ProjectionWeek, RawRecord, RecordStatus};
use crate::week::{week_of_base_date, week_of_due_date, week_of_overdue};

/// Invoice-type receivable document.
pub const DOC_TYPE_INVOICE: &str = "DR";
/// Promissory-note-type receivable document; needs a reference to be actionable.
pub const DOC_TYPE_NOTE: &str = "DL";

/// Aging bracket by days overdue. Upper bounds are strict.
pub fn bracket_for_days(days: i64) -> AgingBracket {
    if days <= 0 {
        AgingBracket::PorVencer
    } else if days < 31 {
        AgingBracket::Dias1A30
    } else if days < 61 {
        AgingBracket::Dias31A60
    } else if days < 91 {
        AgingBracket::Dias61A90
    } else if days < 121 {
        AgingBracket::Dias91A120
    } else if days < 181 {
        AgingBracket::Dias121A180
    } else if days < 361 {
        AgingBracket::Dias181A360
    } else {
        AgingBracket::Mas360
    }
}

/// Collection status. The in-collection check takes priority over the
/// projected check: day 61 is "EN GESTIÓN", never "PROYECTADO".
pub fn status_for_days(days: i64) -> RecordStatus {
    if days > 60 {
        RecordStatus::EnGestion
    } else if days <= 0 {
        RecordStatus::PorVencer
    } else {
        RecordStatus::Proyectado
    }
}

fn has_reference(record: &RawRecord) -> bool {
    record
        .reference_note
        .as_deref()
        .is_some_and(|r| !r.trim().is_empty())
}

/// Projection week for one record.
///
/// Promissory notes (DL) project from the base payment date; everything
/// else takes the invoice path, projecting from the overdue count or,
/// when not yet overdue, from the net due date.
pub fn projection_for(record: &RawRecord) -> ProjectionWeek {
    if record.doc_type == DOC_TYPE_NOTE {
        if !has_reference(record) {
            return ProjectionWeek::NoProcesar;
        }
        week_of_base_date(record.base_payment_date)
    } else if record.days_overdue <= 0 {
        week_of_due_date(record.net_due_date)
    } else {
        week_of_overdue(record.days_overdue)
    }
}

/// Whether the record participates in aggregation and report tables.
pub fn is_valid(record: &RawRecord) -> bool {
    if record.agent.is_none() {
        return false;
    }
    if record.doc_type != DOC_TYPE_INVOICE && record.doc_type != DOC_TYPE_NOTE {
        return false;
    }
    if record.doc_type == DOC_TYPE_NOTE && !has_reference(record) {
        return false;
    }
    true
}

/// Classify one raw record. Total function: malformed or missing inputs
/// degrade to the documented fallback labels, never to an error.
pub fn classify(record: RawRecord) -> ClassifiedRecord {
    let bracket = bracket_for_days(record.days_overdue);
    let status = status_for_days(record.days_overdue);
    let projection = projection_for(&record);
    let valid = is_valid(&record);
    ClassifiedRecord {
        record,
        bracket,
        status,
        projection,
        is_valid: valid,
    }
}
