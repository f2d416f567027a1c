use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::pivot::PivotTable;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Grouping/display label for records with no assigned agent.
pub const NO_AGENT_LABEL: &str = "SIN GESTOR";

/// A single normalized row from the aging export.
///
/// Missing cells are already collapsed to the documented defaults
/// (`days_overdue` 0, `amount` 0.0, dates and references `None`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawRecord {
    /// Document class, "DR" (invoice) or "DL" (promissory note).
    pub doc_type: String,
    pub days_overdue: i64,
    /// Assigned collections agent (sectorista). `None` when the source
    /// cell was blank; such records never enter the aggregates.
    pub agent: Option<String>,
    /// Pending amount in local currency.
    pub amount: f64,
    pub net_due_date: Option<NaiveDate>,
    pub base_payment_date: Option<NaiveDate>,
    pub reference_note: Option<String>,
    pub header_reference_key: Option<String>,
    /// Original cells by column header, for the detail dump.
    pub raw_fields: HashMap<String, String>,
}

impl RawRecord {
    /// Agent label for grouping and display.
    pub fn agent_label(&self) -> &str {
        self.agent.as_deref().unwrap_or(NO_AGENT_LABEL)
    }
}

// ---------------------------------------------------------------------------
// Derived labels
// ---------------------------------------------------------------------------

/// Days-overdue bracket used for risk segmentation. Eight fixed labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AgingBracket {
    #[serde(rename = "Por Vencer")]
    PorVencer,
    #[serde(rename = "1 a 30")]
    Dias1A30,
    #[serde(rename = "31 a 60")]
    Dias31A60,
    #[serde(rename = "61 a 90")]
    Dias61A90,
    #[serde(rename = "91 a 120")]
    Dias91A120,
    #[serde(rename = "121 a 180")]
    Dias121A180,
    #[serde(rename = "181 a 360")]
    Dias181A360,
    #[serde(rename = "360+")]
    Mas360,
}

impl std::fmt::Display for AgingBracket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PorVencer => write!(f, "Por Vencer"),
            Self::Dias1A30 => write!(f, "1 a 30"),
            Self::Dias31A60 => write!(f, "31 a 60"),
            Self::Dias61A90 => write!(f, "61 a 90"),
            Self::Dias91A120 => write!(f, "91 a 120"),
            Self::Dias121A180 => write!(f, "121 a 180"),
            Self::Dias181A360 => write!(f, "181 a 360"),
            Self::Mas360 => write!(f, "360+"),
        }
    }
}

/// Collection status of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RecordStatus {
    /// Past 60 days overdue, handed to active collection.
    #[serde(rename = "EN GESTIÓN")]
    EnGestion,
    /// Not yet due.
    #[serde(rename = "POR VENCER")]
    PorVencer,
    /// Projected for collection this period.
    #[serde(rename = "PROYECTADO")]
    Proyectado,
}

impl std::fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnGestion => write!(f, "EN GESTIÓN"),
            Self::PorVencer => write!(f, "POR VENCER"),
            Self::Proyectado => write!(f, "PROYECTADO"),
        }
    }
}

/// Weekly collection-effort bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProjectionWeek {
    #[serde(rename = "SEMANA_1")]
    Semana1,
    #[serde(rename = "SEMANA_2")]
    Semana2,
    #[serde(rename = "SEMANA_3")]
    Semana3,
    #[serde(rename = "SEMANA_4")]
    Semana4,
    #[serde(rename = "SEMANA_5")]
    Semana5,
    /// No date to project from; the record is simply not due yet.
    #[serde(rename = "POR VENCER")]
    PorVencer,
    /// Promissory note without a reference; excluded downstream.
    #[serde(rename = "NO_PROCESAR")]
    NoProcesar,
}

impl std::fmt::Display for ProjectionWeek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Semana1 => write!(f, "SEMANA_1"),
            Self::Semana2 => write!(f, "SEMANA_2"),
            Self::Semana3 => write!(f, "SEMANA_3"),
            Self::Semana4 => write!(f, "SEMANA_4"),
            Self::Semana5 => write!(f, "SEMANA_5"),
            Self::PorVencer => write!(f, "POR VENCER"),
            Self::NoProcesar => write!(f, "NO_PROCESAR"),
        }
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// A raw record plus its derived labels. Built once, never mutated;
/// reclassifying means constructing a new one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedRecord {
    #[serde(flatten)]
    pub record: RawRecord,
    pub bracket: AgingBracket,
    pub status: RecordStatus,
    pub projection: ProjectionWeek,
    pub is_valid: bool,
}

// ---------------------------------------------------------------------------
// Aggregates + Output
// ---------------------------------------------------------------------------

/// Counts and amount sums over the valid records, split by document type.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateStats {
    pub total_records: usize,
    pub dr_count: usize,
    pub dl_count: usize,
    pub dr_amount: f64,
    pub dl_amount: f64,
    pub total_amount: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
    pub elapsed_ms: u64,
    /// Raw rows received, including the invalid ones.
    pub rows_read: usize,
    /// Rows classified but excluded from aggregates and tables.
    pub rows_discarded: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportResult {
    pub meta: ReportMeta,
    pub stats: AggregateStats,
    pub week_pivot: PivotTable,
    pub doc_type_pivot: PivotTable,
    /// Valid classified records in source row order.
    pub records: Vec<ClassifiedRecord>,
}
