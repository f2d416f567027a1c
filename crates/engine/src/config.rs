use serde::Deserialize;

use crate::error::ReportError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Report configuration. Every field has a default matching the standard
/// SAP aging export, so `arpc run` works without a config file.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_name")]
    pub name: String,
    /// Worksheet to read; first sheet when omitted.
    #[serde(default)]
    pub sheet: Option<String>,
    #[serde(default)]
    pub columns: ColumnMapping,
    /// Agents shown in the console table.
    #[serde(default = "default_top_agents")]
    pub top_agents: usize,
    /// Format for text date cells (native Excel dates need no format).
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            sheet: None,
            columns: ColumnMapping::default(),
            top_agents: default_top_agents(),
            date_format: default_date_format(),
        }
    }
}

fn default_name() -> String {
    "Reporte de Proyecciones de Cobranzas".into()
}

fn default_top_agents() -> usize {
    10
}

fn default_date_format() -> String {
    "%d/%m/%Y".into()
}

// ---------------------------------------------------------------------------
// Column mapping
// ---------------------------------------------------------------------------

/// Source column headers. Defaults are the SAP export's column names.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnMapping {
    #[serde(default = "default_doc_type")]
    pub doc_type: String,
    #[serde(default = "default_days_overdue")]
    pub days_overdue: String,
    #[serde(default = "default_agent")]
    pub agent: String,
    #[serde(default = "default_amount")]
    pub amount: String,
    #[serde(default = "default_net_due_date")]
    pub net_due_date: String,
    #[serde(default = "default_base_payment_date")]
    pub base_payment_date: String,
    #[serde(default = "default_reference_note")]
    pub reference_note: String,
    #[serde(default = "default_header_reference_key")]
    pub header_reference_key: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            doc_type: default_doc_type(),
            days_overdue: default_days_overdue(),
            agent: default_agent(),
            amount: default_amount(),
            net_due_date: default_net_due_date(),
            base_payment_date: default_base_payment_date(),
            reference_note: default_reference_note(),
            header_reference_key: default_header_reference_key(),
        }
    }
}

fn default_doc_type() -> String {
    "CD".into()
}

fn default_days_overdue() -> String {
    "Mora".into()
}

fn default_agent() -> String {
    "Sectorista".into()
}

fn default_amount() -> String {
    "Imp. ML2 Pend.".into()
}

fn default_net_due_date() -> String {
    "Vencimiento neto".into()
}

fn default_base_payment_date() -> String {
    "Base p.plazo pago".into()
}

fn default_reference_note() -> String {
    "Ref. Letra".into()
}

fn default_header_reference_key() -> String {
    "Clv.ref.(cabecera) 2".into()
}

impl ColumnMapping {
    /// All mapped headers, paired with the field they feed.
    pub fn entries(&self) -> [(&'static str, &str); 8] {
        [
            ("doc_type", &self.doc_type),
            ("days_overdue", &self.days_overdue),
            ("agent", &self.agent),
            ("amount", &self.amount),
            ("net_due_date", &self.net_due_date),
            ("base_payment_date", &self.base_payment_date),
            ("reference_note", &self.reference_note),
            ("header_reference_key", &self.header_reference_key),
        ]
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ReportConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReportError> {
        let config: ReportConfig =
            toml::from_str(input).map_err(|e| ReportError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReportError> {
        if self.top_agents == 0 {
            return Err(ReportError::ConfigValidation(
                "top_agents must be at least 1".into(),
            ));
        }

        let mut seen = std::collections::BTreeSet::new();
        for (field, header) in self.columns.entries() {
            if header.trim().is_empty() {
                return Err(ReportError::ConfigValidation(format!(
                    "column mapping '{field}' is empty"
                )));
            }
            if !seen.insert(header.to_string()) {
                return Err(ReportError::ConfigValidation(format!(
                    "column '{header}' is mapped more than once"
                )));
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
