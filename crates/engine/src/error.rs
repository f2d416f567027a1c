use std::fmt;

#[derive(Debug)]
pub enum ReportError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (empty or duplicate column names, etc.).
    ConfigValidation(String),
    /// Required column absent from the source header row.
    MissingColumn { column: String },
    /// Source workbook could not be opened or read. Fatal to the run;
    /// retry with a correct file.
    SourceFile(String),
    /// Report output could not be written. In-memory results stay valid.
    Export(String),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingColumn { column } => {
                write!(f, "source table is missing column '{column}'")
            }
            Self::SourceFile(msg) => write!(f, "cannot read source file: {msg}"),
            Self::Export(msg) => write!(f, "cannot write report: {msg}"),
        }
    }
}

impl std::error::Error for ReportError {}
