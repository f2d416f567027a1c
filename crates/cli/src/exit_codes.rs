//! CLI Exit Code Registry
//!
//! Single source of truth for all CLI exit codes. Exit codes are part of
//! the shell contract — scheduled jobs branch on them.
//!
//! | Code | Meaning                                          |
//! |------|--------------------------------------------------|
//! | 0    | Success                                          |
//! | 1    | General error (unspecified)                      |
//! | 2    | CLI usage error (bad args)                       |
//! | 3    | Source workbook unreadable or missing columns    |
//! | 4    | Invalid report configuration                     |
//! | 5    | Report export failed                             |
//!
//! Adding a new code: add the constant, document what triggers it, update
//! the table, then wire it into `CliError`.

use arpc_engine::error::ReportError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// Source workbook cannot be read, or a required column is absent.
pub const EXIT_SOURCE: u8 = 3;

/// Report configuration failed to parse or validate.
pub const EXIT_CONFIG: u8 = 4;

/// Report output (workbook or CSV) could not be written.
pub const EXIT_EXPORT: u8 = 5;

/// Map a ReportError to its exit code.
pub fn report_exit_code(err: &ReportError) -> u8 {
    match err {
        ReportError::SourceFile(_) | ReportError::MissingColumn { .. } => EXIT_SOURCE,
        ReportError::ConfigParse(_) | ReportError::ConfigValidation(_) => EXIT_CONFIG,
        ReportError::Export(_) => EXIT_EXPORT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_errors_map_to_exit_3() {
        assert_eq!(
            report_exit_code(&ReportError::SourceFile("gone".into())),
            EXIT_SOURCE
        );
        assert_eq!(
            report_exit_code(&ReportError::MissingColumn { column: "Mora".into() }),
            EXIT_SOURCE
        );
    }

    #[test]
    fn config_and_export_errors_have_distinct_codes() {
        assert_eq!(
            report_exit_code(&ReportError::ConfigParse("bad toml".into())),
            EXIT_CONFIG
        );
        assert_eq!(
            report_exit_code(&ReportError::ConfigValidation("top_agents".into())),
            EXIT_CONFIG
        );
        assert_eq!(
            report_exit_code(&ReportError::Export("disk full".into())),
            EXIT_EXPORT
        );
    }
}
