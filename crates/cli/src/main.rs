// arpc - accounts receivable projection CLI
//
// Classifies SAP open-item exports into aging brackets, management status,
// and weekly collection projections, then writes a report workbook.

mod exit_codes;
mod report;
mod table;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use arpc_engine::error::ReportError;
use exit_codes::{report_exit_code, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "arpc")]
#[command(about = "Collections projection report generator for SAP open-item exports")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a source workbook and write the projection report
    #[command(after_help = "\
Examples:
  arpc run partidas.xlsx
  arpc run partidas.xlsx -o reporte.xlsx
  arpc run partidas.xlsx -o reporte.xlsx --csv detalle.csv
  arpc run partidas.xlsx -c cobranzas.toml --top 5
  arpc run partidas.xlsx --json | jq .stats")]
    Run {
        /// Source workbook (.xlsx, .xls, .ods)
        input: PathBuf,

        /// Output workbook path (omit to skip the workbook)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Also write the classified detail rows as CSV
        #[arg(long, value_name = "PATH")]
        csv: Option<PathBuf>,

        /// Report configuration (TOML; defaults apply when omitted)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Print the full report result as JSON to stdout
        #[arg(long)]
        json: bool,

        /// Number of agents shown in the console summary (overrides config)
        #[arg(long, value_name = "N")]
        top: Option<usize>,
    },

    /// Parse and validate a report configuration file
    #[command(after_help = "\
Examples:
  arpc validate cobranzas.toml")]
    Validate {
        /// Configuration file to check
        config: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            input,
            output,
            csv,
            config,
            json,
            top,
        } => report::cmd_run(input, output, csv, config, json, top),
        Commands::Validate { config } => report::cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    /// Create error from a report error with proper exit code.
    pub fn from_report(err: ReportError) -> Self {
        let code = report_exit_code(&err);
        let hint = match &err {
            ReportError::MissingColumn { .. } => {
                Some("map renamed headers in the [columns] section of the config".to_string())
            }
            ReportError::SourceFile(_) => {
                Some("check the path and that the workbook is not open elsewhere".to_string())
            }
            ReportError::Export(_) => {
                Some("close the target file if it is open and re-run".to_string())
            }
            _ => None,
        };
        Self { code, message: err.to_string(), hint }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
