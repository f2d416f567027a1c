//! `arpc run` and `arpc validate` command implementations.

use std::fs;
use std::path::PathBuf;

use arpc_engine::{ReportConfig, ReportError};

use crate::table;
use crate::CliError;

fn load_config(path: Option<&PathBuf>) -> Result<ReportConfig, CliError> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|e| {
                CliError::from_report(ReportError::ConfigParse(format!(
                    "{}: {e}",
                    path.display()
                )))
            })?;
            ReportConfig::from_toml(&text).map_err(CliError::from_report)
        }
        None => Ok(ReportConfig::default()),
    }
}

pub fn cmd_run(
    input: PathBuf,
    output: Option<PathBuf>,
    csv: Option<PathBuf>,
    config_path: Option<PathBuf>,
    json: bool,
    top: Option<usize>,
) -> Result<(), CliError> {
    let mut config = load_config(config_path.as_ref())?;
    if let Some(top) = top {
        if top == 0 {
            return Err(CliError::args("--top must be at least 1"));
        }
        config.top_agents = top;
    }

    let imported = arpc_io::import(&input, &config).map_err(CliError::from_report)?;
    eprintln!("{}: {}", input.display(), imported.summary());

    let result = arpc_engine::run(&config, imported.records);
    table::print_summary(&result, config.top_agents);

    if let Some(path) = &output {
        let exported =
            arpc_io::export(&result, &imported.headers, path).map_err(CliError::from_report)?;
        eprintln!("wrote {} ({})", path.display(), exported.summary());
    }

    if let Some(path) = &csv {
        arpc_io::csv::export_detail(&result, &imported.headers, path)
            .map_err(CliError::from_report)?;
        eprintln!("wrote {} ({} rows)", path.display(), result.records.len());
    }

    if json {
        let rendered = serde_json::to_string_pretty(&result)
            .map_err(|e| CliError::from_report(ReportError::Export(e.to_string())))?;
        println!("{rendered}");
    }

    Ok(())
}

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let text = fs::read_to_string(&config_path).map_err(|e| {
        CliError::from_report(ReportError::ConfigParse(format!(
            "{}: {e}",
            config_path.display()
        )))
    })?;
    let config = ReportConfig::from_toml(&text).map_err(CliError::from_report)?;
    eprintln!(
        "valid: \"{}\" · {} agentes en consola · formato de fecha {}",
        config.name, config.top_agents, config.date_format
    );
    Ok(())
}
