//! `padron recon`: config-driven cross-reference.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use clap::Subcommand;
use padron_recon::engine::load_source;
use padron_recon::{ReconConfig, ReconInput};

use crate::cross::print_summary;
use crate::exit_codes::{EXIT_MISSING_FOUND, EXIT_RECON_INVALID_CONFIG, EXIT_RECON_RUNTIME};
use crate::load::read_text;
use crate::report::{write_csv, write_json};
use crate::CliError;

#[derive(Subcommand)]
pub enum ReconCommands {
    /// Run a cross-reference from a TOML config file
    #[command(after_help = "\
Examples:
  padron recon run arca-vs-sidrel.recon.toml
  padron recon run arca-vs-sidrel.recon.toml --json
  padron recon run arca-vs-sidrel.recon.toml --output result.json")]
    Run {
        /// Path to the .recon.toml config file
        config: PathBuf,

        /// Output JSON to stdout instead of human summary
        #[arg(long)]
        json: bool,

        /// Write JSON output to file (overrides [output].json)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Validate a recon config without running
    #[command(after_help = "\
Examples:
  padron recon validate arca-vs-sidrel.recon.toml")]
    Validate {
        /// Path to the .recon.toml config file
        config: PathBuf,
    },
}

pub fn cmd_recon(cmd: ReconCommands) -> Result<(), CliError> {
    match cmd {
        ReconCommands::Run { config, json, output } => cmd_recon_run(config, json, output),
        ReconCommands::Validate { config } => cmd_recon_validate(config),
    }
}

fn recon_err(code: u8, msg: impl Into<String>) -> CliError {
    CliError { code, message: msg.into(), hint: None }
}

fn load_config(config_path: &Path) -> Result<ReconConfig, CliError> {
    let config_str = std::fs::read_to_string(config_path)
        .map_err(|e| recon_err(EXIT_RECON_RUNTIME, format!("cannot read config: {e}")))?;
    ReconConfig::from_toml(&config_str)
        .map_err(|e| recon_err(EXIT_RECON_INVALID_CONFIG, e.to_string()))
}

fn cmd_recon_run(
    config_path: PathBuf,
    json_output: bool,
    output_file: Option<PathBuf>,
) -> Result<(), CliError> {
    let config = load_config(&config_path)?;

    // Resolve file paths relative to config file's directory
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));

    let mut sources = HashMap::new();
    for (name, source_config) in &config.sources {
        let path = base_dir.join(&source_config.file);
        let text = read_text(&path).map_err(|e| {
            recon_err(EXIT_RECON_RUNTIME, format!("cannot read {}: {e}", path.display()))
                .with_hint("source files resolve relative to the config file")
        })?;
        let decoded = load_source(name, &text, source_config, config.diagnostics.max_samples);
        sources.insert(name.clone(), decoded);
    }

    let result = padron_recon::run(&config, &ReconInput { sources })
        .map_err(|e| recon_err(EXIT_RECON_RUNTIME, e.to_string()))?;

    let json_path = output_file.or_else(|| config.output.json.as_ref().map(|p| base_dir.join(p)));
    if let Some(path) = json_path {
        let label = write_json(&result, &Some(path))
            .map_err(|e| recon_err(EXIT_RECON_RUNTIME, e.message))?;
        eprintln!("wrote {label}");
    }
    if let Some(csv) = &config.output.csv {
        let label = write_csv(&result.missing, &Some(base_dir.join(csv)))
            .map_err(|e| recon_err(EXIT_RECON_RUNTIME, e.message))?;
        eprintln!("wrote {label}");
    }

    if json_output {
        write_json(&result, &None).map_err(|e| recon_err(EXIT_RECON_RUNTIME, e.message))?;
    }

    // Human summary to stderr
    for source in &result.sources {
        let s = &source.stats;
        eprintln!(
            "{} ({}): {} records from {} lines, {} dropped, {} fallback, {} errors",
            source.name, source.format, s.decoded, s.lines, s.dropped, s.fallback, s.errors,
        );
    }
    print_summary(&result);

    if result.missing.is_empty() {
        Ok(())
    } else {
        Err(recon_err(EXIT_MISSING_FOUND, String::new()))
    }
}

fn cmd_recon_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config = load_config(&config_path)?;
    eprintln!(
        "valid: recon '{}' with {} source(s), {} vs {}",
        config.name,
        config.sources.len(),
        config.cross.primary,
        config.cross.secondary,
    );
    Ok(())
}
