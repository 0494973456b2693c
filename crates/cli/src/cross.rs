//! `padron cross`: ad-hoc cross-reference of two extracts.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use padron_recon::config::{CrossConfig, DiagnosticsConfig, OutputConfig, SourceConfig};
use padron_recon::engine::load_source;
use padron_recon::{ReconConfig, ReconInput, ReconResult, SourceFormat};

use crate::exit_codes::EXIT_MISSING_FOUND;
use crate::load::read_text;
use crate::report::{write_csv, write_json, OutFormat};
use crate::CliError;

const PRIMARY: &str = "primary";
const SECONDARY: &str = "secondary";

pub struct CrossArgs {
    pub primary: PathBuf,
    pub secondary: PathBuf,
    pub primary_format: SourceFormat,
    pub secondary_format: SourceFormat,
    pub province: Option<String>,
    pub out: OutFormat,
    pub output: Option<PathBuf>,
    pub quiet: bool,
}

pub fn cmd_cross(args: CrossArgs) -> Result<(), CliError> {
    let config = ReconConfig {
        name: format!("{} vs {}", args.primary.display(), args.secondary.display()),
        sources: BTreeMap::from([
            (PRIMARY.to_string(), source_config(&args.primary, args.primary_format, &args.province)),
            (SECONDARY.to_string(), source_config(&args.secondary, args.secondary_format, &args.province)),
        ]),
        cross: CrossConfig {
            primary: PRIMARY.into(),
            secondary: SECONDARY.into(),
        },
        diagnostics: DiagnosticsConfig::default(),
        output: OutputConfig::default(),
    };
    config
        .validate()
        .map_err(|e| CliError::args(e.to_string()))?;

    let mut sources = HashMap::new();
    for (name, path, source_config) in [
        (PRIMARY, &args.primary, config.primary()),
        (SECONDARY, &args.secondary, config.secondary()),
    ] {
        let text = read_text(path)
            .map_err(|e| CliError::io(format!("cannot read {}: {}", path.display(), e)))?;
        let decoded = load_source(name, &text, source_config, config.diagnostics.max_samples);
        sources.insert(name.to_string(), decoded);
    }

    let result = padron_recon::run(&config, &ReconInput { sources })
        .map_err(|e| CliError::args(e.to_string()))?;

    let label = match args.out {
        OutFormat::Json => write_json(&result, &args.output)?,
        OutFormat::Csv => write_csv(&result.missing, &args.output)?,
    };

    if !args.quiet {
        print_summary(&result);
        if args.output.is_some() {
            eprintln!("wrote {label}");
        }
    }

    if result.missing.is_empty() {
        Ok(())
    } else {
        Err(CliError {
            code: EXIT_MISSING_FOUND,
            message: String::new(),
            hint: None,
        })
    }
}

fn source_config(path: &Path, format: SourceFormat, province: &Option<String>) -> SourceConfig {
    SourceConfig {
        format,
        file: path.display().to_string(),
        province: province.clone(),
    }
}

/// One-line stderr summary shared with `recon run`.
pub fn print_summary(result: &ReconResult) {
    let s = &result.summary;
    eprintln!(
        "cross-reference: {} of {} {} records missing from {} ({} distinct identifiers)",
        s.missing, s.primary_keyed, result.meta.primary, result.meta.secondary, s.secondary_identifiers,
    );
    if s.primary_keyed == 0 || s.secondary_keyed == 0 {
        eprintln!("warning: a source has no identified employers; nothing was compared");
    }
}
