//! `padron decode`: decode one extract and list its records.

use std::path::PathBuf;

use padron_recon::diagnostics::DEFAULT_MAX_SAMPLES;
use padron_recon::{decode_source, DecoderOptions, SourceFormat};

use crate::load::read_text;
use crate::report::{write_csv, write_json, OutFormat};
use crate::CliError;

pub struct DecodeArgs {
    pub file: PathBuf,
    pub format: SourceFormat,
    pub province: Option<String>,
    pub out: OutFormat,
    pub output: Option<PathBuf>,
    pub quiet: bool,
}

pub fn cmd_decode(args: DecodeArgs) -> Result<(), CliError> {
    let text = read_text(&args.file)
        .map_err(|e| CliError::io(format!("cannot read {}: {}", args.file.display(), e)))?;

    let name = args
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.file.display().to_string());
    let options = DecoderOptions {
        province: args.province,
    };
    let decoded = decode_source(&name, &text, args.format, &options, DEFAULT_MAX_SAMPLES);

    let label = match args.out {
        OutFormat::Json => write_json(&decoded, &args.output)?,
        OutFormat::Csv => write_csv(&decoded.records, &args.output)?,
    };

    if !args.quiet {
        let s = &decoded.stats;
        eprintln!(
            "{}: {} records from {} lines ({} blank, {} dropped, {} fallback, {} errors)",
            name, s.decoded, s.lines, s.blank, s.dropped, s.fallback, s.errors,
        );
        if args.output.is_some() {
            eprintln!("wrote {label}");
        }
    }

    Ok(())
}
