// padron CLI - employer registry decoding and cross-referencing

mod cross;
mod decode;
mod exit_codes;
mod load;
mod recon;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use padron_recon::SourceFormat;
use tracing_subscriber::EnvFilter;

use exit_codes::{EXIT_IO, EXIT_SUCCESS, EXIT_USAGE};
use report::OutFormat;

#[derive(Parser)]
#[command(name = "padron")]
#[command(about = "Cross-reference employer registries by fiscal identifier")]
#[command(long_version = long_version())]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    /// Debug logging (overrides PADRON_LOG)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode one extract and list its records
    #[command(after_help = "\
Formats:
  positional_ledger     fixed-width exploitation address extract
  delimited_registry    semicolon-separated labor registry extract
  multi_record_ledger   payroll ledger (01/02/03/05 records)
  generic               any text whose lines start with an identifier

Examples:
  padron decode domicilios.txt --format positional_ledger
  padron decode sidrel.csv --format delimited_registry --out csv --output sidrel-ids.csv
  padron decode lsd.txt --format multi_record_ledger --province 'Entre Rios'")]
    Decode {
        /// Extract to decode
        file: PathBuf,

        /// Source layout
        #[arg(long, short = 'f', value_parser = parse_format)]
        format: SourceFormat,

        /// Province appended to payroll employer addresses
        #[arg(long)]
        province: Option<String>,

        /// Output format
        #[arg(long, default_value = "json")]
        out: OutFormat,

        /// Output file (default: stdout)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Quiet mode - suppress stderr summary
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// List primary employers absent from a secondary registry (exit 1 = some missing)
    #[command(after_help = "\
Exit code 1 indicates that at least one primary employer is missing from the \
secondary registry. If either file has no identified employers nothing is compared.

Examples:
  padron cross domicilios.txt sidrel.csv --primary-format positional_ledger --secondary-format delimited_registry
  padron cross lsd.txt sidrel.csv --primary-format multi_record_ledger --secondary-format delimited_registry --out csv --output faltantes.csv")]
    Cross {
        /// Primary extract (employers to look for)
        primary: PathBuf,

        /// Secondary extract (registry to look in)
        secondary: PathBuf,

        /// Layout of the primary extract
        #[arg(long, value_parser = parse_format)]
        primary_format: SourceFormat,

        /// Layout of the secondary extract
        #[arg(long, value_parser = parse_format)]
        secondary_format: SourceFormat,

        /// Province appended to payroll employer addresses
        #[arg(long)]
        province: Option<String>,

        /// Output format
        #[arg(long, default_value = "json")]
        out: OutFormat,

        /// Output file (default: stdout)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Quiet mode - suppress stderr summary
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Config-driven cross-reference
    #[command(subcommand)]
    Recon(recon::ReconCommands),
}

fn parse_format(s: &str) -> Result<SourceFormat, String> {
    s.parse()
}

fn long_version() -> &'static str {
    if cfg!(debug_assertions) {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nengine:  padron-recon ", env!("CARGO_PKG_VERSION"),
            "\nbuild:   debug",
            "\ntarget:  ", env!("TARGET"),
        )
    } else {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nengine:  padron-recon ", env!("CARGO_PKG_VERSION"),
            "\nbuild:   release",
            "\ntarget:  ", env!("TARGET"),
        )
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("PADRON_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        None => {
            // No subcommand = show help
            eprintln!("Usage: padron <command> [options]");
            eprintln!("       padron --help for more information");
            Ok(())
        }
        Some(Commands::Decode { file, format, province, out, output, quiet }) => {
            decode::cmd_decode(decode::DecodeArgs { file, format, province, out, output, quiet })
        }
        Some(Commands::Cross {
            primary,
            secondary,
            primary_format,
            secondary_format,
            province,
            out,
            output,
            quiet,
        }) => cross::cmd_cross(cross::CrossArgs {
            primary,
            secondary,
            primary_format,
            secondary_format,
            province,
            out,
            output,
            quiet,
        }),
        Some(Commands::Recon(cmd)) => recon::cmd_recon(cmd),
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

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
