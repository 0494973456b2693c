//! JSON and CSV writers shared by the commands.

use std::io::Write;
use std::path::PathBuf;

use clap::ValueEnum;
use padron_recon::CanonicalRecord;
use serde::Serialize;

use crate::CliError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutFormat {
    Json,
    Csv,
}

/// One exported line: identifier (empty for payroll detail records) and
/// display text.
#[derive(Debug, Serialize)]
pub struct ReportRow<'a> {
    pub identifier: &'a str,
    pub display: &'a str,
}

impl<'a> From<&'a CanonicalRecord> for ReportRow<'a> {
    fn from(record: &'a CanonicalRecord) -> Self {
        Self {
            identifier: record.identifier().unwrap_or(""),
            display: record.display_text(),
        }
    }
}

fn open_output(out: &Option<PathBuf>) -> Result<(Box<dyn Write>, String), CliError> {
    match out {
        Some(path) => {
            let f = std::fs::File::create(path).map_err(|e| {
                CliError::io(format!("cannot create {}: {}", path.display(), e))
            })?;
            Ok((Box::new(std::io::BufWriter::new(f)), path.display().to_string()))
        }
        None => Ok((
            Box::new(std::io::BufWriter::new(std::io::stdout().lock())),
            "stdout".to_string(),
        )),
    }
}

/// Write `{identifier, display}` rows. Returns the output label.
pub fn write_csv<'a>(
    records: impl IntoIterator<Item = &'a CanonicalRecord>,
    out: &Option<PathBuf>,
) -> Result<String, CliError> {
    let (writer, out_label) = open_output(out)?;
    let mut csv_writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    let mut written = 0usize;
    for record in records {
        csv_writer
            .serialize(ReportRow::from(record))
            .map_err(|e| CliError::io(format!("CSV write error: {}", e)))?;
        written += 1;
    }

    // Always write header, even with zero rows
    if written == 0 {
        csv_writer
            .write_record(["identifier", "display"])
            .map_err(|e| CliError::io(format!("CSV write error: {}", e)))?;
    }

    csv_writer
        .flush()
        .map_err(|e| CliError::io(format!("CSV flush error: {}", e)))?;

    Ok(out_label)
}

/// Write pretty JSON followed by a newline. Returns the output label.
pub fn write_json<T: Serialize>(value: &T, out: &Option<PathBuf>) -> Result<String, CliError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("JSON serialization error: {}", e)))?;
    let (mut writer, out_label) = open_output(out)?;
    writeln!(writer, "{json}")
        .and_then(|_| writer.flush())
        .map_err(|e| CliError::io(format!("cannot write {}: {}", out_label, e)))?;
    Ok(out_label)
}
