//! File-level decoding: text in, ordered records and statistics out.

use std::borrow::Cow;

use serde::Serialize;

use crate::decode::{decoder_for, Decoder, DecoderOptions};
use crate::diagnostics::Diagnostics;
use crate::model::{CanonicalRecord, SourceFormat};

/// Per-file decode tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DecodeStats {
    /// Lines seen, blank ones included.
    pub lines: usize,
    pub blank: usize,
    /// Records produced (fallback and error records included).
    pub decoded: usize,
    /// Non-blank lines that produced no record.
    pub dropped: usize,
    pub fallback: usize,
    pub errors: usize,
}

/// One decoded source file.
#[derive(Debug, Clone, Serialize)]
pub struct DecodedSource {
    pub name: String,
    pub format: SourceFormat,
    pub records: Vec<CanonicalRecord>,
    pub stats: DecodeStats,
    pub diagnostics: Diagnostics,
}

impl DecodedSource {
    /// Records that carry an identifier.
    pub fn keyed(&self) -> impl Iterator<Item = &CanonicalRecord> {
        self.records.iter().filter(|r| r.identifier().is_some())
    }
}

/// Decode every line of `text` with `decoder`, preserving input order.
///
/// Every `\r` is removed, so LF and CRLF input decode identically.
pub fn decode_lines(
    text: &str,
    decoder: &dyn Decoder,
    diagnostics: &mut Diagnostics,
) -> (Vec<CanonicalRecord>, DecodeStats) {
    let mut records = Vec::new();
    let mut stats = DecodeStats::default();

    for (idx, raw) in text.lines().enumerate() {
        stats.lines += 1;

        let line = strip_carriage_returns(raw);
        if line.trim().is_empty() {
            stats.blank += 1;
            continue;
        }

        diagnostics.at_line(idx + 1);
        let Some(record) = decoder.decode(&line, diagnostics) else {
            stats.dropped += 1;
            continue;
        };
        match &record {
            CanonicalRecord::Fallback(_) => stats.fallback += 1,
            CanonicalRecord::Unparsed(_) => stats.errors += 1,
            _ => {}
        }
        stats.decoded += 1;
        records.push(record);
    }

    (records, stats)
}

/// Decode a whole source with the decoder for `format`.
pub fn decode_source(
    name: &str,
    text: &str,
    format: SourceFormat,
    options: &DecoderOptions,
    max_samples: usize,
) -> DecodedSource {
    let decoder = decoder_for(format, options);
    let mut diagnostics = Diagnostics::with_capacity(max_samples);
    let (records, stats) = decode_lines(text, decoder.as_ref(), &mut diagnostics);

    tracing::debug!(
        source = name,
        format = %format,
        lines = stats.lines,
        decoded = stats.decoded,
        dropped = stats.dropped,
        fallback = stats.fallback,
        errors = stats.errors,
        "decoded source"
    );
    if diagnostics.suppressed() > 0 {
        tracing::warn!(
            source = name,
            suppressed = diagnostics.suppressed(),
            "further layout mismatches not shown"
        );
    }

    DecodedSource {
        name: name.to_string(),
        format,
        records,
        stats,
        diagnostics,
    }
}

fn strip_carriage_returns(raw: &str) -> Cow<'_, str> {
    if raw.contains('\r') {
        Cow::Owned(raw.replace('\r', ""))
    } else {
        Cow::Borrowed(raw)
    }
}
