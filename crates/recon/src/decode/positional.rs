//! Fixed-width tax "exploitation address" extracts.
//!
//! ```text
//! 20100745683AT0GUALEGUAYCHU      …  000867       3100    PARANA      …  0500001523640 2006-08-06-21.18.31.028850
//! └identifier┘└┬┘└street (lazy)┘     └house┘ filler └cp┘   └locality┘    └13-digit code + timestamp blob┘
//!          system code
//! ```
//!
//! Postal codes are usually 4 digits but some extracts carry shorter ones
//! (`100`). The strict 4-digit layout is tried first. The widened layout
//! accepts 1 to 4 digits but requires the locality to open with a letter, so
//! the `0` filler columns some lines carry can never pose as the postal code.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::pattern::{anchor, compile, field, Segment};
use super::Decoder;
use crate::diagnostics::{Diagnostics, MismatchReason};
use crate::identifier::split_prefix;
use crate::model::{CanonicalRecord, FallbackRecord, LedgerAddressRecord, SourceFormat};

const fn layout(postal_code: &'static str, locality: &'static str) -> [Segment; 11] {
    [
        field("identifier", "[0-9]{11}"),
        anchor(".{3}"),
        field("street", ".*?"),
        field("house_number", "[0-9]{6}"),
        anchor(".*?"),
        field("postal_code", postal_code),
        anchor(r"\s+"),
        field("locality", locality),
        anchor(r"\s+"),
        field("trailer", "[0-9]{13}.*"),
        anchor("$"),
    ]
}

const STRICT_LAYOUT: [Segment; 11] = layout("[0-9]{4}", ".*?");
const WIDE_LAYOUT: [Segment; 11] = layout("[0-9]{1,4}", r"[^\s0-9].*?");

static STRICT: LazyLock<Regex> =
    LazyLock::new(|| compile(&STRICT_LAYOUT).expect("strict positional layout compiles"));
static WIDE: LazyLock<Regex> =
    LazyLock::new(|| compile(&WIDE_LAYOUT).expect("wide positional layout compiles"));

#[derive(Debug, Default, Clone, Copy)]
pub struct PositionalLedgerDecoder;

impl PositionalLedgerDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for PositionalLedgerDecoder {
    fn format(&self) -> SourceFormat {
        SourceFormat::PositionalLedger
    }

    fn decode(&self, line: &str, diagnostics: &mut Diagnostics) -> Option<CanonicalRecord> {
        if line.trim().is_empty() {
            return None;
        }

        let parsed = STRICT
            .captures(line)
            .and_then(|caps| address_record(&caps, line))
            .or_else(|| {
                let record = WIDE.captures(line).and_then(|caps| address_record(&caps, line));
                if record.is_some() {
                    tracing::trace!("postal code resolved by widened layout");
                }
                record
            });
        if let Some(record) = parsed {
            return Some(CanonicalRecord::LedgerAddress(record));
        }

        let prefix = split_prefix(line)?;
        diagnostics.record(MismatchReason::PositionalFallback, line);
        Some(CanonicalRecord::Fallback(FallbackRecord {
            identifier: prefix.identifier.to_string(),
            raw_line: line.to_string(),
            display_text: prefix.remainder.to_string(),
        }))
    }
}

fn address_record(caps: &Captures<'_>, line: &str) -> Option<LedgerAddressRecord> {
    let street = caps.name("street")?.as_str().trim();
    let house_number: u32 = caps.name("house_number")?.as_str().parse().ok()?;

    Some(LedgerAddressRecord {
        identifier: caps.name("identifier")?.as_str().to_string(),
        street: street.to_string(),
        house_number,
        postal_code: caps.name("postal_code")?.as_str().to_string(),
        locality: caps.name("locality")?.as_str().trim().to_string(),
        raw_line: line.to_string(),
        display_text: format!("{street} {house_number}"),
    })
}
