use super::Decoder;
use crate::diagnostics::Diagnostics;
use crate::identifier::split_prefix;
use crate::model::{CanonicalRecord, FallbackRecord, SourceFormat};

/// Decoder for text with no known layout: any line starting with an
/// identifier becomes a fallback record, everything else is dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct FallbackDecoder;

impl FallbackDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for FallbackDecoder {
    fn format(&self) -> SourceFormat {
        SourceFormat::Generic
    }

    fn decode(&self, line: &str, _diagnostics: &mut Diagnostics) -> Option<CanonicalRecord> {
        if line.trim().is_empty() {
            return None;
        }
        let prefix = split_prefix(line)?;
        Some(CanonicalRecord::Fallback(FallbackRecord {
            identifier: prefix.identifier.to_string(),
            raw_line: line.to_string(),
            display_text: prefix.remainder.to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_lines_become_fallback_records() {
        let mut diag = Diagnostics::default();
        let record = FallbackDecoder::new()
            .decode("30712345678   EMPRESA EJEMPLO  ", &mut diag)
            .unwrap();
        assert_eq!(record.identifier(), Some("30712345678"));
        assert_eq!(record.display_text(), "EMPRESA EJEMPLO");
        assert_eq!(record.raw_line(), Some("30712345678   EMPRESA EJEMPLO  "));
        assert_eq!(diag.total(), 0);
    }

    #[test]
    fn other_lines_are_dropped() {
        let mut diag = Diagnostics::default();
        let decoder = FallbackDecoder::new();
        assert!(decoder.decode("CUIT;RAZON SOCIAL", &mut diag).is_none());
        assert!(decoder.decode("", &mut diag).is_none());
        assert!(decoder.decode("  \t", &mut diag).is_none());
    }
}
