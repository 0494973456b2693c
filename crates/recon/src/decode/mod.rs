//! Line decoders, one per source format.
//!
//! A decoder turns one line into at most one [`CanonicalRecord`]. It never
//! fails: lines it cannot use are dropped (`None`), degraded to a fallback or
//! unparsed record, and reported through [`Diagnostics`].

mod delimited;
mod fallback;
mod multi_record;
mod pattern;
mod positional;

pub use delimited::DelimitedRegistryDecoder;
pub use fallback::FallbackDecoder;
pub use multi_record::{
    MultiRecordLedgerDecoder, UNKNOWN_CONCEPT, UNKNOWN_EMPLOYEE, UNKNOWN_FAMILY_MEMBER,
};
pub use positional::PositionalLedgerDecoder;

use crate::diagnostics::Diagnostics;
use crate::model::{CanonicalRecord, SourceFormat};

pub trait Decoder: Send + Sync {
    fn format(&self) -> SourceFormat;

    /// Decode a single line. `line` has no line terminator.
    fn decode(&self, line: &str, diagnostics: &mut Diagnostics) -> Option<CanonicalRecord>;
}

/// Per-source decoder settings.
#[derive(Debug, Clone, Default)]
pub struct DecoderOptions {
    /// Province appended to payroll employer addresses.
    pub province: Option<String>,
}

pub fn decoder_for(format: SourceFormat, options: &DecoderOptions) -> Box<dyn Decoder> {
    match format {
        SourceFormat::PositionalLedger => Box::new(PositionalLedgerDecoder::new()),
        SourceFormat::DelimitedRegistry => Box::new(DelimitedRegistryDecoder::new()),
        SourceFormat::MultiRecordLedger => {
            Box::new(MultiRecordLedgerDecoder::new(options.province.clone()))
        }
        SourceFormat::Generic => Box::new(FallbackDecoder::new()),
    }
}
