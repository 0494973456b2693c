//! `padron-recon`: Employer registry decoders and cross-reference engine.
//!
//! Pure engine crate: receives source text, returns decoded records and the
//! employers of one registry that are absent from another. No CLI or file IO.

pub mod config;
pub mod decode;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod identifier;
pub mod model;
pub mod reconcile;
pub mod source;

pub use config::ReconConfig;
pub use decode::{decoder_for, Decoder, DecoderOptions};
pub use diagnostics::{Diagnostics, MismatchReason};
pub use engine::run;
pub use error::ReconError;
pub use model::{CanonicalRecord, ReconInput, ReconResult, SourceFormat};
pub use reconcile::reconcile;
pub use source::{decode_source, DecodeStats, DecodedSource};
