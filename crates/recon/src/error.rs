use thiserror::Error;

/// Failures of configuration and run orchestration.
///
/// Line decoding never fails: malformed lines become fallback records,
/// error records or are dropped.
#[derive(Debug, Error)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// Config validation error (empty name, missing source, bad cross reference).
    #[error("config validation error: {0}")]
    ConfigValidation(String),

    /// A source referenced by the cross section was not loaded.
    #[error("unknown source: {0}")]
    UnknownSource(String),
}
