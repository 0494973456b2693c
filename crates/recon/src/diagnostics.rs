//! Bounded mismatch collector.
//!
//! Decoders report lines they could not fully parse here instead of logging
//! directly. Only the first `capacity` samples are kept (and logged); every
//! mismatch is still counted.

use std::collections::BTreeMap;

use serde::Serialize;

/// Default number of samples kept per source.
pub const DEFAULT_MAX_SAMPLES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchReason {
    /// Payroll `01` header did not match its layout.
    EmployerHeader,
    /// Positional line fell back to its identifier prefix.
    PositionalFallback,
    /// Delimited line had fewer columns than required.
    InsufficientColumns,
    /// Delimited identifier column is not an 11-digit identifier.
    InvalidIdentifier,
}

impl std::fmt::Display for MismatchReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmployerHeader => write!(f, "employer_header"),
            Self::PositionalFallback => write!(f, "positional_fallback"),
            Self::InsufficientColumns => write!(f, "insufficient_columns"),
            Self::InvalidIdentifier => write!(f, "invalid_identifier"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MismatchSample {
    pub reason: MismatchReason,
    /// 1-based line number, when the caller tracks lines.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_number: Option<usize>,
    pub raw_line: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Diagnostics {
    capacity: usize,
    #[serde(skip)]
    current_line: Option<usize>,
    samples: Vec<MismatchSample>,
    counts: BTreeMap<MismatchReason, usize>,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_SAMPLES)
    }
}

impl Diagnostics {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            current_line: None,
            samples: Vec::with_capacity(capacity.min(64)),
            counts: BTreeMap::new(),
        }
    }

    /// Set the line number attached to subsequent samples.
    pub fn at_line(&mut self, line_number: usize) {
        self.current_line = Some(line_number);
    }

    pub fn record(&mut self, reason: MismatchReason, raw_line: &str) {
        *self.counts.entry(reason).or_insert(0) += 1;

        if self.samples.len() < self.capacity {
            tracing::warn!(
                reason = %reason,
                line = self.current_line,
                "layout mismatch: {}",
                raw_line
            );
            self.samples.push(MismatchSample {
                reason,
                line_number: self.current_line,
                raw_line: raw_line.to_string(),
            });
            if self.samples.len() == self.capacity {
                tracing::debug!(capacity = self.capacity, "mismatch sample limit reached, suppressing further samples");
            }
        }
    }

    pub fn samples(&self) -> &[MismatchSample] {
        &self.samples
    }

    pub fn count(&self, reason: MismatchReason) -> usize {
        self.counts.get(&reason).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Mismatches counted but not kept as samples.
    pub fn suppressed(&self) -> usize {
        self.total() - self.samples.len()
    }
}
