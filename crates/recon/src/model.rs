use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostics;
use crate::source::{DecodeStats, DecodedSource};

// ---------------------------------------------------------------------------
// Source formats
// ---------------------------------------------------------------------------

/// Layout of a source extract. Selects the decoder applied to each line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFormat {
    /// Fixed-width tax "exploitation address" extract.
    PositionalLedger,
    /// Semicolon-separated labor registry extract.
    DelimitedRegistry,
    /// Payroll ledger with several record types per employer block.
    MultiRecordLedger,
    /// Any text whose lines start with an identifier.
    Generic,
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PositionalLedger => write!(f, "positional_ledger"),
            Self::DelimitedRegistry => write!(f, "delimited_registry"),
            Self::MultiRecordLedger => write!(f, "multi_record_ledger"),
            Self::Generic => write!(f, "generic"),
        }
    }
}

impl std::str::FromStr for SourceFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "positional_ledger" => Ok(Self::PositionalLedger),
            "delimited_registry" => Ok(Self::DelimitedRegistry),
            "multi_record_ledger" => Ok(Self::MultiRecordLedger),
            "generic" => Ok(Self::Generic),
            other => Err(format!(
                "unknown format '{other}' (expected positional_ledger, delimited_registry, multi_record_ledger or generic)"
            )),
        }
    }
}

/// Business category of a decoded record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordCategory {
    ExploitationAddress,
    Registry,
    Employer,
    Employee,
    Concept,
    Familiar,
    Fallback,
    Error,
}

// ---------------------------------------------------------------------------
// Positional ledger
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerAddressRecord {
    pub identifier: String,
    pub street: String,
    pub house_number: u32,
    /// 1 to 4 digits, kept as text.
    pub postal_code: String,
    pub locality: String,
    pub raw_line: String,
    pub display_text: String,
}

// ---------------------------------------------------------------------------
// Delimited registry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryRecord {
    pub identifier: String,
    pub legal_name: String,
    pub status: Option<String>,
    pub location: RegistryLocation,
    pub contact: RegistryContact,
    pub activity: RegistryActivity,
    pub metadata: RegistryMetadata,
    pub raw_line: String,
    pub display_text: String,
}

/// Street, registered locality and emails are lower-cased.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegistryLocation {
    pub street: Option<String>,
    pub house_number: Option<u32>,
    pub registered_locality: Option<String>,
    pub original_address_text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegistryContact {
    pub primary_email: Option<String>,
    pub secondary_email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegistryActivity {
    pub description: Option<String>,
    pub code: Option<String>,
    pub company_type: Option<String>,
    pub registration_date: Option<String>,
    pub employee_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegistryMetadata {
    pub registering_user: Option<String>,
}

// ---------------------------------------------------------------------------
// Payroll ledger
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayrollEmployerRecord {
    pub identifier: String,
    pub legal_name: String,
    pub location: PayrollLocation,
    pub display_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayrollLocation {
    pub street: String,
    pub house_number: u32,
    pub locality: String,
    pub postal_code: String,
    pub full_address_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayrollEmployeeRecord {
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayrollConceptRecord {
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayrollFamilyRecord {
    pub full_name: String,
}

// ---------------------------------------------------------------------------
// Degraded outcomes
// ---------------------------------------------------------------------------

/// Identifier recovered from the line prefix; the body did not match its layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FallbackRecord {
    pub identifier: String,
    pub raw_line: String,
    pub display_text: String,
}

/// A recognized record type whose layout did not match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnparsedError {
    pub source_record_type: String,
    pub raw_line: String,
}

// ---------------------------------------------------------------------------
// Canonical record
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CanonicalRecord {
    LedgerAddress(LedgerAddressRecord),
    Registry(RegistryRecord),
    PayrollEmployer(PayrollEmployerRecord),
    PayrollEmployee(PayrollEmployeeRecord),
    PayrollConcept(PayrollConceptRecord),
    PayrollFamily(PayrollFamilyRecord),
    Fallback(FallbackRecord),
    Unparsed(UnparsedError),
}

impl CanonicalRecord {
    /// Reconciliation key. `None` for records that do not take part in
    /// reconciliation (payroll detail lines and error records).
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Self::LedgerAddress(r) => Some(&r.identifier),
            Self::Registry(r) => Some(&r.identifier),
            Self::PayrollEmployer(r) => Some(&r.identifier),
            Self::Fallback(r) => Some(&r.identifier),
            Self::PayrollEmployee(_)
            | Self::PayrollConcept(_)
            | Self::PayrollFamily(_)
            | Self::Unparsed(_) => None,
        }
    }

    /// Human-readable one-liner for tables and exports.
    pub fn display_text(&self) -> &str {
        match self {
            Self::LedgerAddress(r) => &r.display_text,
            Self::Registry(r) => &r.display_text,
            Self::PayrollEmployer(r) => &r.display_text,
            Self::PayrollEmployee(r) => &r.full_name,
            Self::PayrollConcept(r) => &r.description,
            Self::PayrollFamily(r) => &r.full_name,
            Self::Fallback(r) => &r.display_text,
            Self::Unparsed(r) => &r.raw_line,
        }
    }

    /// Source line, for the record kinds that keep it.
    pub fn raw_line(&self) -> Option<&str> {
        match self {
            Self::LedgerAddress(r) => Some(&r.raw_line),
            Self::Registry(r) => Some(&r.raw_line),
            Self::Fallback(r) => Some(&r.raw_line),
            Self::Unparsed(r) => Some(&r.raw_line),
            Self::PayrollEmployer(_)
            | Self::PayrollEmployee(_)
            | Self::PayrollConcept(_)
            | Self::PayrollFamily(_) => None,
        }
    }

    pub fn category(&self) -> RecordCategory {
        match self {
            Self::LedgerAddress(_) => RecordCategory::ExploitationAddress,
            Self::Registry(_) => RecordCategory::Registry,
            Self::PayrollEmployer(_) => RecordCategory::Employer,
            Self::PayrollEmployee(_) => RecordCategory::Employee,
            Self::PayrollConcept(_) => RecordCategory::Concept,
            Self::PayrollFamily(_) => RecordCategory::Familiar,
            Self::Fallback(_) => RecordCategory::Fallback,
            Self::Unparsed(_) => RecordCategory::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Unparsed(_))
    }
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Decoded sources keyed by their config name.
#[derive(Debug, Default)]
pub struct ReconInput {
    pub sources: HashMap<String, DecodedSource>,
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ReconSummary {
    pub primary_records: usize,
    pub secondary_records: usize,
    pub primary_keyed: usize,
    pub secondary_keyed: usize,
    pub secondary_identifiers: usize,
    pub missing: usize,
}

/// Decode outcome of one source, without its records.
#[derive(Debug, Clone, Serialize)]
pub struct SourceReport {
    pub name: String,
    pub format: SourceFormat,
    pub records: usize,
    pub stats: DecodeStats,
    pub diagnostics: Diagnostics,
}

impl From<&DecodedSource> for SourceReport {
    fn from(source: &DecodedSource) -> Self {
        Self {
            name: source.name.clone(),
            format: source.format,
            records: source.records.len(),
            stats: source.stats,
            diagnostics: source.diagnostics.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconResult {
    pub meta: ReconMeta,
    pub summary: ReconSummary,
    pub sources: Vec<SourceReport>,
    /// Primary records absent from the secondary source, in primary order.
    pub missing: Vec<CanonicalRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub config_name: String,
    pub primary: String,
    pub secondary: String,
    pub engine_version: String,
    pub run_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fallback(id: &str) -> CanonicalRecord {
        CanonicalRecord::Fallback(FallbackRecord {
            identifier: id.into(),
            raw_line: format!("{id} SOMETHING"),
            display_text: "SOMETHING".into(),
        })
    }

    #[test]
    fn keyed_and_unkeyed_records() {
        assert_eq!(fallback("20100745683").identifier(), Some("20100745683"));

        let employee = CanonicalRecord::PayrollEmployee(PayrollEmployeeRecord {
            full_name: "VERA, MICAELA".into(),
        });
        assert_eq!(employee.identifier(), None);
        assert_eq!(employee.display_text(), "VERA, MICAELA");
        assert_eq!(employee.category(), RecordCategory::Employee);

        let unparsed = CanonicalRecord::Unparsed(UnparsedError {
            source_record_type: "01".into(),
            raw_line: "01 garbage".into(),
        });
        assert_eq!(unparsed.identifier(), None);
        assert!(unparsed.is_error());
        assert_eq!(unparsed.raw_line(), Some("01 garbage"));
    }

    #[test]
    fn format_from_str_accepts_kebab_case() {
        assert_eq!("positional-ledger".parse::<SourceFormat>(), Ok(SourceFormat::PositionalLedger));
        assert_eq!("DELIMITED_REGISTRY".parse::<SourceFormat>(), Ok(SourceFormat::DelimitedRegistry));
        assert!("xlsx".parse::<SourceFormat>().is_err());
    }

    #[test]
    fn format_display_round_trips() {
        for format in [
            SourceFormat::PositionalLedger,
            SourceFormat::DelimitedRegistry,
            SourceFormat::MultiRecordLedger,
            SourceFormat::Generic,
        ] {
            assert_eq!(format.to_string().parse::<SourceFormat>(), Ok(format));
        }
    }
}
