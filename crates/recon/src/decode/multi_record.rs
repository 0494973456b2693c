//! Payroll ledger extracts.
//!
//! Each line starts with a 2-character record type. An employer block is a
//! `01` header followed by its `02` employee, `03` concept and `05` family
//! lines. Only `01` headers carry an identifier; the detail lines are decoded
//! for display and never take part in reconciliation.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::pattern::{anchor, compile, field, Segment};
use super::Decoder;
use crate::diagnostics::{Diagnostics, MismatchReason};
use crate::model::{
    CanonicalRecord, PayrollConceptRecord, PayrollEmployeeRecord, PayrollEmployerRecord,
    PayrollFamilyRecord, PayrollLocation, SourceFormat, UnparsedError,
};

pub const EMPLOYER: &str = "01";
pub const EMPLOYEE: &str = "02";
pub const CONCEPT: &str = "03";
pub const FAMILY_MEMBER: &str = "05";

pub const UNKNOWN_EMPLOYEE: &str = "unknown";
pub const UNKNOWN_FAMILY_MEMBER: &str = "unknown";
pub const UNKNOWN_CONCEPT: &str = "miscellaneous";

const EMPLOYER_LAYOUT: &[Segment] = &[
    anchor("01[0-9]*?"),
    field("identifier", "[0-9]{11}"),
    field("legal_name", r"[A-ZÑ\s.,&]+?"),
    // period, e.g. 202511M
    anchor(r"\s+20[0-9]{4}M.*?"),
    field("street", r"[A-Z0-9\s.]+?"),
    anchor(r"\s+"),
    field("house_number", "[0-9]{1,6}"),
    anchor(r"\s+"),
    // opens with a letter so a street ending in digits keeps them
    field("locality", r"[A-Z][A-Z\s]*?"),
    anchor(r"\s+"),
    field("postal_code", "[0-9]{4}"),
];

const EMPLOYEE_LAYOUT: &[Segment] = &[
    anchor("02[0-9]+?"),
    field("name", r"[A-ZÑ\s.,]+?"),
    anchor(r"\s+20[0-9]{6}"),
];

const CONCEPT_LAYOUT: &[Segment] = &[
    anchor(r"03[0-9]+\s+"),
    field("description", r"[A-Z0-9./\s-]+?"),
    anchor(r"\s+[0-9]"),
];

const FAMILY_LAYOUT: &[Segment] = &[
    anchor("05[0-9]+?"),
    field("name", r"[A-ZÑ\s.,]+?"),
    anchor(r"\s+20[0-9]{6}"),
];

static EMPLOYER_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(EMPLOYER_LAYOUT).expect("employer layout compiles"));
static EMPLOYEE_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(EMPLOYEE_LAYOUT).expect("employee layout compiles"));
static CONCEPT_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(CONCEPT_LAYOUT).expect("concept layout compiles"));
static FAMILY_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(FAMILY_LAYOUT).expect("family layout compiles"));

#[derive(Debug, Default, Clone)]
pub struct MultiRecordLedgerDecoder {
    province: Option<String>,
}

impl MultiRecordLedgerDecoder {
    /// `province` is appended to employer full addresses when set.
    pub fn new(province: Option<String>) -> Self {
        Self { province }
    }

    fn employer(&self, line: &str, diagnostics: &mut Diagnostics) -> CanonicalRecord {
        match EMPLOYER_RE
            .captures(line)
            .and_then(|caps| self.employer_record(&caps))
        {
            Some(record) => CanonicalRecord::PayrollEmployer(record),
            None => {
                diagnostics.record(MismatchReason::EmployerHeader, line);
                CanonicalRecord::Unparsed(UnparsedError {
                    source_record_type: EMPLOYER.to_string(),
                    raw_line: line.to_string(),
                })
            }
        }
    }

    fn employer_record(&self, caps: &Captures<'_>) -> Option<PayrollEmployerRecord> {
        let legal_name = caps.name("legal_name")?.as_str().trim();
        let street = strip_abbreviation(caps.name("street")?.as_str().trim());
        let number_text = caps.name("house_number")?.as_str();
        let house_number: u32 = number_text.parse().ok()?;
        let locality = caps.name("locality")?.as_str().trim();

        let mut full_address_text = format!("{street} {number_text}, {locality}");
        if let Some(province) = &self.province {
            full_address_text.push_str(", ");
            full_address_text.push_str(province);
        }

        Some(PayrollEmployerRecord {
            identifier: caps.name("identifier")?.as_str().to_string(),
            legal_name: legal_name.to_string(),
            location: PayrollLocation {
                street: street.to_string(),
                house_number,
                locality: locality.to_string(),
                postal_code: caps.name("postal_code")?.as_str().to_string(),
                full_address_text,
            },
            display_text: legal_name.to_string(),
        })
    }
}

impl Decoder for MultiRecordLedgerDecoder {
    fn format(&self) -> SourceFormat {
        SourceFormat::MultiRecordLedger
    }

    fn decode(&self, line: &str, diagnostics: &mut Diagnostics) -> Option<CanonicalRecord> {
        if line.trim().is_empty() {
            return None;
        }

        match line.get(..2)? {
            EMPLOYER => Some(self.employer(line, diagnostics)),
            EMPLOYEE => Some(CanonicalRecord::PayrollEmployee(PayrollEmployeeRecord {
                full_name: capture_or(&EMPLOYEE_RE, line, "name", UNKNOWN_EMPLOYEE),
            })),
            CONCEPT => Some(CanonicalRecord::PayrollConcept(PayrollConceptRecord {
                description: capture_or(&CONCEPT_RE, line, "description", UNKNOWN_CONCEPT),
            })),
            FAMILY_MEMBER => Some(CanonicalRecord::PayrollFamily(PayrollFamilyRecord {
                full_name: capture_or(&FAMILY_RE, line, "name", UNKNOWN_FAMILY_MEMBER),
            })),
            _ => None,
        }
    }
}

/// Trimmed named capture, or `default` when the line does not match.
fn capture_or(re: &Regex, line: &str, name: &str, default: &str) -> String {
    re.captures(line)
        .and_then(|caps| caps.name(name).map(|m| m.as_str().trim().to_string()))
        .unwrap_or_else(|| default.to_string())
}

/// Keep only the text after the first period: `"DR. CETTOUR"` -> `"CETTOUR"`,
/// `"12. SAN MARTIN"` -> `"SAN MARTIN"`.
fn strip_abbreviation(street: &str) -> &str {
    match street.split_once('.') {
        Some((_, rest)) => rest.trim(),
        None => street,
    }
}
