//! Semicolon-separated labor registry extracts.
//!
//! Column order:
//!
//! | col | field               | col | field                |
//! |-----|---------------------|-----|----------------------|
//! | 0   | registration date   | 7   | free-text address    |
//! | 1   | legal name          | 8   | activity description |
//! | 2   | primary email       | 9   | activity code        |
//! | 3   | secondary email     | 10  | company type         |
//! | 4   | employee count      | 11  | registering user     |
//! | 5   | identifier          | 12  | status (optional)    |
//! | 6   | registered locality |     |                      |

use super::Decoder;
use crate::diagnostics::{Diagnostics, MismatchReason};
use crate::identifier::is_identifier;
use crate::model::{
    CanonicalRecord, RegistryActivity, RegistryContact, RegistryLocation, RegistryMetadata,
    RegistryRecord, SourceFormat,
};

pub const DELIMITER: char = ';';
pub const MIN_COLUMNS: usize = 12;

mod col {
    pub const REGISTRATION_DATE: usize = 0;
    pub const LEGAL_NAME: usize = 1;
    pub const PRIMARY_EMAIL: usize = 2;
    pub const SECONDARY_EMAIL: usize = 3;
    pub const EMPLOYEE_COUNT: usize = 4;
    pub const IDENTIFIER: usize = 5;
    pub const LOCALITY: usize = 6;
    pub const ADDRESS: usize = 7;
    pub const ACTIVITY: usize = 8;
    pub const ACTIVITY_CODE: usize = 9;
    pub const COMPANY_TYPE: usize = 10;
    pub const REGISTERING_USER: usize = 11;
    pub const STATUS: usize = 12;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DelimitedRegistryDecoder;

impl DelimitedRegistryDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for DelimitedRegistryDecoder {
    fn format(&self) -> SourceFormat {
        SourceFormat::DelimitedRegistry
    }

    fn decode(&self, line: &str, diagnostics: &mut Diagnostics) -> Option<CanonicalRecord> {
        if line.trim().is_empty() || !line.contains(DELIMITER) {
            return None;
        }

        let cols: Vec<&str> = line.split(DELIMITER).collect();
        if cols.len() < MIN_COLUMNS {
            diagnostics.record(MismatchReason::InsufficientColumns, line);
            return None;
        }

        let identifier = cols[col::IDENTIFIER].trim();
        if !is_identifier(identifier) {
            diagnostics.record(MismatchReason::InvalidIdentifier, line);
            return None;
        }

        let address = value(&cols, col::ADDRESS);
        let (street, house_number) = match address {
            Some(text) => split_house_number(text),
            None => (None, None),
        };
        let legal_name = value(&cols, col::LEGAL_NAME).unwrap_or_default().to_string();

        Some(CanonicalRecord::Registry(RegistryRecord {
            identifier: identifier.to_string(),
            display_text: legal_name.clone(),
            legal_name,
            status: owned(&cols, col::STATUS),
            location: RegistryLocation {
                street: street.map(str::to_lowercase),
                house_number,
                registered_locality: lowered(&cols, col::LOCALITY),
                original_address_text: address.map(str::to_string),
            },
            contact: RegistryContact {
                primary_email: lowered(&cols, col::PRIMARY_EMAIL),
                secondary_email: lowered(&cols, col::SECONDARY_EMAIL),
            },
            activity: RegistryActivity {
                description: owned(&cols, col::ACTIVITY),
                code: owned(&cols, col::ACTIVITY_CODE),
                company_type: owned(&cols, col::COMPANY_TYPE),
                registration_date: owned(&cols, col::REGISTRATION_DATE),
                employee_count: value(&cols, col::EMPLOYEE_COUNT)
                    .map(leading_count)
                    .unwrap_or(0),
            },
            metadata: RegistryMetadata {
                registering_user: owned(&cols, col::REGISTERING_USER),
            },
            raw_line: line.to_string(),
        }))
    }
}

/// Trimmed column value; missing and blank columns are `None`.
fn value<'a>(cols: &[&'a str], index: usize) -> Option<&'a str> {
    cols.get(index)
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
}

fn owned(cols: &[&str], index: usize) -> Option<String> {
    value(cols, index).map(str::to_string)
}

fn lowered(cols: &[&str], index: usize) -> Option<String> {
    value(cols, index).map(str::to_lowercase)
}

/// Split a trailing run of digits off a free-text address.
///
/// `"SAN MARTIN 1234"` gives `("SAN MARTIN", 1234)`. Without a trailing
/// number the whole text is the street. A bare number leaves no street.
/// Digit runs too long for `u32` saturate at `u32::MAX`.
fn split_house_number(address: &str) -> (Option<&str>, Option<u32>) {
    let street = address.trim_end_matches(|c: char| c.is_ascii_digit());
    if street.len() == address.len() {
        return (Some(address), None);
    }
    // only overflow can fail on a non-empty ASCII digit run
    let number = address[street.len()..].parse::<u32>().unwrap_or(u32::MAX);
    let street = street.trim();
    ((!street.is_empty()).then_some(street), Some(number))
}

/// Leading decimal digits of a count column, 0 when there are none.
fn leading_count(text: &str) -> u32 {
    let digits = text
        .find(|c: char| !c.is_ascii_digit())
        .map_or(text, |end| &text[..end]);
    digits.parse().unwrap_or(0)
}
