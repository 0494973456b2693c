//! Fiscal identifier extraction.
//!
//! Every source keys its employers by the same 11-digit fiscal identifier.
//! The positional and generic formats carry it as a line prefix, which makes
//! the prefix check the last-resort decode strategy for any line.

/// Length of a fiscal identifier in characters.
pub const IDENTIFIER_LEN: usize = 11;

/// An identifier found at the start of a line, plus the rest of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentifierPrefix<'a> {
    pub identifier: &'a str,
    /// Remainder of the line after the identifier, trimmed.
    pub remainder: &'a str,
}

/// True when `value` is exactly 11 ASCII digits.
pub fn is_identifier(value: &str) -> bool {
    value.len() == IDENTIFIER_LEN && value.bytes().all(|b| b.is_ascii_digit())
}

/// Split a line into its identifier prefix and display remainder.
///
/// Returns `None` when the first 11 characters are not all decimal digits.
pub fn split_prefix(line: &str) -> Option<IdentifierPrefix<'_>> {
    let head = line.as_bytes().get(..IDENTIFIER_LEN)?;
    if !head.iter().all(u8::is_ascii_digit) {
        return None;
    }
    // 11 ASCII bytes, so the split point is a char boundary.
    let (identifier, rest) = line.split_at(IDENTIFIER_LEN);
    Some(IdentifierPrefix {
        identifier,
        remainder: rest.trim(),
    })
}
