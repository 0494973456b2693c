//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain    | Description                                   |
//! |---------|-----------|-----------------------------------------------|
//! | 0       | Universal | Success, nothing missing                      |
//! | 1       | cross     | Employers missing from the secondary registry |
//! | 2       | Universal | CLI usage error (bad args)                    |
//! | 3       | Universal | I/O error (unreadable input, unwritable output) |
//! | 60-69   | recon     | Config-driven reconciliation                  |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

// =============================================================================
// Universal (0-3)
// =============================================================================

/// Success - command completed and nothing is missing.
pub const EXIT_SUCCESS: u8 = 0;

/// Usage error - bad arguments, unknown format.
pub const EXIT_USAGE: u8 = 2;

/// I/O error - input file unreadable or output not writable.
pub const EXIT_IO: u8 = 3;

// =============================================================================
// Cross-reference
// =============================================================================

/// Primary employers are missing from the secondary registry.
/// Like `diff(1)`, exit 1 means "sources differ."
pub const EXIT_MISSING_FOUND: u8 = 1;

// =============================================================================
// Recon (60-69)
// =============================================================================

/// Recon config failed to parse or validate.
pub const EXIT_RECON_INVALID_CONFIG: u8 = 60;

/// Recon run failed (source file unreadable, source without data).
pub const EXIT_RECON_RUNTIME: u8 = 61;
