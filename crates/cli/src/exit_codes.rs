//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain           | Description                              |
//! |---------|------------------|------------------------------------------|
//! | 0       | Universal        | Success                                  |
//! | 1       | Universal        | General error (unspecified)              |
//! | 2       | Universal        | CLI usage error (bad args, missing file) |
//! | 60-69   | xref             | Cross-reference job codes                |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into `xref_exit_code` or the relevant command

use xref_recon::XrefError;

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
/// clap exits with this code on its own parse failures.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Cross-reference (60-69)
// =============================================================================

/// Job config could not be parsed or failed validation.
pub const EXIT_XREF_INVALID_CONFIG: u8 = 60;

/// An input source could not be read, or a record was rejected under
/// `on_invalid = "abort"`.
pub const EXIT_XREF_INPUT: u8 = 61;

/// Worker pool or output failure during the run.
pub const EXIT_XREF_RUNTIME: u8 = 62;

/// Map an engine error to its exit code.
pub fn xref_exit_code(err: &XrefError) -> u8 {
    match err {
        XrefError::ConfigParse(_) | XrefError::ConfigValidation(_) => EXIT_XREF_INVALID_CONFIG,
        XrefError::Line { .. }
        | XrefError::MissingRequiredField { .. }
        | XrefError::TypeCoercion { .. }
        | XrefError::Decode(_)
        | XrefError::DuplicateId { .. } => EXIT_XREF_INPUT,
        XrefError::Execution(_) | XrefError::Io(_) => EXIT_XREF_RUNTIME,
    }
}
