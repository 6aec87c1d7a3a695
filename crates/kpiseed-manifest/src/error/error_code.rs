//! Error codes for the kpiseed diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Manifest input errors
//! - `E1xx` - Structural errors
//! - `E2xx` - Reference errors
//! - `E3xx` - Ordering errors

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Input Errors (E0xx)
    // =========================================================================
    /// Invalid manifest.
    ///
    /// The manifest is not valid TOML, or does not match the expected
    /// `[[object]]` / `[[relationship]]` layout.
    E001,

    // =========================================================================
    // Structural Errors (E1xx)
    // =========================================================================
    /// Blank object alias.
    E100,

    /// Blank class name.
    E101,

    /// Blank attribute name.
    E102,

    /// Blank relationship endpoint.
    ///
    /// A relationship has an empty `source` or `target`.
    E103,

    // =========================================================================
    // Reference Errors (E2xx)
    // =========================================================================
    /// Duplicate alias.
    ///
    /// Two objects share the same alias, so references to it are ambiguous.
    E200,

    /// Unresolved reference.
    ///
    /// A relationship names an alias that no object declares.
    E201,

    /// Duplicate attribute.
    ///
    /// An object assigns the same attribute twice while duplicates are
    /// configured to be rejected.
    E202,

    // =========================================================================
    // Ordering Errors (E3xx)
    // =========================================================================
    /// Dependency cycle.
    ///
    /// The relationships form a cycle, so no materialization order exists.
    E300,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E300 => "E300",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "invalid manifest",
            ErrorCode::E100 => "blank alias",
            ErrorCode::E101 => "blank class name",
            ErrorCode::E102 => "blank attribute name",
            ErrorCode::E103 => "blank relationship endpoint",
            ErrorCode::E200 => "duplicate alias",
            ErrorCode::E201 => "unresolved reference",
            ErrorCode::E202 => "duplicate attribute",
            ErrorCode::E300 => "dependency cycle",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
