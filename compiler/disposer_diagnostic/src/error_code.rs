//! Error codes for all generator diagnostics.
//!
//! Codes are part of the public contract: hosts key suppression and
//! documentation lookups on the string form, so a code is never reused for
//! a different failure.

use std::fmt;

/// Error codes for all generator diagnostics.
///
/// Format: `DISPOSER-####`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// Member marked for cascade release whose type supports neither
    /// synchronous nor asynchronous release
    Disposer0001,
}

impl ErrorCode {
    /// All error code variants, for exhaustive testing.
    pub const ALL: &[ErrorCode] = &[ErrorCode::Disposer0001];

    /// The stable string form (e.g. `"DISPOSER-0001"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Disposer0001 => "DISPOSER-0001",
        }
    }

    /// Look up a code by its string form.
    pub fn parse(code: &str) -> Option<ErrorCode> {
        Self::ALL.iter().copied().find(|c| c.as_str() == code)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests;
