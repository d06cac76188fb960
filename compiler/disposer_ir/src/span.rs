//! Source locations for declarations.
//!
//! The generator never reads source text itself; locations are carried
//! through from the resolver so diagnostics can point back at the member
//! that caused them.

use std::fmt;

/// Byte range inside a source file.
///
/// Layout: 8 bytes, `start` inclusive and `end` exclusive.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Dummy span for synthetic declarations.
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    /// Create a new span.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Where a declaration lives: file path, byte span, and the 1-based
/// line/column of the span start as computed by the resolver.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub file: String,
    pub span: Span,
    pub line: u32,
    pub column: u32,
}

impl Location {
    /// Location for declarations with no source (tests, synthetic input).
    pub const DUMMY: Location = Location {
        file: String::new(),
        span: Span::DUMMY,
        line: 0,
        column: 0,
    };

    /// Create a location.
    pub fn new(file: impl Into<String>, span: Span, line: u32, column: u32) -> Self {
        Location {
            file: file.into(),
            span,
            line,
            column,
        }
    }

    /// Whether this location points at real source.
    pub fn is_known(&self) -> bool {
        !self.file.is_empty() && self.line > 0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_known() {
            write!(f, "{}:{}:{}", self.file, self.line, self.column)
        } else {
            write!(f, "<unknown>")
        }
    }
}
