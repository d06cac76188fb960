//! JSON Emitter
//!
//! Machine-readable diagnostic output: one JSON array, one object per
//! diagnostic. Locations are emitted as a single object
//! (`{"file", "line", "column", "span": [start, end]}`) or `null` for
//! synthetic declarations, so tooling can jump straight to the member.

use std::io::Write;

use disposer_ir::Location;

use crate::Diagnostic;

use super::{escape_json, trailing_comma, DiagnosticEmitter};

/// JSON emitter for machine-readable output.
pub struct JsonEmitter<W: Write> {
    writer: W,
    first: bool,
}

impl<W: Write> JsonEmitter<W> {
    /// Create a new JSON emitter.
    pub fn new(writer: W) -> Self {
        JsonEmitter {
            writer,
            first: true,
        }
    }

    /// Begin the JSON array output.
    pub fn begin(&mut self) {
        let _ = writeln!(self.writer, "[");
    }

    /// End the JSON array output.
    pub fn end(&mut self) {
        let _ = writeln!(self.writer, "\n]");
    }

    fn write_strings(&mut self, key: &str, items: &[String], last: bool) {
        let quoted: Vec<String> = items
            .iter()
            .map(|item| format!("\"{}\"", escape_json(item)))
            .collect();
        let comma = if last { "" } else { "," };
        let _ = writeln!(self.writer, "    \"{key}\": [{}]{comma}", quoted.join(", "));
    }
}

/// A location as an inline JSON object, or `null` when unknown.
fn location_json(location: Option<&Location>) -> String {
    match location.filter(|l| l.is_known()) {
        Some(loc) => format!(
            "{{\"file\": \"{}\", \"line\": {}, \"column\": {}, \"span\": [{}, {}]}}",
            escape_json(&loc.file),
            loc.line,
            loc.column,
            loc.span.start,
            loc.span.end
        ),
        None => "null".to_string(),
    }
}

impl<W: Write> DiagnosticEmitter for JsonEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        if !self.first {
            let _ = writeln!(self.writer, ",");
        }
        self.first = false;

        let _ = writeln!(self.writer, "  {{");
        let _ = writeln!(self.writer, "    \"code\": \"{}\",", diagnostic.code);
        let _ = writeln!(
            self.writer,
            "    \"message\": \"{}\",",
            escape_json(&diagnostic.message)
        );
        let _ = writeln!(
            self.writer,
            "    \"location\": {},",
            location_json(diagnostic.primary_location())
        );

        let _ = writeln!(self.writer, "    \"labels\": [");
        for (i, label) in diagnostic.labels.iter().enumerate() {
            let _ = writeln!(
                self.writer,
                "      {{\"location\": {}, \"message\": \"{}\"}}{}",
                location_json(Some(&label.location)),
                escape_json(&label.message),
                trailing_comma(i, diagnostic.labels.len())
            );
        }
        let _ = writeln!(self.writer, "    ],");

        self.write_strings("notes", &diagnostic.notes, false);
        self.write_strings("suggestions", &diagnostic.suggestions, true);

        let _ = write!(self.writer, "  }}");
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, _error_count: usize) {
        // The array is the whole payload; the count is its length.
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
