//! Text Emitter
//!
//! Plain, uncolored output in the `file:line:col: error[CODE]: message`
//! shape that build hosts and editors pick up from a log.

use std::io::Write;

use crate::Diagnostic;

use super::DiagnosticEmitter;

fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Plain-text emitter.
pub struct TextEmitter<W: Write> {
    writer: W,
}

impl<W: Write> TextEmitter<W> {
    pub fn new(writer: W) -> Self {
        TextEmitter { writer }
    }
}

impl<W: Write> DiagnosticEmitter for TextEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        if let Some(loc) = diagnostic.primary_location().filter(|l| l.is_known()) {
            let _ = write!(self.writer, "{loc}: ");
        }
        let _ = writeln!(
            self.writer,
            "error[{}]: {}",
            diagnostic.code, diagnostic.message
        );

        for label in &diagnostic.labels {
            let _ = writeln!(self.writer, "  --> {}: {}", label.location, label.message);
        }
        for note in &diagnostic.notes {
            let _ = writeln!(self.writer, "  = note: {note}");
        }
        for suggestion in &diagnostic.suggestions {
            let _ = writeln!(self.writer, "  = help: {suggestion}");
        }
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize) {
        if error_count > 0 {
            let _ = writeln!(
                self.writer,
                "error: generation skipped due to {error_count} error{}",
                plural_s(error_count)
            );
        }
    }
}
