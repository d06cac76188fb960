//! Code generation context and state.
//!
//! `CodegenContext` owns the output buffer and indentation for one unit.
//! Rendering is purely sequential, which is what makes two renderings of
//! the same decision byte-identical.

/// Code generation context.
pub struct CodegenContext {
    /// Current indentation level.
    indent: usize,
    /// Generated code output.
    output: String,
}

impl Default for CodegenContext {
    fn default() -> Self {
        Self::new()
    }
}

impl CodegenContext {
    /// Create a new codegen context.
    pub fn new() -> Self {
        Self {
            indent: 0,
            output: String::with_capacity(2048),
        }
    }

    /// Increase indentation level.
    pub fn indent(&mut self) {
        self.indent += 1;
    }

    /// Decrease indentation level.
    pub fn dedent(&mut self) {
        debug_assert!(self.indent > 0, "dedent called with zero indent");
        self.indent = self.indent.saturating_sub(1);
    }

    /// Write indentation to output.
    pub fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.output.push_str("    ");
        }
    }

    /// Write a line to output (with indentation and newline).
    pub fn writeln(&mut self, s: &str) {
        self.write_indent();
        self.output.push_str(s);
        self.output.push('\n');
    }

    /// Write a newline.
    pub fn newline(&mut self) {
        self.output.push('\n');
    }

    /// Open a `{` block on its own line and indent.
    pub fn open_block(&mut self) {
        self.writeln("{");
        self.indent();
    }

    /// Dedent and close a block.
    pub fn close_block(&mut self) {
        self.dedent();
        self.writeln("}");
    }

    /// Take the generated output.
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}
