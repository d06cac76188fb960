//! C# emission backend for the Disposer generator.
//!
//! Turns a [`GenerationDecision`] into one named [`OutputUnit`]. This crate
//! makes no decisions of its own: every choice about paths, ordering, hooks
//! and finalizers has already been made by `disposer_analysis`.

pub mod context;
mod csharp;

use disposer_analysis::GenerationDecision;

pub use context::CodegenContext;

/// Emitter options.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct CodegenConfig {
    /// Start each unit with `// <auto-generated/>`.
    pub auto_generated_header: bool,
    /// Emit `#nullable enable` so the `null!` clears compile cleanly.
    pub nullable_context: bool,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        CodegenConfig {
            auto_generated_header: true,
            nullable_context: true,
        }
    }
}

/// One generated source file.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct OutputUnit {
    /// `<TypeName>Disposable`.
    pub name: String,
    /// File name handed to the host, unique across namespaces.
    pub hint_name: String,
    pub text: String,
}

/// Render the output unit for one decision.
pub fn emit_unit(decision: &GenerationDecision, config: &CodegenConfig) -> OutputUnit {
    let name = decision.unit_name();
    let hint_name = if decision.namespace.is_empty() {
        format!("{name}.g.cs")
    } else {
        format!("{}.{name}.g.cs", decision.namespace)
    };
    let text = csharp::render(decision, config);

    tracing::debug!(
        unit = %hint_name,
        bytes = text.len(),
        "emitted output unit"
    );

    OutputUnit {
        name,
        hint_name,
        text,
    }
}
