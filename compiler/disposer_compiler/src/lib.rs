//! Portable Disposer driver.
//!
//! Runs a batch of annotated type declarations through the whole pipeline
//! and collects the generated units and diagnostics. IO-free: the host
//! discovers declarations and writes the resulting files.
//!
//! # Usage
//!
//! ```ignore
//! use disposer_compiler::{generate, CancellationToken, GenerateConfig};
//!
//! let output = generate(&batch, &GenerateConfig::default(), &CancellationToken::new())?;
//! for unit in &output.units {
//!     host.add_source(&unit.hint_name, &unit.text);
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! disposer_ir, disposer_diagnostic, disposer_analysis, disposer_codegen
//!                              ↓
//!                      disposer_compiler  ← this crate
//!                              ↓
//!                    host (source generator, tests)
//! ```

mod cache;
mod cancel;
mod output;
mod pipeline;

use std::sync::Once;

use disposer_diagnostic::emitter::{DiagnosticEmitter, JsonEmitter, TextEmitter};
use disposer_diagnostic::Diagnostic;

pub use cache::{fingerprint, OutputCache};
pub use cancel::{CancellationToken, Cancelled};
pub use disposer_codegen::{CodegenConfig, OutputUnit};
pub use output::{GenerationOutput, TypeOutcome};
pub use pipeline::{generate, generate_cached, generate_type, GenerateConfig};

/// Output format for [`render_diagnostics`].
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum DiagnosticFormat {
    #[default]
    Text,
    Json,
}

/// Render diagnostics to a string, followed by a summary line in text mode.
pub fn render_diagnostics(diagnostics: &[Diagnostic], format: DiagnosticFormat) -> String {
    let mut buf = Vec::new();
    match format {
        DiagnosticFormat::Text => {
            let mut emitter = TextEmitter::new(&mut buf);
            emitter.emit_all(diagnostics);
            emitter.emit_summary(diagnostics.len());
            emitter.flush();
        }
        DiagnosticFormat::Json => {
            let mut emitter = JsonEmitter::new(&mut buf);
            emitter.begin();
            emitter.emit_all(diagnostics);
            emitter.end();
            emitter.flush();
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debugging.
///
/// Set `RUST_LOG=disposer_analysis=debug` (or similar) to see the
/// per-type decisions as an indented tree. Does nothing when `RUST_LOG`
/// is unset, and only ever installs one subscriber.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};
        use tracing_tree::HierarchicalLayer;

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let _ = tracing_subscriber::registry()
                .with(HierarchicalLayer::new(2).with_targets(true))
                .with(filter)
                .try_init();
        }
    });
}
