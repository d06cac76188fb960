//! Result types for the batch driver.
//!
//! These are the interface between the driver and its host. They carry
//! everything needed to write files and report errors without exposing
//! analysis internals.

use disposer_codegen::OutputUnit;
use disposer_diagnostic::Diagnostic;

/// What happened to one type.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum TypeOutcome {
    /// A unit was generated.
    Generated(OutputUnit),
    /// The type declares no release path; nothing to do.
    Skipped,
    /// Validation failed; no unit for this type.
    Failed(Vec<Diagnostic>),
}

/// Result of generating a batch.
#[derive(Clone, Default, Debug)]
pub struct GenerationOutput {
    /// Units for successful types, in input order.
    pub units: Vec<OutputUnit>,
    /// Diagnostics for failed types, in input order.
    pub diagnostics: Vec<Diagnostic>,
}

impl GenerationOutput {
    pub(crate) fn from_outcomes(outcomes: impl IntoIterator<Item = TypeOutcome>) -> Self {
        let mut output = GenerationOutput::default();
        for outcome in outcomes {
            match outcome {
                TypeOutcome::Generated(unit) => output.units.push(unit),
                TypeOutcome::Skipped => {}
                TypeOutcome::Failed(diagnostics) => output.diagnostics.extend(diagnostics),
            }
        }
        output
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Look up a unit by name (`<TypeName>Disposable`).
    ///
    /// Names are only unique within a namespace; this returns the first match.
    pub fn unit(&self, name: &str) -> Option<&OutputUnit> {
        self.units.iter().find(|u| u.name == name)
    }
}
