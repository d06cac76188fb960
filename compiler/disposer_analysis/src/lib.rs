//! Release-pattern analysis for the Disposer generator.
//!
//! This crate is the decision engine. It runs three phases per type:
//!
//! ```text
//! TypeDeclaration
//!        ↓
//!   config::resolve_type        (annotation flags → TypeDescriptor)
//!   inventory::build_inventory  (members → ordered ResourceDescriptors, or CascadeErrors)
//!        ↓
//!   synthesize::synthesize      (→ GenerationDecision)
//! ```
//!
//! [`replay`] executes a decision against counting stub resources so the
//! behavior of the generated code (ordering, idempotence, clearing) can be
//! checked without compiling it.
//!
//! Nothing here performs I/O or keeps state between types.

pub mod config;
mod decision;
pub mod inventory;
pub mod replay;
pub mod synthesize;

pub use config::{resolve_callbacks, resolve_cascade, resolve_type};
pub use decision::{
    FinalizerPlan, GenerationDecision, MemberRef, PathKind, ReleaseCall, ReleasePlan,
    ReleaseStep, ResourceRelease,
};
pub use inventory::{build_inventory, CascadeError};
pub use synthesize::synthesize;

#[cfg(test)]
pub(crate) mod test_helpers;
