//! Declarations and descriptors for the Disposer generator.
//!
//! Two layers live here:
//!
//! - **Declarations** ([`TypeDeclaration`], [`MemberDeclaration`]) are the
//!   resolver's view of the user's source: names, locations, capability
//!   flags of each member's declared type, and annotation flags exactly as
//!   written (`Option<bool>`).
//! - **Descriptors** ([`TypeDescriptor`], [`ResourceDescriptor`]) are the
//!   resolved form the synthesizer works on, with defaults applied and
//!   non-participating members filtered out.
//!
//! Nothing in this crate performs analysis; it only defines the shapes.

mod capability;
mod declaration;
mod descriptor;
mod span;

pub use capability::{Capability, DeclaredType};
pub use declaration::{
    qualify, MemberDeclaration, MemberKind, RawCallbackConfig, RawCascadeConfig, TypeDeclaration,
};
pub use descriptor::{CallbackConfig, CascadeConfig, ResourceDescriptor, TypeDescriptor};
pub use span::{Location, Span};
