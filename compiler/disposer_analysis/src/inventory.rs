//! Cascade resource inventory.
//!
//! Walks a type's members in declaration order and keeps the ones annotated
//! for cascade release. Release order at generation time is exactly this
//! order, so nothing here may reorder members.
//!
//! A cascade member whose type supports neither release path is an error
//! for the whole type. Every such member is reported, not just the first.

use disposer_diagnostic::{Diagnostic, ErrorCode};
use disposer_ir::{Location, MemberDeclaration, MemberKind, ResourceDescriptor, TypeDeclaration};

use crate::config::resolve_cascade;

/// Validation failure while building a type's inventory.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CascadeError {
    /// A cascade member whose declared type cannot be released.
    #[error(
        "type `{declared_type}` of {kind} `{member}` supports neither synchronous nor asynchronous release"
    )]
    InvalidCascadeTarget {
        /// Qualified name of the enclosing type.
        owner: String,
        member: String,
        kind: MemberKind,
        declared_type: String,
        location: Location,
    },
}

impl CascadeError {
    /// Convert to a user-facing diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            CascadeError::InvalidCascadeTarget {
                owner,
                member,
                kind,
                declared_type,
                location,
            } => Diagnostic::error(ErrorCode::Disposer0001)
                .with_message(format!(
                    "Type `{declared_type}` of {kind} `{member}` must support synchronous or \
                     asynchronous release to be cascade-released"
                ))
                .with_label(location.clone(), "marked for cascade release here")
                .with_note(format!(
                    "no release implementation is generated for `{owner}`"
                ))
                .with_suggestion(format!(
                    "implement `IDisposable` or `IAsyncDisposable` on `{declared_type}`, \
                     or exclude the {kind} with `Ignore = true`"
                )),
        }
    }
}

/// Build the ordered cascade inventory for a type.
///
/// Returns every invalid member as an error when at least one fails the
/// capability check; the type must not be generated in that case.
pub fn build_inventory(decl: &TypeDeclaration) -> Result<Vec<ResourceDescriptor>, Vec<CascadeError>> {
    let mut resources = Vec::new();
    let mut errors = Vec::new();

    for member in &decl.members {
        let Some(raw) = member.cascade.as_ref() else {
            continue;
        };
        let config = resolve_cascade(Some(raw));
        if config.ignore {
            tracing::trace!(member = %member.name, "cascade member ignored");
            continue;
        }

        match describe_member(member, config.suppress_nulling) {
            Some(resource) => resources.push(resource),
            None => errors.push(CascadeError::InvalidCascadeTarget {
                owner: decl.qualified_name(),
                member: member.name.clone(),
                kind: member.kind,
                declared_type: member.declared_type.name.clone(),
                location: member.location.clone(),
            }),
        }
    }

    if errors.is_empty() {
        Ok(resources)
    } else {
        tracing::debug!(
            ty = %decl.qualified_name(),
            invalid = errors.len(),
            "cascade inventory rejected"
        );
        Err(errors)
    }
}

/// Describe a single member, or `None` if its type cannot be released.
fn describe_member(member: &MemberDeclaration, suppress_nulling: bool) -> Option<ResourceDescriptor> {
    let caps = member.declared_type.capabilities;
    if !caps.is_releasable() {
        return None;
    }
    Some(ResourceDescriptor {
        name: member.name.clone(),
        kind: member.kind,
        location: member.location.clone(),
        declared_type: member.declared_type.clone(),
        supports_sync: caps.supports_sync(),
        supports_async: caps.supports_async(),
        suppress_nulling,
        requires_unmanaged: caps.requires_unmanaged(),
    })
}

#[cfg(test)]
mod tests;
