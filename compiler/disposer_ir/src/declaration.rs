//! Raw declarations handed over by the symbol resolver.
//!
//! These mirror what the user wrote: annotation flags stay `Option<bool>`
//! until `disposer_analysis::config` overlays the defaults.

use std::fmt;

use crate::{DeclaredType, Location};

/// Whether a member is a field or a property.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MemberKind {
    Field,
    Property,
}

impl MemberKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MemberKind::Field => "field",
            MemberKind::Property => "property",
        }
    }
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flags from one class-level release annotation, as written.
///
/// A type carries one of these per declared release path; the two are
/// resolved from their own declaration sites.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawCallbackConfig {
    /// Emit and call a hook at the end of managed release.
    pub generate_managed_callback: Option<bool>,
    /// Emit and call a hook at the end of unmanaged release.
    pub generate_unmanaged_callback: Option<bool>,
}

/// Flags from a member's cascade annotation, as written.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawCascadeConfig {
    /// Exclude the member from cascade release.
    pub ignore: Option<bool>,
    /// Keep the reference after release instead of clearing it.
    pub suppress_nulling: Option<bool>,
}

/// A field or property of an annotated type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemberDeclaration {
    pub name: String,
    pub kind: MemberKind,
    pub location: Location,
    pub declared_type: DeclaredType,
    /// `None` when the member carries no cascade annotation.
    pub cascade: Option<RawCascadeConfig>,
}

impl MemberDeclaration {
    /// A field annotated for cascade release with default flags.
    pub fn cascade_field(name: impl Into<String>, declared_type: DeclaredType) -> Self {
        MemberDeclaration {
            name: name.into(),
            kind: MemberKind::Field,
            location: Location::DUMMY,
            declared_type,
            cascade: Some(RawCascadeConfig::default()),
        }
    }

    /// A property annotated for cascade release with default flags.
    pub fn cascade_property(name: impl Into<String>, declared_type: DeclaredType) -> Self {
        MemberDeclaration {
            kind: MemberKind::Property,
            ..Self::cascade_field(name, declared_type)
        }
    }

    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    #[must_use]
    pub fn with_cascade(mut self, cascade: Option<RawCascadeConfig>) -> Self {
        self.cascade = cascade;
        self
    }
}

/// An annotated type with its members in source-declaration order.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeDeclaration {
    pub name: String,
    /// Containing namespace; empty for the global namespace.
    pub namespace: String,
    pub is_sealed: bool,
    pub location: Location,
    /// Present iff the type declares synchronous release.
    pub sync_config: Option<RawCallbackConfig>,
    /// Present iff the type declares asynchronous release.
    pub async_config: Option<RawCallbackConfig>,
    pub members: Vec<MemberDeclaration>,
}

impl TypeDeclaration {
    /// An unsealed type with no release annotations and no members.
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        TypeDeclaration {
            name: name.into(),
            namespace: namespace.into(),
            is_sealed: false,
            location: Location::DUMMY,
            sync_config: None,
            async_config: None,
            members: Vec::new(),
        }
    }

    #[must_use]
    pub fn sealed(mut self, is_sealed: bool) -> Self {
        self.is_sealed = is_sealed;
        self
    }

    #[must_use]
    pub fn with_sync(mut self, config: RawCallbackConfig) -> Self {
        self.sync_config = Some(config);
        self
    }

    #[must_use]
    pub fn with_async(mut self, config: RawCallbackConfig) -> Self {
        self.async_config = Some(config);
        self
    }

    #[must_use]
    pub fn with_member(mut self, member: MemberDeclaration) -> Self {
        self.members.push(member);
        self
    }

    /// Fully qualified name (`Namespace.Name`, or `Name` when global).
    pub fn qualified_name(&self) -> String {
        qualify(&self.namespace, &self.name)
    }
}

/// Join a namespace and a type name.
pub fn qualify(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}.{name}")
    }
}
