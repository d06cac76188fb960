//! Resolved descriptors consumed by the synthesizer.
//!
//! Every flag here is a plain `bool`: defaults have already been applied.

use crate::declaration::qualify;
use crate::{DeclaredType, Location, MemberKind};

/// Hook flags for one release path after defaults are applied.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct CallbackConfig {
    pub generate_managed_callback: bool,
    pub generate_unmanaged_callback: bool,
}

/// Cascade flags for one member after defaults are applied.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct CascadeConfig {
    pub ignore: bool,
    pub suppress_nulling: bool,
}

/// What the synthesizer needs to know about an annotated type.
///
/// `sync_config` is `Some` iff the type supports synchronous release, and
/// likewise for `async_config`. At least one is `Some` by the time a
/// descriptor reaches the synthesizer.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TypeDescriptor {
    pub name: String,
    pub namespace: String,
    pub is_sealed: bool,
    pub sync_config: Option<CallbackConfig>,
    pub async_config: Option<CallbackConfig>,
}

impl TypeDescriptor {
    #[inline]
    pub fn supports_sync(&self) -> bool {
        self.sync_config.is_some()
    }

    #[inline]
    pub fn supports_async(&self) -> bool {
        self.async_config.is_some()
    }

    /// Returns `true` if the type declares any release path at all.
    #[inline]
    pub fn is_releasable(&self) -> bool {
        self.supports_sync() || self.supports_async()
    }

    /// Whether any supported path asks for the unmanaged hook.
    pub fn wants_unmanaged_callback(&self) -> bool {
        [self.sync_config, self.async_config]
            .iter()
            .flatten()
            .any(|c| c.generate_unmanaged_callback)
    }

    pub fn qualified_name(&self) -> String {
        qualify(&self.namespace, &self.name)
    }
}

/// An owned member that takes part in cascade release.
///
/// Only built for members whose type supports at least one release path.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ResourceDescriptor {
    pub name: String,
    pub kind: MemberKind,
    pub location: Location,
    pub declared_type: DeclaredType,
    pub supports_sync: bool,
    pub supports_async: bool,
    pub suppress_nulling: bool,
    pub requires_unmanaged: bool,
}

impl ResourceDescriptor {
    #[inline]
    pub fn is_property(&self) -> bool {
        self.kind == MemberKind::Property
    }
}
