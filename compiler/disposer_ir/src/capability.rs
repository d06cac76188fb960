//! Release capabilities of a declared type.
//!
//! The resolver answers "does this type support release path X" once, when
//! it builds the declaration, and records the answer here. The generator
//! never walks type hierarchies itself.

use bitflags::bitflags;

bitflags! {
    /// What a declared type can do when its owner releases it.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Capability: u8 {
        /// Implements synchronous release (`IDisposable`).
        const SYNC = 1 << 0;
        /// Implements asynchronous release (`IAsyncDisposable`).
        const ASYNC = 1 << 1;
        /// Wraps unmanaged state that must be reclaimed even if explicit
        /// release never happens.
        const UNMANAGED = 1 << 2;
    }
}

impl Capability {
    /// Returns `true` if the type can be released through either path.
    #[inline]
    pub fn is_releasable(self) -> bool {
        self.intersects(Capability::SYNC | Capability::ASYNC)
    }

    #[inline]
    pub fn supports_sync(self) -> bool {
        self.contains(Capability::SYNC)
    }

    #[inline]
    pub fn supports_async(self) -> bool {
        self.contains(Capability::ASYNC)
    }

    #[inline]
    pub fn requires_unmanaged(self) -> bool {
        self.contains(Capability::UNMANAGED)
    }
}

/// A member's declared type as seen by the resolver.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeclaredType {
    /// Display name used in diagnostics (e.g. `System.IO.Stream`).
    pub name: String,
    pub capabilities: Capability,
}

impl DeclaredType {
    pub fn new(name: impl Into<String>, capabilities: Capability) -> Self {
        DeclaredType {
            name: name.into(),
            capabilities,
        }
    }
}
