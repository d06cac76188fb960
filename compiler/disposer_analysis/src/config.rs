//! Annotation flag resolution.
//!
//! Every flag defaults to `false`; an explicitly written value wins. The
//! synchronous and asynchronous configurations come from different
//! annotations on the type and are resolved independently.

use disposer_ir::{
    CallbackConfig, CascadeConfig, RawCallbackConfig, RawCascadeConfig, TypeDeclaration,
    TypeDescriptor,
};

/// Overlay one release annotation's flags onto the defaults.
///
/// An absent annotation resolves to all defaults; this never fails.
pub fn resolve_callbacks(raw: Option<&RawCallbackConfig>) -> CallbackConfig {
    let Some(raw) = raw else {
        return CallbackConfig::default();
    };
    CallbackConfig {
        generate_managed_callback: raw.generate_managed_callback.unwrap_or(false),
        generate_unmanaged_callback: raw.generate_unmanaged_callback.unwrap_or(false),
    }
}

/// Overlay a member's cascade annotation flags onto the defaults.
pub fn resolve_cascade(raw: Option<&RawCascadeConfig>) -> CascadeConfig {
    let Some(raw) = raw else {
        return CascadeConfig::default();
    };
    CascadeConfig {
        ignore: raw.ignore.unwrap_or(false),
        suppress_nulling: raw.suppress_nulling.unwrap_or(false),
    }
}

/// Build the type-level descriptor from a declaration.
///
/// A path is supported iff its annotation is present, and each path's
/// hook flags come only from that path's annotation.
pub fn resolve_type(decl: &TypeDeclaration) -> TypeDescriptor {
    TypeDescriptor {
        name: decl.name.clone(),
        namespace: decl.namespace.clone(),
        is_sealed: decl.is_sealed,
        sync_config: decl
            .sync_config
            .as_ref()
            .map(|raw| resolve_callbacks(Some(raw))),
        async_config: decl
            .async_config
            .as_ref()
            .map(|raw| resolve_callbacks(Some(raw))),
    }
}
