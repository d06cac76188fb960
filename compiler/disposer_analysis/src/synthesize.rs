//! Dispose pattern synthesis.
//!
//! Given a resolved [`TypeDescriptor`] and its validated inventory, decide
//! which release methods to generate and what each one does:
//!
//! - The synchronous path exists iff the type supports synchronous release;
//!   the asynchronous path iff it supports asynchronous release.
//! - Each path releases every owned resource in declaration order, choosing
//!   the resource's native call for that path and adapting across paths
//!   when the resource only offers the other one. Resources wrapping
//!   unmanaged state move to the unmanaged phase.
//! - Hooks follow the flags of the path's own annotation.
//! - A finalizer exists iff the type is unsealed and unmanaged cleanup is
//!   relevant to it.
//!
//! Synthesis cannot fail: inventory validation has already run.

use smallvec::SmallVec;

use disposer_ir::{CallbackConfig, ResourceDescriptor, TypeDescriptor};

use crate::decision::{
    FinalizerPlan, GenerationDecision, MemberRef, PathKind, ReleaseCall, ReleasePlan,
    ResourceRelease,
};

/// Compute the generation decision for one type.
pub fn synthesize(ty: &TypeDescriptor, resources: &[ResourceDescriptor]) -> GenerationDecision {
    debug_assert!(
        ty.is_releasable(),
        "types without a release path are filtered before synthesis"
    );

    let sync_path = ty
        .sync_config
        .map(|config| plan_path(PathKind::Sync, config, resources));
    let async_path = ty
        .async_config
        .map(|config| plan_path(PathKind::Async, config, resources));
    let finalizer = plan_finalizer(ty, resources);

    tracing::debug!(
        ty = %ty.qualified_name(),
        resources = resources.len(),
        sync_path = sync_path.is_some(),
        async_path = async_path.is_some(),
        finalizer = finalizer.is_some(),
        "synthesized release plan"
    );

    GenerationDecision {
        name: ty.name.clone(),
        namespace: ty.namespace.clone(),
        is_sealed: ty.is_sealed,
        finalizer,
        sync_path,
        async_path,
    }
}

fn plan_path(
    kind: PathKind,
    config: CallbackConfig,
    resources: &[ResourceDescriptor],
) -> ReleasePlan {
    let releases = resources
        .iter()
        .filter(|r| !r.requires_unmanaged)
        .map(|r| resource_release(kind, r))
        .collect();
    let clears = resources
        .iter()
        .filter(|r| !r.suppress_nulling)
        .map(member_ref)
        .collect();

    ReleasePlan {
        kind,
        releases,
        managed_hook: config.generate_managed_callback,
        unmanaged_releases: unmanaged_releases(kind, resources),
        unmanaged_hook: config.generate_unmanaged_callback,
        clears,
    }
}

/// Resources wrapping unmanaged state are released in the unmanaged phase,
/// which the finalizer also runs.
fn unmanaged_releases(
    kind: PathKind,
    resources: &[ResourceDescriptor],
) -> SmallVec<[ResourceRelease; 4]> {
    resources
        .iter()
        .filter(|r| r.requires_unmanaged)
        .map(|r| resource_release(kind, r))
        .collect()
}

fn resource_release(kind: PathKind, resource: &ResourceDescriptor) -> ResourceRelease {
    ResourceRelease {
        member: member_ref(resource),
        call: release_call(kind, resource),
    }
}

/// Pick the call for `resource` on a `kind` path.
///
/// Inventory guarantees at least one capability, so the fallback is always
/// the other path.
fn release_call(kind: PathKind, resource: &ResourceDescriptor) -> ReleaseCall {
    match kind {
        PathKind::Sync if resource.supports_sync => ReleaseCall::Sync,
        PathKind::Sync => ReleaseCall::BlockOnAsync,
        PathKind::Async if resource.supports_async => ReleaseCall::Async,
        PathKind::Async => ReleaseCall::SyncFromAsync,
    }
}

fn member_ref(resource: &ResourceDescriptor) -> MemberRef {
    MemberRef {
        name: resource.name.clone(),
        kind: resource.kind,
    }
}

/// Sealed types never get a finalizer. Unsealed types get one when any
/// unmanaged hook is requested or an owned resource wraps unmanaged state.
fn plan_finalizer(ty: &TypeDescriptor, resources: &[ResourceDescriptor]) -> Option<FinalizerPlan> {
    if ty.is_sealed {
        return None;
    }
    let relevant =
        ty.wants_unmanaged_callback() || resources.iter().any(|r| r.requires_unmanaged);
    if !relevant {
        return None;
    }

    // Prefer the path that actually asks for the unmanaged hook.
    let (replays, config) = match (ty.sync_config, ty.async_config) {
        (Some(sync), _) if sync.generate_unmanaged_callback => (PathKind::Sync, sync),
        (_, Some(asy)) if asy.generate_unmanaged_callback => (PathKind::Async, asy),
        (Some(sync), _) => (PathKind::Sync, sync),
        (None, Some(asy)) => (PathKind::Async, asy),
        (None, None) => return None,
    };
    Some(FinalizerPlan {
        replays,
        // The finalizer thread cannot await.
        unmanaged_releases: unmanaged_releases(PathKind::Sync, resources),
        unmanaged_hook: config.generate_unmanaged_callback,
    })
}
