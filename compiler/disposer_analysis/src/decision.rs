//! The synthesizer's output: what to emit for one type.
//!
//! A [`GenerationDecision`] is declarative. It says which release methods
//! exist, which members each one releases and how, and which hooks it
//! calls. `disposer_codegen` decides the concrete text.

use std::fmt;

use smallvec::SmallVec;

use disposer_ir::{qualify, MemberKind};

/// Which release path a plan belongs to.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum PathKind {
    Sync,
    Async,
}

impl fmt::Display for PathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathKind::Sync => write!(f, "sync"),
            PathKind::Async => write!(f, "async"),
        }
    }
}

/// How a single owned resource is released on a given path.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ReleaseCall {
    /// Synchronous release on the synchronous path.
    Sync,
    /// Awaited asynchronous release on the asynchronous path.
    Async,
    /// Synchronous path, resource only releases asynchronously: block on it.
    BlockOnAsync,
    /// Asynchronous path, resource only releases synchronously.
    SyncFromAsync,
}

/// A member reference as it appears in generated code.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct MemberRef {
    pub name: String,
    pub kind: MemberKind,
}

/// One owned resource released by a plan.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ResourceRelease {
    pub member: MemberRef,
    pub call: ReleaseCall,
}

/// One step of a release path, in execution order.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ReleaseStep<'a> {
    Release(&'a ResourceRelease),
    ManagedHook,
    UnmanagedHook,
    Clear(&'a MemberRef),
}

/// The body of one release path.
///
/// Phases run in field order: `releases`, the managed hook,
/// `unmanaged_releases`, the unmanaged hook, then `clears`. The whole body
/// is guarded by the shared "already released" flag, which is set before
/// the first release.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ReleasePlan {
    pub kind: PathKind,
    /// Owned resources without unmanaged state, in declaration order.
    pub releases: SmallVec<[ResourceRelease; 4]>,
    /// Call the user's managed-cleanup hook after the releases.
    pub managed_hook: bool,
    /// Owned resources wrapping unmanaged state, in declaration order.
    /// These also run when the finalizer replays this path.
    pub unmanaged_releases: SmallVec<[ResourceRelease; 4]>,
    /// Call the user's unmanaged-cleanup hook.
    pub unmanaged_hook: bool,
    /// Members whose reference is cleared after release.
    pub clears: SmallVec<[MemberRef; 4]>,
}

impl ReleasePlan {
    /// Flatten the plan into its ordered steps.
    pub fn steps(&self) -> Vec<ReleaseStep<'_>> {
        let mut steps: Vec<ReleaseStep<'_>> =
            self.releases.iter().map(ReleaseStep::Release).collect();
        if self.managed_hook {
            steps.push(ReleaseStep::ManagedHook);
        }
        steps.extend(self.unmanaged_releases.iter().map(ReleaseStep::Release));
        if self.unmanaged_hook {
            steps.push(ReleaseStep::UnmanagedHook);
        }
        steps.extend(self.clears.iter().map(ReleaseStep::Clear));
        steps
    }

    /// Whether the path has work outside the managed phase.
    pub fn has_unmanaged_phase(&self) -> bool {
        self.unmanaged_hook || !self.unmanaged_releases.is_empty()
    }
}

/// The last-resort reclaim routine run by the garbage collector.
///
/// It runs only the unmanaged phase: managed members may already have been
/// collected, so it never releases them and never clears references.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FinalizerPlan {
    /// The path whose unmanaged phase the finalizer replays.
    pub replays: PathKind,
    /// Resources wrapping unmanaged state. Finalizers cannot await, so
    /// every call here is synchronous (`Sync` or `BlockOnAsync`).
    pub unmanaged_releases: SmallVec<[ResourceRelease; 4]>,
    /// Whether the replayed phase calls the unmanaged hook.
    pub unmanaged_hook: bool,
}

/// Everything the emitter needs for one type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct GenerationDecision {
    pub name: String,
    pub namespace: String,
    pub is_sealed: bool,
    pub finalizer: Option<FinalizerPlan>,
    pub sync_path: Option<ReleasePlan>,
    pub async_path: Option<ReleasePlan>,
}

impl GenerationDecision {
    /// Name of the output unit for this type (`<TypeName>Disposable`).
    pub fn unit_name(&self) -> String {
        format!("{}Disposable", self.name)
    }

    pub fn qualified_name(&self) -> String {
        qualify(&self.namespace, &self.name)
    }

    /// The plan for `kind`, if that path is generated.
    pub fn path(&self, kind: PathKind) -> Option<&ReleasePlan> {
        match kind {
            PathKind::Sync => self.sync_path.as_ref(),
            PathKind::Async => self.async_path.as_ref(),
        }
    }

    pub fn has_finalizer(&self) -> bool {
        self.finalizer.is_some()
    }
}
