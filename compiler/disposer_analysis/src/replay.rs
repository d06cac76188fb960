//! Replay of a [`GenerationDecision`] against counting stub resources.
//!
//! The emitted code is plain text for another toolchain, so its observable
//! behavior is checked here instead: an [`Instance`] models one object of
//! the generated type, with one slot per owned resource. Running a path
//! follows the same rules the emitter renders (already-released guard,
//! null-conditional release, phases in order) and records every effect.
//! A stub can be made re-entrant: releasing it calls back into the owner's
//! release path, as a resource holding a reference to its owner would.

use disposer_ir::MemberKind;

use crate::decision::{
    GenerationDecision, MemberRef, PathKind, ReleaseCall, ReleaseStep, ResourceRelease,
};

/// An observable effect of running a release path.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ReplayEvent {
    Released { member: String, call: ReleaseCall },
    ManagedHook(PathKind),
    UnmanagedHook(PathKind),
    Cleared(String),
    /// A re-entrant stub called the owner's release path again.
    Reentered(PathKind),
}

/// Failure to replay a path.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ReplayError {
    #[error("the {0} release path was not generated for this type")]
    PathNotGenerated(PathKind),
}

#[derive(Clone, Debug)]
struct Slot {
    member: MemberRef,
    /// Whether the owning member still references the resource.
    present: bool,
    release_count: u32,
    /// Releasing this stub calls back into the owner.
    reenters: bool,
}

/// One live object of the generated type.
#[derive(Clone, Debug)]
pub struct Instance<'d> {
    decision: &'d GenerationDecision,
    disposed: bool,
    finalizer_suppressed: bool,
    slots: Vec<Slot>,
    events: Vec<ReplayEvent>,
}

impl<'d> Instance<'d> {
    /// A fresh object whose resource members are all populated.
    pub fn new(decision: &'d GenerationDecision) -> Self {
        let mut slots: Vec<Slot> = Vec::new();
        let plans = [decision.sync_path.as_ref(), decision.async_path.as_ref()];
        let releases = plans
            .into_iter()
            .flatten()
            .flat_map(|p| p.releases.iter().chain(&p.unmanaged_releases));
        for release in releases {
            if !slots.iter().any(|s| s.member == release.member) {
                slots.push(Slot {
                    member: release.member.clone(),
                    present: true,
                    release_count: 0,
                    reenters: false,
                });
            }
        }
        Instance {
            decision,
            disposed: false,
            finalizer_suppressed: false,
            slots,
            events: Vec::new(),
        }
    }

    /// Mark a member as never assigned (a null reference).
    #[must_use]
    pub fn with_unset(mut self, member: &str) -> Self {
        if let Some(slot) = self.slot_mut(member) {
            slot.present = false;
        }
        self
    }

    /// Make the stub behind `member` call the owner's release path again
    /// from inside its own release.
    #[must_use]
    pub fn with_reentrant(mut self, member: &str) -> Self {
        if let Some(slot) = self.slot_mut(member) {
            slot.reenters = true;
        }
        self
    }

    /// Run the synchronous path (`Dispose()`).
    pub fn dispose(&mut self) -> Result<(), ReplayError> {
        self.run(PathKind::Sync)
    }

    /// Run the asynchronous path (`DisposeAsync()`) to completion.
    pub fn dispose_async(&mut self) -> Result<(), ReplayError> {
        self.run(PathKind::Async)
    }

    /// Run the finalizer as the garbage collector would.
    ///
    /// Only the unmanaged phase runs: unmanaged releases, then the hook.
    /// Returns `false` when there is no finalizer or a completed release
    /// path suppressed it.
    pub fn finalize(&mut self) -> bool {
        let decision = self.decision;
        let Some(finalizer) = decision.finalizer.as_ref() else {
            return false;
        };
        if self.finalizer_suppressed {
            return false;
        }
        if !self.disposed {
            self.disposed = true;
            for release in &finalizer.unmanaged_releases {
                // The call back returns at the already-released guard.
                if self.release(release) {
                    self.events.push(ReplayEvent::Reentered(finalizer.replays));
                }
            }
            if finalizer.unmanaged_hook {
                self.events
                    .push(ReplayEvent::UnmanagedHook(finalizer.replays));
            }
        }
        true
    }

    fn run(&mut self, kind: PathKind) -> Result<(), ReplayError> {
        let decision = self.decision;
        let plan = decision
            .path(kind)
            .ok_or(ReplayError::PathNotGenerated(kind))?;

        if !self.disposed {
            self.disposed = true;
            for step in plan.steps() {
                self.apply(kind, step)?;
            }
        }
        if decision.has_finalizer() {
            self.finalizer_suppressed = true;
        }
        Ok(())
    }

    fn apply(&mut self, kind: PathKind, step: ReleaseStep<'_>) -> Result<(), ReplayError> {
        match step {
            ReleaseStep::Release(release) => {
                if self.release(release) {
                    self.events.push(ReplayEvent::Reentered(kind));
                    self.run(kind)?;
                }
            }
            ReleaseStep::ManagedHook => self.events.push(ReplayEvent::ManagedHook(kind)),
            ReleaseStep::UnmanagedHook => self.events.push(ReplayEvent::UnmanagedHook(kind)),
            ReleaseStep::Clear(member) => {
                if let Some(slot) = self.slot_mut(&member.name) {
                    slot.present = false;
                }
                self.events.push(ReplayEvent::Cleared(member.name.clone()));
            }
        }
        Ok(())
    }

    /// Release one stub if the member still references it. Returns whether
    /// the stub calls back into the owner.
    fn release(&mut self, release: &ResourceRelease) -> bool {
        let Some(slot) = self.slot_mut(&release.member.name) else {
            return false;
        };
        if !slot.present {
            return false;
        }
        slot.release_count += 1;
        let reenters = slot.reenters;
        self.events.push(ReplayEvent::Released {
            member: release.member.name.clone(),
            call: release.call,
        });
        reenters
    }

    fn slot_mut(&mut self, member: &str) -> Option<&mut Slot> {
        self.slots.iter_mut().find(|s| s.member.name == member)
    }

    fn slot(&self, member: &str) -> Option<&Slot> {
        self.slots.iter().find(|s| s.member.name == member)
    }

    /// Every effect recorded so far, in order.
    pub fn events(&self) -> &[ReplayEvent] {
        &self.events
    }

    /// How many times the stub behind `member` has been released.
    pub fn release_count(&self, member: &str) -> u32 {
        self.slot(member).map_or(0, |s| s.release_count)
    }

    /// Whether `member` still references its resource.
    pub fn is_present(&self, member: &str) -> bool {
        self.slot(member).is_some_and(|s| s.present)
    }

    /// The member's kind, if it is an owned resource.
    pub fn member_kind(&self, member: &str) -> Option<MemberKind> {
        self.slot(member).map(|s| s.member.kind)
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}
