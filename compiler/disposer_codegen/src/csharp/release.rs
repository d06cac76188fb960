//! Statements for individual release steps.

use disposer_analysis::{PathKind, ReleaseCall, ReleasePlan, ResourceRelease};

use crate::context::CodegenContext;

use super::hook_name;

/// Whether the asynchronous body of `plan` awaits anything.
pub(super) fn plan_awaits(plan: &ReleasePlan) -> bool {
    plan.managed_hook
        || plan.unmanaged_hook
        || plan
            .releases
            .iter()
            .chain(&plan.unmanaged_releases)
            .any(|r| r.call == ReleaseCall::Async)
}

/// The statement invoking a hook on the given path.
pub(super) fn hook_call(kind: PathKind, managed: bool) -> String {
    let name = hook_name(kind, managed);
    match kind {
        PathKind::Sync => format!("{name}();"),
        PathKind::Async => format!("await {name}().ConfigureAwait(false);"),
    }
}

/// Release one member. Members may be null, so every call is guarded.
pub(super) fn emit_release(ctx: &mut CodegenContext, release: &ResourceRelease) {
    let member = &release.member.name;
    match release.call {
        ReleaseCall::Sync | ReleaseCall::SyncFromAsync => {
            ctx.writeln(&format!("{member}?.Dispose();"));
        }
        ReleaseCall::BlockOnAsync => {
            ctx.writeln(&format!(
                "{member}?.DisposeAsync().AsTask().GetAwaiter().GetResult();"
            ));
        }
        ReleaseCall::Async => {
            ctx.writeln(&format!("if ({member} is not null)"));
            ctx.open_block();
            ctx.writeln(&format!(
                "await {member}.DisposeAsync().ConfigureAwait(false);"
            ));
            ctx.close_block();
        }
    }
}

/// Clear every member whose reference is dropped after release.
pub(super) fn emit_clears(ctx: &mut CodegenContext, plan: &ReleasePlan) {
    for member in &plan.clears {
        ctx.writeln(&format!("{} = null!;", member.name));
    }
}
