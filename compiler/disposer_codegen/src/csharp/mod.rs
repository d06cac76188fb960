//! C# rendering of a generation decision.
//!
//! Emits one partial class implementing the dispose pattern:
//!
//! ```text
//! partial class T : IDisposable, IAsyncDisposable
//!     _disposed flag          (shared by every path and the finalizer)
//!     hook declarations       (partial methods the user implements)
//!     Dispose() / Dispose(bool)
//!     DisposeAsync() / DisposeAsyncCore()
//!     ~T()
//! ```
//!
//! All type names are `global::`-qualified so the unit compiles regardless
//! of the user's `using` directives.

mod release;

use disposer_analysis::{FinalizerPlan, GenerationDecision, PathKind, ReleasePlan};

use crate::context::CodegenContext;
use crate::CodegenConfig;

use release::{emit_clears, emit_release, hook_call, plan_awaits};

const IDISPOSABLE: &str = "global::System.IDisposable";
const IASYNC_DISPOSABLE: &str = "global::System.IAsyncDisposable";
const VALUE_TASK: &str = "global::System.Threading.Tasks.ValueTask";
const SUPPRESS_FINALIZE: &str = "global::System.GC.SuppressFinalize(this);";
const DISPOSED_FLAG: &str = "_disposed";

/// Name of the user-implemented hook for a path and phase.
pub(crate) fn hook_name(kind: PathKind, managed: bool) -> &'static str {
    match (kind, managed) {
        (PathKind::Sync, true) => "DisposeManaged",
        (PathKind::Sync, false) => "DisposeUnmanaged",
        (PathKind::Async, true) => "DisposeManagedAsync",
        (PathKind::Async, false) => "DisposeUnmanagedAsync",
    }
}

/// Render the complete source text of one unit.
pub(crate) fn render(decision: &GenerationDecision, config: &CodegenConfig) -> String {
    let mut ctx = CodegenContext::new();

    if config.auto_generated_header {
        ctx.writeln("// <auto-generated/>");
    }
    if config.nullable_context {
        ctx.writeln("#nullable enable");
    }
    if config.auto_generated_header || config.nullable_context {
        ctx.newline();
    }
    if !decision.namespace.is_empty() {
        ctx.writeln(&format!("namespace {};", decision.namespace));
        ctx.newline();
    }

    emit_class(&mut ctx, decision);
    ctx.take_output()
}

fn emit_class(ctx: &mut CodegenContext, decision: &GenerationDecision) {
    let modifiers = if decision.is_sealed {
        "sealed partial class"
    } else {
        "partial class"
    };
    let mut interfaces = Vec::with_capacity(2);
    if decision.sync_path.is_some() {
        interfaces.push(IDISPOSABLE);
    }
    if decision.async_path.is_some() {
        interfaces.push(IASYNC_DISPOSABLE);
    }

    ctx.writeln(&format!(
        "{modifiers} {} : {}",
        decision.name,
        interfaces.join(", ")
    ));
    ctx.open_block();
    ctx.writeln(&format!("private bool {DISPOSED_FLAG};"));

    for plan in [&decision.sync_path, &decision.async_path].into_iter().flatten() {
        emit_hook_declarations(ctx, plan);
    }

    let finalizer = decision.finalizer.is_some();
    if let Some(plan) = &decision.sync_path {
        ctx.newline();
        emit_sync_entry(ctx, finalizer);
        ctx.newline();
        emit_sync_core(ctx, decision.is_sealed, plan);
    }
    if let Some(plan) = &decision.async_path {
        ctx.newline();
        emit_async_entry(ctx, finalizer);
        ctx.newline();
        emit_async_core(ctx, decision.is_sealed, plan);
    }
    if let Some(plan) = &decision.finalizer {
        ctx.newline();
        emit_finalizer(ctx, &decision.name, plan);
    }

    ctx.close_block();
}

fn emit_hook_declarations(ctx: &mut CodegenContext, plan: &ReleasePlan) {
    let wanted = [(true, plan.managed_hook), (false, plan.unmanaged_hook)];
    for (managed, enabled) in wanted {
        if !enabled {
            continue;
        }
        let name = hook_name(plan.kind, managed);
        ctx.newline();
        match plan.kind {
            PathKind::Sync => ctx.writeln(&format!("partial void {name}();")),
            PathKind::Async => ctx.writeln(&format!("private partial {VALUE_TASK} {name}();")),
        }
    }
}

/// Write the already-released guard and set the flag.
fn emit_guard(ctx: &mut CodegenContext, early_return: &str) {
    ctx.writeln(&format!("if ({DISPOSED_FLAG})"));
    ctx.open_block();
    ctx.writeln(early_return);
    ctx.close_block();
    ctx.writeln(&format!("{DISPOSED_FLAG} = true;"));
}

fn emit_sync_entry(ctx: &mut CodegenContext, finalizer: bool) {
    ctx.writeln("public void Dispose()");
    ctx.open_block();
    ctx.writeln("Dispose(disposing: true);");
    if finalizer {
        ctx.writeln(SUPPRESS_FINALIZE);
    }
    ctx.close_block();
}

fn emit_sync_core(ctx: &mut CodegenContext, is_sealed: bool, plan: &ReleasePlan) {
    let access = if is_sealed {
        "private"
    } else {
        "protected virtual"
    };
    ctx.writeln(&format!("{access} void Dispose(bool disposing)"));
    ctx.open_block();
    emit_guard(ctx, "return;");

    // Clears run after the unmanaged phase; they share the managed block
    // only when there is no unmanaged phase in between.
    let unmanaged_phase = plan.has_unmanaged_phase();
    let separate_clears = unmanaged_phase && !plan.clears.is_empty();
    let managed_block = !plan.releases.is_empty()
        || plan.managed_hook
        || (!separate_clears && !plan.clears.is_empty());

    if managed_block {
        ctx.newline();
        ctx.writeln("if (disposing)");
        ctx.open_block();
        for release in &plan.releases {
            emit_release(ctx, release);
        }
        if plan.managed_hook {
            ctx.writeln(&hook_call(PathKind::Sync, true));
        }
        if !separate_clears {
            emit_clears(ctx, plan);
        }
        ctx.close_block();
    }

    // Runs for `disposing: false` too, which is how the finalizer reaches it.
    if unmanaged_phase {
        ctx.newline();
        for release in &plan.unmanaged_releases {
            emit_release(ctx, release);
        }
        if plan.unmanaged_hook {
            ctx.writeln(&hook_call(PathKind::Sync, false));
        }
    }

    if separate_clears {
        ctx.newline();
        ctx.writeln("if (disposing)");
        ctx.open_block();
        emit_clears(ctx, plan);
        ctx.close_block();
    }
    ctx.close_block();
}

fn emit_async_entry(ctx: &mut CodegenContext, finalizer: bool) {
    ctx.writeln(&format!("public async {VALUE_TASK} DisposeAsync()"));
    ctx.open_block();
    ctx.writeln("await DisposeAsyncCore().ConfigureAwait(false);");
    if finalizer {
        ctx.writeln(SUPPRESS_FINALIZE);
    }
    ctx.close_block();
}

fn emit_async_core(ctx: &mut CodegenContext, is_sealed: bool, plan: &ReleasePlan) {
    let access = if is_sealed {
        "private"
    } else {
        "protected virtual"
    };
    // An `async` method without `await` draws a compiler warning, so the
    // core is only `async` when something is awaited.
    let awaits = plan_awaits(plan);
    let (modifier, early_return) = if awaits {
        ("async ", "return;")
    } else {
        ("", "return default;")
    };

    ctx.writeln(&format!(
        "{access} {modifier}{VALUE_TASK} DisposeAsyncCore()"
    ));
    ctx.open_block();
    emit_guard(ctx, early_return);

    if !plan.releases.is_empty() {
        ctx.newline();
        for release in &plan.releases {
            emit_release(ctx, release);
        }
    }
    if plan.managed_hook {
        ctx.newline();
        ctx.writeln(&hook_call(PathKind::Async, true));
    }
    if plan.has_unmanaged_phase() {
        ctx.newline();
        for release in &plan.unmanaged_releases {
            emit_release(ctx, release);
        }
        if plan.unmanaged_hook {
            ctx.writeln(&hook_call(PathKind::Async, false));
        }
    }
    if !plan.clears.is_empty() {
        ctx.newline();
        emit_clears(ctx, plan);
    }
    if !awaits {
        ctx.newline();
        ctx.writeln("return default;");
    }
    ctx.close_block();
}

/// The finalizer runs the unmanaged phase only. Replaying the synchronous
/// path goes through `Dispose(false)`; the asynchronous core cannot run on
/// the finalizer thread, so its unmanaged phase is written out here with
/// blocking calls.
fn emit_finalizer(ctx: &mut CodegenContext, type_name: &str, plan: &FinalizerPlan) {
    ctx.writeln(&format!("~{type_name}()"));
    ctx.open_block();
    match plan.replays {
        PathKind::Sync => ctx.writeln("Dispose(disposing: false);"),
        PathKind::Async => {
            emit_guard(ctx, "return;");
            for release in &plan.unmanaged_releases {
                emit_release(ctx, release);
            }
            if plan.unmanaged_hook {
                ctx.writeln(&format!(
                    "{}().AsTask().GetAwaiter().GetResult();",
                    hook_name(PathKind::Async, false)
                ));
            }
        }
    }
    ctx.close_block();
}
