//! Per-type pipeline and batch driver:
//! resolve → inventory → synthesize → emit.
//!
//! Types are independent, so a failure in one never affects another, and
//! the batch can run on the rayon pool without coordination.

use rayon::prelude::*;

use disposer_analysis::{build_inventory, resolve_type, synthesize, CascadeError};
use disposer_codegen::{emit_unit, CodegenConfig};
use disposer_ir::TypeDeclaration;

use crate::cache::OutputCache;
use crate::cancel::{CancellationToken, Cancelled};
use crate::output::{GenerationOutput, TypeOutcome};

/// Configuration for a batch run.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct GenerateConfig {
    /// Process types on the rayon pool. Output order is the same either way.
    pub parallel: bool,
    pub codegen: CodegenConfig,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            codegen: CodegenConfig::default(),
        }
    }
}

/// Run the full pipeline on one type.
pub fn generate_type(decl: &TypeDeclaration, codegen: &CodegenConfig) -> TypeOutcome {
    let span = tracing::debug_span!("generate_type", ty = %decl.qualified_name());
    let _enter = span.enter();

    let descriptor = resolve_type(decl);
    if !descriptor.is_releasable() {
        tracing::debug!("type declares no release path, skipped");
        return TypeOutcome::Skipped;
    }

    let resources = match build_inventory(decl) {
        Ok(resources) => resources,
        Err(errors) => {
            tracing::debug!(errors = errors.len(), "invalid cascade targets, no unit generated");
            return TypeOutcome::Failed(errors.iter().map(CascadeError::to_diagnostic).collect());
        }
    };

    let decision = synthesize(&descriptor, &resources);
    TypeOutcome::Generated(emit_unit(&decision, codegen))
}

/// Generate every type in `batch`.
///
/// Units and diagnostics come back in input order. `token` is checked
/// before each type starts; once it is set the whole batch returns
/// `Err(Cancelled)` and no partial output.
pub fn generate(
    batch: &[TypeDeclaration],
    config: &GenerateConfig,
    token: &CancellationToken,
) -> Result<GenerationOutput, Cancelled> {
    run_batch(batch, config, token, |decl| generate_type(decl, &config.codegen))
}

/// Like [`generate`], reusing outcomes from `cache` for unchanged types.
pub fn generate_cached(
    batch: &[TypeDeclaration],
    config: &GenerateConfig,
    token: &CancellationToken,
    cache: &OutputCache,
) -> Result<GenerationOutput, Cancelled> {
    run_batch(batch, config, token, |decl| {
        cache.get_or_generate(decl, &config.codegen)
    })
}

fn run_batch<F>(
    batch: &[TypeDeclaration],
    config: &GenerateConfig,
    token: &CancellationToken,
    run: F,
) -> Result<GenerationOutput, Cancelled>
where
    F: Fn(&TypeDeclaration) -> TypeOutcome + Sync,
{
    let step = |decl: &TypeDeclaration| -> Result<TypeOutcome, Cancelled> {
        token.check()?;
        Ok(run(decl))
    };

    let outcomes: Vec<TypeOutcome> = if config.parallel {
        batch.par_iter().map(step).collect::<Result<_, _>>()?
    } else {
        batch.iter().map(step).collect::<Result<_, _>>()?
    };

    let output = GenerationOutput::from_outcomes(outcomes);
    tracing::debug!(
        types = batch.len(),
        units = output.units.len(),
        diagnostics = output.diagnostics.len(),
        parallel = config.parallel,
        "batch complete"
    );
    Ok(output)
}
