//! Memoized per-type outcomes.
//!
//! Hosts re-run generation on every edit, but most types are unchanged
//! between runs. The cache holds one entry per type (qualified name plus
//! emitter options) together with a content fingerprint of the declaration
//! it was generated from. An edited type replaces its entry, so the cache
//! stays as large as the set of live types. A fingerprint match is verified
//! against the stored declaration, so a collision costs a regeneration,
//! never a wrong unit.

use std::hash::{Hash, Hasher};

use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHasher};

use disposer_codegen::CodegenConfig;
use disposer_ir::TypeDeclaration;

use crate::output::TypeOutcome;
use crate::pipeline::generate_type;

/// Deterministic content fingerprint of a declaration.
pub fn fingerprint(decl: &TypeDeclaration) -> u64 {
    let mut hasher = FxHasher::default();
    decl.hash(&mut hasher);
    hasher.finish()
}

/// One slot per type and emitter configuration.
type CacheKey = (String, CodegenConfig);

struct Entry {
    fingerprint: u64,
    decl: TypeDeclaration,
    outcome: TypeOutcome,
}

/// Thread-safe outcome cache, shareable across batches.
#[derive(Default)]
pub struct OutputCache {
    entries: Mutex<FxHashMap<CacheKey, Entry>>,
}

impl OutputCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// The cached outcome for `decl`, generating and storing it on a miss.
    ///
    /// A miss for a type that is already cached replaces the stale entry.
    /// The lock is not held while generating.
    pub fn get_or_generate(&self, decl: &TypeDeclaration, codegen: &CodegenConfig) -> TypeOutcome {
        let key = (decl.qualified_name(), *codegen);
        let print = fingerprint(decl);
        {
            let entries = self.entries.lock();
            if let Some(entry) = entries.get(&key) {
                if entry.fingerprint == print && entry.decl == *decl {
                    tracing::trace!(ty = %key.0, "output cache hit");
                    return entry.outcome.clone();
                }
            }
        }

        let outcome = generate_type(decl, codegen);
        let stale = self.entries.lock().insert(
            key,
            Entry {
                fingerprint: print,
                decl: decl.clone(),
                outcome: outcome.clone(),
            },
        );
        if stale.is_some() {
            tracing::trace!(ty = %decl.qualified_name(), "output cache entry replaced");
        }
        outcome
    }
}
