//! Property-based tests for the generation pipeline.
//!
//! Random well-formed declarations are pushed through analysis and
//! emission to check the invariants that must hold for every type:
//! 1. Sealed types never get a finalizer
//! 2. Unsealed types asking for unmanaged cleanup always get one
//! 3. Release paths are idempotent and keep declaration order
//! 4. Finalizing releases unmanaged resources once and nothing else
//! 5. Rendering is deterministic, sequential or parallel

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use disposer_analysis::replay::Instance;
use disposer_analysis::{build_inventory, resolve_type, synthesize, GenerationDecision};
use disposer_compiler::{generate, generate_type, CancellationToken, CodegenConfig, GenerateConfig};
use disposer_ir::{
    Capability, DeclaredType, MemberDeclaration, RawCallbackConfig, RawCascadeConfig,
    TypeDeclaration,
};
use proptest::prelude::*;

// -- Strategies --

fn capability_strategy() -> impl Strategy<Value = Capability> {
    prop_oneof![
        Just(Capability::SYNC),
        Just(Capability::ASYNC),
        Just(Capability::SYNC | Capability::ASYNC),
        Just(Capability::SYNC | Capability::UNMANAGED),
        Just(Capability::ASYNC | Capability::UNMANAGED),
    ]
}

fn callback_strategy() -> impl Strategy<Value = RawCallbackConfig> {
    (any::<Option<bool>>(), any::<Option<bool>>()).prop_map(|(managed, unmanaged)| {
        RawCallbackConfig {
            generate_managed_callback: managed,
            generate_unmanaged_callback: unmanaged,
        }
    })
}

fn cascade_strategy() -> impl Strategy<Value = Option<RawCascadeConfig>> {
    proptest::option::weighted(
        0.9,
        (any::<Option<bool>>(), any::<Option<bool>>()).prop_map(|(ignore, suppress)| {
            RawCascadeConfig {
                ignore,
                suppress_nulling: suppress,
            }
        }),
    )
}

/// One member: capabilities, property or field, cascade annotation.
fn member_strategy() -> impl Strategy<Value = (Capability, bool, Option<RawCascadeConfig>)> {
    (capability_strategy(), any::<bool>(), cascade_strategy())
}

/// A type with at least one release path and only valid cascade targets.
fn type_strategy() -> impl Strategy<Value = TypeDeclaration> {
    (
        "[A-Z][a-zA-Z0-9]{0,10}",
        "([A-Z][a-z]{0,6}(\\.[A-Z][a-z]{0,6})?)?",
        any::<bool>(),
        proptest::option::of(callback_strategy()),
        proptest::option::of(callback_strategy()),
        prop::collection::vec(member_strategy(), 0..6),
    )
        .prop_filter("needs a release path", |(_, _, _, sync, asy, _)| {
            sync.is_some() || asy.is_some()
        })
        .prop_map(|(name, namespace, sealed, sync, asy, members)| {
            let mut decl = TypeDeclaration::new(name, namespace).sealed(sealed);
            decl.sync_config = sync;
            decl.async_config = asy;
            for (i, (caps, is_property, cascade)) in members.into_iter().enumerate() {
                let ty = DeclaredType::new(format!("Resource{i}"), caps);
                let member = if is_property {
                    MemberDeclaration::cascade_property(format!("Member{i}"), ty)
                } else {
                    MemberDeclaration::cascade_field(format!("_member{i}"), ty)
                };
                decl.members.push(member.with_cascade(cascade));
            }
            decl
        })
}

fn decide(decl: &TypeDeclaration) -> GenerationDecision {
    let resources = build_inventory(decl).unwrap();
    synthesize(&resolve_type(decl), &resources)
}

// -- Properties --

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn sealed_types_never_get_a_finalizer(decl in type_strategy()) {
        let decl = decl.sealed(true);
        let decision = decide(&decl);
        prop_assert!(decision.finalizer.is_none());

        let outcome = generate_type(&decl, &CodegenConfig::default());
        let disposer_compiler::TypeOutcome::Generated(unit) = outcome else {
            return Err(TestCaseError::fail("well-formed type did not generate"));
        };
        let finalizer = format!("~{}()", decl.name);
        prop_assert!(!unit.text.contains(&finalizer));
    }

    #[test]
    fn unmanaged_hook_on_unsealed_type_forces_finalizer(decl in type_strategy()) {
        let mut decl = decl.sealed(false);
        let force = |config: &mut Option<RawCallbackConfig>| {
            if let Some(config) = config {
                config.generate_unmanaged_callback = Some(true);
            }
        };
        if decl.sync_config.is_some() {
            force(&mut decl.sync_config);
        } else {
            force(&mut decl.async_config);
        }
        prop_assert!(decide(&decl).finalizer.is_some());
    }

    #[test]
    fn releasing_twice_releases_each_resource_once(decl in type_strategy()) {
        let decision = decide(&decl);
        let resources = build_inventory(&decl).unwrap();

        let mut obj = Instance::new(&decision);
        if decision.sync_path.is_some() {
            obj.dispose().unwrap();
            obj.dispose().unwrap();
        }
        if decision.async_path.is_some() {
            obj.dispose_async().unwrap();
            obj.dispose_async().unwrap();
        }
        for resource in &resources {
            prop_assert_eq!(obj.release_count(&resource.name), 1);
            prop_assert_eq!(obj.is_present(&resource.name), resource.suppress_nulling);
        }
    }

    #[test]
    fn releases_follow_declaration_order(decl in type_strategy()) {
        let decision = decide(&decl);
        let (unmanaged, managed): (Vec<_>, Vec<_>) = build_inventory(&decl)
            .unwrap()
            .into_iter()
            .partition(|r| r.requires_unmanaged);
        let names = |resources: &[disposer_ir::ResourceDescriptor]| -> Vec<String> {
            resources.iter().map(|r| r.name.clone()).collect()
        };

        for plan in [&decision.sync_path, &decision.async_path].into_iter().flatten() {
            let released: Vec<_> = plan.releases.iter().map(|r| r.member.name.clone()).collect();
            prop_assert_eq!(&released, &names(&managed));
            let released: Vec<_> =
                plan.unmanaged_releases.iter().map(|r| r.member.name.clone()).collect();
            prop_assert_eq!(&released, &names(&unmanaged));
        }
    }

    #[test]
    fn finalizing_releases_each_unmanaged_resource_once(decl in type_strategy()) {
        let decl = decl.sealed(false);
        let decision = decide(&decl);
        let resources = build_inventory(&decl).unwrap();

        let mut obj = Instance::new(&decision);
        if decision.finalizer.is_some() {
            prop_assert!(obj.finalize());
            obj.finalize();
        }
        for resource in &resources {
            let expected = u32::from(resource.requires_unmanaged);
            prop_assert_eq!(obj.release_count(&resource.name), expected);
        }
    }

    #[test]
    fn rendering_is_deterministic(decl in type_strategy()) {
        let config = CodegenConfig::default();
        prop_assert_eq!(generate_type(&decl, &config), generate_type(&decl.clone(), &config));
    }

    #[test]
    fn parallel_matches_sequential(batch in prop::collection::vec(type_strategy(), 0..12)) {
        let token = CancellationToken::new();
        let sequential = GenerateConfig { parallel: false, ..GenerateConfig::default() };

        let seq = generate(&batch, &sequential, &token).unwrap();
        let par = generate(&batch, &GenerateConfig::default(), &token).unwrap();
        prop_assert_eq!(seq.units, par.units);
        prop_assert!(seq.diagnostics.is_empty());
    }
}
