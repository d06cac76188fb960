//! Shared builders for analysis tests.

use disposer_ir::{
    Capability, DeclaredType, MemberDeclaration, RawCallbackConfig, RawCascadeConfig,
    TypeDeclaration,
};

use crate::{build_inventory, resolve_type, synthesize, GenerationDecision};

pub(crate) fn hooks(managed: bool, unmanaged: bool) -> RawCallbackConfig {
    RawCallbackConfig {
        generate_managed_callback: Some(managed),
        generate_unmanaged_callback: Some(unmanaged),
    }
}

pub(crate) fn field(name: &str, caps: Capability) -> MemberDeclaration {
    MemberDeclaration::cascade_field(name, DeclaredType::new(format!("{name}Type"), caps))
}

pub(crate) fn keep_reference(member: MemberDeclaration) -> MemberDeclaration {
    member.with_cascade(Some(RawCascadeConfig {
        ignore: None,
        suppress_nulling: Some(true),
    }))
}

/// Run config resolution, inventory and synthesis on a well-formed type.
pub(crate) fn decide(decl: &TypeDeclaration) -> GenerationDecision {
    let resources = match build_inventory(decl) {
        Ok(resources) => resources,
        Err(errors) => panic!("unexpected inventory errors: {errors:?}"),
    };
    synthesize(&resolve_type(decl), &resources)
}
