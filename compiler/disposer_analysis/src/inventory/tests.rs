use disposer_diagnostic::ErrorCode;
use disposer_ir::{
    Capability, DeclaredType, Location, MemberDeclaration, RawCascadeConfig, Span,
    TypeDeclaration,
};
use pretty_assertions::assert_eq;

use super::*;

fn disposable(name: &str) -> DeclaredType {
    DeclaredType::new(name, Capability::SYNC)
}

fn names(resources: &[ResourceDescriptor]) -> Vec<&str> {
    resources.iter().map(|r| r.name.as_str()).collect()
}

#[test]
fn keeps_declaration_order() {
    let decl = TypeDeclaration::new("Car", "Project")
        .with_member(MemberDeclaration::cascade_field("_engine", disposable("Engine")))
        .with_member(MemberDeclaration::cascade_property(
            "Radio",
            DeclaredType::new("Radio", Capability::ASYNC),
        ))
        .with_member(MemberDeclaration::cascade_field("_wheels", disposable("Wheels")));

    let resources = build_inventory(&decl).unwrap_or_default();
    assert_eq!(names(&resources), vec!["_engine", "Radio", "_wheels"]);
    assert!(resources[1].is_property());
    assert!(!resources[1].supports_sync);
    assert!(resources[1].supports_async);
}

#[test]
fn skips_unannotated_and_ignored_members() {
    let ignored = RawCascadeConfig {
        ignore: Some(true),
        suppress_nulling: None,
    };
    let decl = TypeDeclaration::new("Car", "")
        .with_member(
            MemberDeclaration::cascade_field("_plain", disposable("Stream")).with_cascade(None),
        )
        .with_member(
            MemberDeclaration::cascade_field("_skip", DeclaredType::new("int", Capability::empty()))
                .with_cascade(Some(ignored)),
        )
        .with_member(MemberDeclaration::cascade_field("_kept", disposable("Stream")));

    let resources = build_inventory(&decl).unwrap_or_default();
    assert_eq!(names(&resources), vec!["_kept"]);
}

#[test]
fn resolves_member_flags() {
    let decl = TypeDeclaration::new("Car", "").with_member(
        MemberDeclaration::cascade_field(
            "_handle",
            DeclaredType::new("SafeHandle", Capability::SYNC | Capability::UNMANAGED),
        )
        .with_cascade(Some(RawCascadeConfig {
            ignore: None,
            suppress_nulling: Some(true),
        })),
    );

    let resources = build_inventory(&decl).unwrap_or_default();
    assert_eq!(resources.len(), 1);
    assert!(resources[0].suppress_nulling);
    assert!(resources[0].requires_unmanaged);
}

#[test]
fn unreleasable_member_is_an_error_not_a_skip() {
    let location = Location::new("src/Car.cs", Span::new(88, 94), 6, 17);
    let decl = TypeDeclaration::new("Car", "Project")
        .with_member(MemberDeclaration::cascade_field("_engine", disposable("Engine")))
        .with_member(
            MemberDeclaration::cascade_property("Speed", DeclaredType::new("int", Capability::empty()))
                .with_location(location.clone()),
        );

    let errors = build_inventory(&decl).err().unwrap_or_default();
    assert_eq!(
        errors,
        vec![CascadeError::InvalidCascadeTarget {
            owner: "Project.Car".to_string(),
            member: "Speed".to_string(),
            kind: MemberKind::Property,
            declared_type: "int".to_string(),
            location,
        }]
    );
}

#[test]
fn every_invalid_member_is_reported() {
    let nothing = DeclaredType::new("object", Capability::UNMANAGED);
    let decl = TypeDeclaration::new("Car", "")
        .with_member(MemberDeclaration::cascade_field("_a", nothing.clone()))
        .with_member(MemberDeclaration::cascade_field("_b", disposable("Stream")))
        .with_member(MemberDeclaration::cascade_field("_c", nothing));

    let errors = build_inventory(&decl).err().unwrap_or_default();
    assert_eq!(errors.len(), 2);
}

#[test]
fn diagnostic_carries_type_kind_member_and_location() {
    let location = Location::new("src/Car.cs", Span::new(10, 16), 3, 9);
    let error = CascadeError::InvalidCascadeTarget {
        owner: "Project.Car".to_string(),
        member: "_count".to_string(),
        kind: MemberKind::Field,
        declared_type: "int".to_string(),
        location: location.clone(),
    };

    let diag = error.to_diagnostic();
    assert_eq!(diag.code, ErrorCode::Disposer0001);
    assert!(diag.is_error());
    assert_eq!(
        diag.message,
        "Type `int` of field `_count` must support synchronous or asynchronous release \
         to be cascade-released"
    );
    assert_eq!(diag.primary_location(), Some(&location));
    assert_eq!(
        diag.notes,
        vec!["no release implementation is generated for `Project.Car`".to_string()]
    );
    assert_eq!(
        error.to_string(),
        "type `int` of field `_count` supports neither synchronous nor asynchronous release"
    );
}
