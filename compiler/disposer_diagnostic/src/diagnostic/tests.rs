use disposer_ir::{Location, Span};
use pretty_assertions::assert_eq;

use super::*;

fn member_location() -> Location {
    Location::new("src/Car.cs", Span::new(120, 131), 9, 5)
}

#[test]
fn builder_collects_all_parts() {
    let diag = Diagnostic::error(ErrorCode::Disposer0001)
        .with_message("bad member")
        .with_label(member_location(), "declared here")
        .with_note("a note")
        .with_suggestion("a fix");

    assert_eq!(diag.labels, vec![Label::new(member_location(), "declared here")]);
    assert_eq!(diag.notes, vec!["a note".to_string()]);
    assert_eq!(diag.suggestions, vec!["a fix".to_string()]);
}

#[test]
fn primary_location_is_the_first_label() {
    let diag = Diagnostic::error(ErrorCode::Disposer0001)
        .with_label(member_location(), "here")
        .with_label(Location::DUMMY, "context");
    assert_eq!(diag.primary_location(), Some(&member_location()));

    let unlabeled = Diagnostic::error(ErrorCode::Disposer0001);
    assert_eq!(unlabeled.primary_location(), None);
}

#[test]
fn display_renders_code_labels_and_help() {
    let diag = Diagnostic::error(ErrorCode::Disposer0001)
        .with_message("bad member")
        .with_label(member_location(), "declared here")
        .with_note("in type `Car`")
        .with_suggestion("remove the annotation");

    assert_eq!(
        diag.to_string(),
        "error [DISPOSER-0001]: bad member\n  \
         --> src/Car.cs:9:5: declared here\n  \
         = note: in type `Car`\n  \
         = help: remove the annotation"
    );
}
