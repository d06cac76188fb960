use pretty_assertions::assert_eq;

use super::*;
use crate::ErrorCode;
use disposer_ir::{Location, Span};

fn render(diags: &[Diagnostic]) -> String {
    let mut output = Vec::new();
    {
        let mut emitter = JsonEmitter::new(&mut output);
        emitter.begin();
        emitter.emit_all(diags);
        emitter.end();
        emitter.flush();
    }
    String::from_utf8(output).unwrap()
}

#[test]
fn test_json_emitter_full_object() {
    let diag = Diagnostic::error(ErrorCode::Disposer0001)
        .with_message("Type `int` of field `_count` must support release")
        .with_label(
            Location::new("src/Car.cs", Span::new(10, 16), 3, 9),
            "declared here",
        )
        .with_note("in type `Project.Car`")
        .with_suggestion("remove the \"cascade\" annotation");

    let expected = r#"[
  {
    "code": "DISPOSER-0001",
    "message": "Type `int` of field `_count` must support release",
    "location": {"file": "src/Car.cs", "line": 3, "column": 9, "span": [10, 16]},
    "labels": [
      {"location": {"file": "src/Car.cs", "line": 3, "column": 9, "span": [10, 16]}, "message": "declared here"}
    ],
    "notes": ["in type `Project.Car`"],
    "suggestions": ["remove the \"cascade\" annotation"]
  }
]
"#;
    assert_eq!(render(&[diag]), expected);
}

#[test]
fn test_json_emitter_unknown_location_is_null() {
    let diag = Diagnostic::error(ErrorCode::Disposer0001)
        .with_message("synthetic")
        .with_label(Location::DUMMY, "here");
    let text = render(&[diag]);
    assert!(text.contains("    \"location\": null,\n"));
    assert!(text.contains("{\"location\": null, \"message\": \"here\"}"));
    assert!(text.contains("\"notes\": [],"));
}

#[test]
fn test_json_emitter_multiple_is_comma_separated() {
    let diag1 = Diagnostic::error(ErrorCode::Disposer0001).with_message("first");
    let diag2 = Diagnostic::error(ErrorCode::Disposer0001).with_message("second");

    let text = render(&[diag1, diag2]);
    assert!(text.starts_with("[\n"));
    assert!(text.ends_with("\n]\n"));
    assert!(text.contains("  },\n  {"));
    assert_eq!(text.matches("DISPOSER-0001").count(), 2);
}
