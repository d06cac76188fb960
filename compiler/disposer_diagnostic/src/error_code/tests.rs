use super::*;

#[test]
fn test_error_code_display() {
    assert_eq!(ErrorCode::Disposer0001.to_string(), "DISPOSER-0001");
    assert_eq!(ErrorCode::Disposer0001.as_str(), "DISPOSER-0001");
}

#[test]
fn test_parse_round_trips_every_code() {
    for code in ErrorCode::ALL {
        assert_eq!(ErrorCode::parse(code.as_str()), Some(*code));
    }
    assert_eq!(ErrorCode::parse("DISPOSER-9999"), None);
    assert_eq!(ErrorCode::parse("disposer-0001"), None);
}

#[test]
fn test_codes_are_unique() {
    let mut seen = std::collections::HashSet::new();
    for code in ErrorCode::ALL {
        assert!(seen.insert(code.as_str()), "duplicate code {code}");
    }
}
