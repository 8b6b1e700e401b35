//! Integration Test: No Panicking Shortcuts in the Core
//!
//! **Policy**: Production code in the rendering core propagates errors with
//! `?` or degrades to placeholders. `unwrap()` and `expect()` are allowed in
//! tests only.

use architectural_enforcement::{core_src, report, scan};

fn panicking_shortcut(code: &str) -> Option<&'static str> {
    if code.contains(".unwrap()") {
        return Some("unwrap()");
    }
    if code.contains(".expect(") {
        return Some("expect()");
    }
    None
}

#[test]
fn test_no_unwrap_in_core_production_code() {
    let violations = scan(&core_src(), panicking_shortcut);
    report("unwrap()/expect() in rendering core production code", &violations);
}

#[test]
fn test_fallible_combinators_are_allowed() {
    assert!(panicking_shortcut("let x = value.unwrap_or(0);").is_none());
    assert!(panicking_shortcut("let x = value.unwrap_or_else(default);").is_none());
    assert!(panicking_shortcut("let x = value.unwrap();").is_some());
    assert!(panicking_shortcut("let x = value.expect(\"set\");").is_some());
}
