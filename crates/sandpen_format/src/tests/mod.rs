//! Tests for fragment formatting

use sandpen_core::FragmentKind;

use crate::{FormatError, format_fragment};

#[test]
fn test_format_script() {
    let formatted =
        format_fragment(FragmentKind::Script, "const a=1").expect("Valid script should format");
    assert_eq!(formatted, "const a = 1;\n");
}

#[test]
fn test_format_script_indents_with_spaces() {
    let formatted = format_fragment(FragmentKind::Script, "function f(){return 1}")
        .expect("Valid script should format");
    assert_eq!(formatted, "function f() {\n  return 1;\n}\n");
}

#[test]
fn test_format_broken_script_fails() {
    let err = format_fragment(FragmentKind::Script, "function (")
        .expect_err("Broken script should not format");
    assert!(matches!(err, FormatError::Syntax(n) if n > 0));
}

#[test]
fn test_format_other_kinds_unsupported() {
    for kind in [FragmentKind::Markup, FragmentKind::Style] {
        let err = format_fragment(kind, "<p>x</p>").expect_err("Only scripts format");
        assert!(matches!(err, FormatError::Unsupported(k) if k == kind));
    }
}
