//! Unit tests for library list management

use crate::snapshot::{Libraries, LibraryKind, UnknownLibrary};

#[test]
fn test_library_kind_by_extension() {
    assert_eq!(LibraryKind::of("https://cdn/x/bootstrap.min.css"), Some(LibraryKind::Style));
    assert_eq!(LibraryKind::of("https://cdn/x/lodash.js?v=4"), Some(LibraryKind::Script));
    assert_eq!(LibraryKind::of("https://cdn/x/font.woff2"), None);
}

#[test]
fn test_add_routes_by_kind_and_skips_duplicates() {
    let mut libraries = Libraries::default();

    assert_eq!(libraries.add("a.css"), Ok(LibraryKind::Style));
    assert_eq!(libraries.add("b.js"), Ok(LibraryKind::Script));
    assert_eq!(libraries.add(" a.css "), Ok(LibraryKind::Style));

    assert_eq!(libraries.list(LibraryKind::Style), ["a.css".to_string()]);
    assert_eq!(libraries.list(LibraryKind::Script), ["b.js".to_string()]);
}

#[test]
fn test_add_unknown_extension_fails() {
    let mut libraries = Libraries::default();
    assert_eq!(
        libraries.add("https://cdn/font.woff2"),
        Err(UnknownLibrary("https://cdn/font.woff2".into()))
    );
    assert!(libraries.is_empty());
}

#[test]
fn test_remove() {
    let mut libraries = Libraries::new(vec!["a.css".into()], vec!["b.js".into()]);

    assert!(libraries.remove("b.js"));
    assert!(!libraries.remove("b.js"));
    assert_eq!(libraries.scripts, Vec::<String>::new());
    assert_eq!(libraries.styles, vec!["a.css".to_string()]);
}

#[test]
fn test_parse_lines() {
    assert_eq!(
        Libraries::parse_lines("a.css\n\n  b.css  \n"),
        vec!["a.css".to_string(), "b.css".to_string()]
    );
}
