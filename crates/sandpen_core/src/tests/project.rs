//! Unit tests for project export and import

use crate::error::ImportError;
use crate::fragment::Fragments;
use crate::project::{Appearance, Layout, Project, Theme};
use crate::snapshot::Libraries;

fn project() -> Project {
    Project::new(
        &Fragments::new("<p>x</p>", "p{}", "console.log(1)"),
        &Libraries::new(vec!["a.css".into()], vec!["b.js".into()]),
        Appearance {
            layout: Layout::Vertical,
            theme: Theme::Light,
        },
    )
}

#[test]
fn test_export_field_names() {
    let json = project().to_json().expect("Should serialize project");
    let value: serde_json::Value = serde_json::from_str(&json).expect("Export should be JSON");

    assert_eq!(value["html"], "<p>x</p>");
    assert_eq!(value["cssLibraries"], serde_json::json!(["a.css"]));
    assert_eq!(value["jsLibraries"], serde_json::json!(["b.js"]));
    assert_eq!(value["layout"], "vertical");
    assert_eq!(value["theme"], "light");
}

#[test]
fn test_import_exported_project() {
    let exported = project();
    let patch = Project::import(&exported.to_json().expect("Should serialize project"))
        .expect("Exported project should import");

    let mut restored = Project::default();
    restored.apply(patch);
    assert_eq!(restored, exported);
}

#[test]
fn test_import_skips_malformed_fields() {
    let patch = Project::import(
        r#"{"html": "<b>ok</b>", "css": 5, "jsLibraries": ["x.js", 3], "theme": "neon"}"#,
    )
    .expect("Object should import");

    assert_eq!(patch.html.as_deref(), Some("<b>ok</b>"));
    assert_eq!(patch.css, None);
    assert_eq!(patch.js_libraries, Some(vec!["x.js".to_string()]));
    assert_eq!(patch.theme, None);

    let mut target = project();
    target.apply(patch);
    assert_eq!(target.html, "<b>ok</b>");
    assert_eq!(target.css, "p{}", "Malformed fields should leave values untouched");
    assert_eq!(target.theme, Theme::Light);
}

#[test]
fn test_import_rejects_non_objects() {
    assert!(matches!(Project::import("[1, 2]"), Err(ImportError::NotAnObject)));
    assert!(matches!(Project::import("not json"), Err(ImportError::Parse(_))));
}

#[test]
fn test_empty_object_is_empty_patch() {
    let patch = Project::import("{}").expect("Empty object should import");
    assert!(patch.is_empty());
}
