use camino::Utf8Path;
use sandpen_core::{Layout, Project, templates};
use tempfile::TempDir;

use crate::project_file::{ProjectFile, starter_project};

fn file_in(dir: &TempDir) -> ProjectFile {
    let path = Utf8Path::from_path(dir.path())
        .unwrap()
        .join("sandpen.project.json");
    ProjectFile::new(path)
}

#[test]
fn test_missing_file_loads_the_starter_template() {
    let dir = TempDir::new().unwrap();
    let file = file_in(&dir);

    assert!(!file.exists());
    let project = file.load().unwrap();
    assert_eq!(project, starter_project());
    assert_eq!(project.fragments(), templates::starter().fragments());
}

#[test]
fn test_saved_project_loads_back() {
    let dir = TempDir::new().unwrap();
    let file = file_in(&dir);
    let project = Project {
        html: "<p>saved</p>".into(),
        js_libraries: vec!["https://cdn.example.com/x.js".into()],
        layout: Layout::Vertical,
        ..Project::default()
    };

    file.save(&project).unwrap();
    assert!(file.exists());
    assert_eq!(file.load().unwrap(), project);
}

#[test]
fn test_malformed_fields_fall_back_to_empty() {
    let dir = TempDir::new().unwrap();
    let file = file_in(&dir);
    std::fs::write(
        file.path(),
        r#"{"html": "<p>kept</p>", "css": ["not", "text"], "layout": "diagonal"}"#,
    )
    .unwrap();

    let project = file.load().unwrap();
    assert_eq!(project.html, "<p>kept</p>");
    assert_eq!(project.css, "");
    assert_eq!(project.layout, Layout::Horizontal);
}

#[test]
fn test_non_object_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let file = file_in(&dir);
    std::fs::write(file.path(), "42").unwrap();

    let err = file.load().unwrap_err();
    assert!(err.to_string().contains("expected a JSON object"));
}

#[tokio::test]
async fn test_save_async_writes_pretty_json() {
    let dir = TempDir::new().unwrap();
    let file = file_in(&dir);

    file.save_async(&starter_project()).await.unwrap();
    let text = std::fs::read_to_string(file.path()).unwrap();
    assert!(text.starts_with("{\n  \"html\""));
    assert!(text.contains("\"cssLibraries\": []"));
}
