use sandpen_core::{Fragments, Generation, Libraries, LogEvent, SandboxHost, SettledSnapshot};
use serde_json::json;

use crate::server::ws::ServerEvent;

#[test]
fn test_document_event_carries_html_and_generation() {
    let host = SandboxHost::new();
    host.load(SettledSnapshot::new(
        Fragments::new("<p>hi</p>", "", ""),
        Libraries::default(),
    ));

    let event = ServerEvent::document(&host.subscribe().borrow());
    let ServerEvent::Document { generation, html } = &event else {
        panic!("expected a document event, got {event:?}");
    };
    assert_eq!(*generation, Generation(1));
    assert!(html.as_deref().unwrap().contains("<p>hi</p>"));

    let wire = serde_json::to_value(&event).unwrap();
    assert_eq!(wire["type"], "document");
    assert_eq!(wire["generation"], 1);
}

#[test]
fn test_teardown_sends_an_empty_document() {
    let host = SandboxHost::new();
    host.load(SettledSnapshot::new(Fragments::default(), Libraries::default()));
    host.teardown();

    let event = ServerEvent::document(&host.subscribe().borrow());
    assert_eq!(
        serde_json::to_value(&event).unwrap(),
        json!({"type": "document", "generation": 2, "html": null})
    );
}

#[test]
fn test_log_events_map_to_editor_events() {
    assert_eq!(ServerEvent::from(LogEvent::Cleared), ServerEvent::Cleared);
    assert_eq!(
        serde_json::to_value(ServerEvent::Cleared).unwrap(),
        json!({"type": "cleared"})
    );
    assert_eq!(
        serde_json::to_value(ServerEvent::Logs { entries: vec![] }).unwrap(),
        json!({"type": "logs", "entries": []})
    );
}
