//! Unit tests for message decoding and the host-side bridge

use serde_json::json;

use crate::bridge::MessageBridge;
use crate::fragment::Fragments;
use crate::log_store::{CIRCULAR_PLACEHOLDER, LogStore};
use crate::protocol::{DiagnosticArg, ErrorShape, LogKind, Rejection, SOURCE_TAG, decode, encode};
use crate::sandbox::{Generation, SandboxHost};
use crate::snapshot::{Libraries, SettledSnapshot};

fn loaded_bridge() -> (MessageBridge, Generation) {
    let host = SandboxHost::new();
    let generation = host.load(SettledSnapshot::new(
        Fragments::new("<p>x</p>", "", ""),
        Libraries::default(),
    ));
    (MessageBridge::new(host, LogStore::new()), generation)
}

#[test]
fn test_decode_rejects_foreign_tag() {
    let data = json!({"source": "react-devtools", "type": "log", "message": ["hi"]});
    assert_eq!(
        decode(&data),
        Err(Rejection::ForeignTag("react-devtools".into()))
    );
}

#[test]
fn test_decode_rejects_non_objects_and_missing_tag() {
    assert_eq!(decode(&json!("log")), Err(Rejection::NotAnObject));
    assert_eq!(
        decode(&json!({"type": "log", "message": []})),
        Err(Rejection::MissingTag)
    );
}

#[test]
fn test_decode_rejects_unknown_kind() {
    let data = json!({"source": SOURCE_TAG, "type": "trace", "message": []});
    assert_eq!(decode(&data), Err(Rejection::UnknownKind("trace".into())));
}

#[test]
fn test_decode_missing_arguments_is_empty() {
    let message = decode(&json!({"source": SOURCE_TAG, "type": "info"}))
        .expect("Message without arguments should decode");
    assert_eq!(message.kind, LogKind::Info);
    assert!(message.args.is_empty());
}

#[test]
fn test_decode_matches_encode() {
    let args = vec![
        DiagnosticArg::Text("two".into()),
        DiagnosticArg::Bool(true),
        DiagnosticArg::Structured(json!({"three": 3})),
    ];
    let message = decode(&encode(LogKind::Warn, &args)).expect("Encoded message should decode");

    assert_eq!(message.kind, LogKind::Warn);
    assert_eq!(message.args, args);
}

#[test]
fn test_bridge_ignores_foreign_messages() {
    let (bridge, generation) = loaded_bridge();

    let entry = bridge.receive(
        generation,
        &json!({"source": "something-else", "type": "log", "message": ["hi"]}),
    );

    assert!(entry.is_none(), "Foreign messages should be ignored");
    assert!(bridge.store().is_empty());
}

#[test]
fn test_bridge_appends_in_arrival_order() {
    let (bridge, generation) = loaded_bridge();

    for text in ["first", "second", "third"] {
        bridge
            .receive(generation, &json!({"source": SOURCE_TAG, "type": "log", "message": [text]}))
            .expect("Current message should be accepted");
    }

    let texts: Vec<_> = bridge.store().entries().iter().map(|e| e.text()).collect();
    assert_eq!(texts, vec!["first", "second", "third"]);
}

#[test]
fn test_error_with_stack_renders_stack() {
    let (bridge, generation) = loaded_bridge();
    let stack = "Error: boom\n    at <anonymous>:1:7";

    let entry = bridge
        .receive(
            generation,
            &json!({
                "source": SOURCE_TAG,
                "type": "error",
                "message": [{"__isError": true, "message": "boom", "stack": stack}],
            }),
        )
        .expect("Error message should be accepted");

    assert_eq!(entry.kind, LogKind::Error);
    assert!(entry.text().contains(stack), "Got: {}", entry.text());
}

#[test]
fn test_error_without_stack_renders_message() {
    let (bridge, generation) = loaded_bridge();

    let entry = bridge
        .receive(
            generation,
            &encode(
                LogKind::Error,
                &[DiagnosticArg::Error(ErrorShape {
                    message: "boom".into(),
                    stack: None,
                })],
            ),
        )
        .expect("Error message should be accepted");

    assert_eq!(entry.text(), "boom");
}

#[test]
fn test_circular_value_renders_placeholder() {
    let (bridge, generation) = loaded_bridge();

    let entry = bridge
        .receive(
            generation,
            &encode(
                LogKind::Log,
                &[DiagnosticArg::Text("self:".into()), DiagnosticArg::Unserializable],
            ),
        )
        .expect("Message with an unserializable argument should be accepted");

    assert_eq!(entry.args, vec!["self:".to_string(), CIRCULAR_PLACEHOLDER.to_string()]);
}

#[test]
fn test_stale_generation_is_dropped() {
    let host = SandboxHost::new();
    let bridge = MessageBridge::new(host.clone(), LogStore::new());

    let old = host.load(SettledSnapshot::new(
        Fragments::new("", "", "console.log('A')"),
        Libraries::default(),
    ));
    let new = host.load(SettledSnapshot::new(
        Fragments::new("", "", "console.log('B')"),
        Libraries::default(),
    ));
    assert_ne!(old, new);

    let message = json!({"source": SOURCE_TAG, "type": "log", "message": ["A"]});
    assert!(bridge.receive(old, &message).is_none(), "Stale message should be dropped");

    let message = json!({"source": SOURCE_TAG, "type": "log", "message": ["B"]});
    bridge
        .receive(new, &message)
        .expect("Current message should be accepted");

    let texts: Vec<_> = bridge.store().entries().iter().map(|e| e.text()).collect();
    assert_eq!(texts, vec!["B"]);
}

#[test]
fn test_messages_after_teardown_are_dropped() {
    let host = SandboxHost::new();
    let bridge = MessageBridge::new(host.clone(), LogStore::new());
    let generation = host.load(SettledSnapshot::default());
    host.teardown();

    let message = json!({"source": SOURCE_TAG, "type": "log", "message": ["late"]});
    assert!(bridge.receive(generation, &message).is_none());
    assert!(bridge.store().is_empty());
}
