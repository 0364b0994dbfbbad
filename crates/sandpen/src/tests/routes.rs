//! Router tests, driven with `oneshot` on a paused clock

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use sandpen_core::protocol::encode;
use sandpen_core::{
    CodeGenerator, DiagnosticArg, FragmentKind, Fragments, GenerateError, Libraries, LogKind,
    Session,
};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tower::ServiceExt;

use crate::server::AppState;
use crate::server::routes::router;

const QUIET: Duration = Duration::from_millis(500);

struct FixedGenerator(Fragments);

#[async_trait]
impl CodeGenerator for FixedGenerator {
    async fn generate(&self, _prompt: &str) -> Result<Fragments, GenerateError> {
        Ok(self.0.clone())
    }
}

fn app_state() -> Arc<AppState> {
    let session = Session::new(
        Fragments::new("<p>hello</p>", "p { color: red; }", "const a=1"),
        Libraries::default(),
        QUIET,
    );
    Arc::new(AppState::new(session).with_generator_hint("set API_KEY"))
}

async fn send(app: &Router, method: Method, uri: &str, body: impl Into<Body>) -> (StatusCode, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(body.into())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn get_json(app: &Router, uri: &str) -> Value {
    let (status, body) = send(app, Method::GET, uri, Body::empty()).await;
    assert_eq!(status, StatusCode::OK, "GET {uri}");
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_state_reports_fragments_and_generation() {
    let app = router(app_state());

    let state = get_json(&app, "/api/state").await;
    assert_eq!(state["fragments"]["markup"], "<p>hello</p>");
    assert_eq!(state["libraries"], json!({"styles": [], "scripts": []}));
    assert_eq!(state["appearance"], json!({"layout": "horizontal", "theme": "vs-dark"}));
    assert_eq!(state["generation"], 1);
}

#[tokio::test(start_paused = true)]
async fn test_fragment_edit_updates_raw_value_before_reload() {
    let state = app_state();
    let app = router(state.clone());

    let (status, _) = send(&app, Method::PUT, "/api/fragments/css", "h1 {}").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(state.session.value(FragmentKind::Style), "h1 {}");
    assert_eq!(state.session.host().generation().0, 1);

    sleep(QUIET + Duration::from_millis(1)).await;
    let document = get_json(&app, "/api/document").await;
    assert_eq!(document["generation"], 2);
    assert!(document["html"].as_str().unwrap().contains("<style>h1 {}</style>"));
}

#[tokio::test(start_paused = true)]
async fn test_unknown_fragment_kind_is_rejected() {
    let app = router(app_state());

    let (status, body) = send(&app, Method::PUT, "/api/fragments/python", "print(1)").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert!(body["error"].as_str().unwrap().contains("python"));
}

#[tokio::test(start_paused = true)]
async fn test_preview_serves_the_running_document_sandboxed() {
    let state = app_state();
    let app = router(state.clone());

    let response = app
        .oneshot(Request::builder().uri("/preview").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_SECURITY_POLICY],
        "sandbox allow-scripts"
    );

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let expected = state.session.host().standalone_document().unwrap();
    assert_eq!(body, expected.as_str().as_bytes());
}

#[tokio::test(start_paused = true)]
async fn test_preview_is_missing_after_teardown() {
    let state = app_state();
    state.session.host().teardown();
    let app = router(state);

    let (status, _) = send(&app, Method::GET, "/preview", Body::empty()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test(start_paused = true)]
async fn test_bridge_accepts_current_generation_only() {
    let state = app_state();
    let app = router(state.clone());
    let generation = state.session.host().generation();
    let message = encode(LogKind::Warn, &[DiagnosticArg::Text("careful".into())]);

    let current = json!({"generation": generation, "data": message});
    let stale = json!({"generation": generation.0 - 1, "data": message});
    for body in [current, stale] {
        let (status, _) = send(&app, Method::POST, "/api/bridge", body.to_string()).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    let logs = get_json(&app, "/api/logs").await;
    let logs = logs.as_array().unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0]["kind"], "warn");
    assert_eq!(logs[0]["args"], json!(["careful"]));
}

#[tokio::test(start_paused = true)]
async fn test_relayed_messages_keep_their_order() {
    let state = app_state();
    let app = router(state.clone());
    let generation = state.session.host().generation();

    for n in 1..=5 {
        let message = encode(LogKind::Log, &[DiagnosticArg::Number(n.into())]);
        let body = json!({"generation": generation, "data": message});
        let (status, _) = send(&app, Method::POST, "/api/bridge", body.to_string()).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    let logs = get_json(&app, "/api/logs").await;
    let args: Vec<_> = logs
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["args"][0].clone())
        .collect();
    assert_eq!(args, vec!["1", "2", "3", "4", "5"]);
}

#[tokio::test(start_paused = true)]
async fn test_editor_page_relays_one_message_at_a_time() {
    let app = router(app_state());

    let (status, body) = send(&app, Method::GET, "/", Body::empty()).await;
    assert_eq!(status, StatusCode::OK);
    let page = String::from_utf8(body).unwrap();
    assert!(page.contains("relay = relay"), "Bridge posts should be chained");
    assert_eq!(page.matches("fetch('/api/bridge'").count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_bridge_ignores_garbage() {
    let state = app_state();
    let app = router(state.clone());

    for body in ["not json", "{}", r#"{"generation": 1, "data": {"source": "other"}}"#] {
        let (status, _) = send(&app, Method::POST, "/api/bridge", body).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }
    assert!(state.session.logs().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_clear_logs() {
    let state = app_state();
    let app = router(state.clone());
    let generation = state.session.host().generation();
    state.session.bridge().receive(
        generation,
        &encode(LogKind::Log, &[DiagnosticArg::Text("one".into())]),
    );
    assert_eq!(state.session.logs().len(), 1);

    let (status, _) = send(&app, Method::DELETE, "/api/logs", Body::empty()).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(state.session.logs().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_generate_without_generator_is_unavailable() {
    let app = router(app_state());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/generate",
        json!({"prompt": "a button"}).to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert!(body["error"].as_str().unwrap().contains("set API_KEY"));
}

#[tokio::test(start_paused = true)]
async fn test_generate_replaces_every_fragment() {
    let session = Session::new(Fragments::default(), Libraries::default(), QUIET);
    let generated = Fragments::new("<button>go</button>", "button {}", "console.log(1)");
    let state = Arc::new(
        AppState::new(session).with_generator(Arc::new(FixedGenerator(generated.clone()))),
    );
    let app = router(state.clone());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/generate",
        json!({"prompt": "a button"}).to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let returned: Fragments = serde_json::from_slice(&body).unwrap();
    assert_eq!(returned, generated);
    assert_eq!(state.session.fragments(), generated);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/generate",
        json!({"prompt": "   "}).to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test(start_paused = true)]
async fn test_format_script_feeds_the_edit_path() {
    let state = app_state();
    let app = router(state.clone());

    let (status, body) = send(&app, Method::POST, "/api/format/script", Body::empty()).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["text"], "const a = 1;\n");
    assert_eq!(state.session.value(FragmentKind::Script), "const a = 1;\n");

    let (status, _) = send(&app, Method::POST, "/api/format/style", Body::empty()).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test(start_paused = true)]
async fn test_project_import_and_export() {
    let state = app_state();
    let app = router(state.clone());

    let (status, _) = send(&app, Method::POST, "/api/project", "[1, 2]").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let import = json!({
        "js": "console.log('imported')",
        "jsLibraries": ["https://cdn.example.com/lib.js"],
        "theme": "light",
        "css": 42,
    });
    let (status, _) = send(&app, Method::POST, "/api/project", import.to_string()).await;
    assert_eq!(status, StatusCode::OK);

    sleep(Duration::from_millis(1)).await;
    let project = get_json(&app, "/api/project").await;
    assert_eq!(project["html"], "<p>hello</p>");
    assert_eq!(project["css"], "p { color: red; }");
    assert_eq!(project["js"], "console.log('imported')");
    assert_eq!(project["jsLibraries"], json!(["https://cdn.example.com/lib.js"]));
    assert_eq!(project["theme"], "light");

    let document = get_json(&app, "/api/document").await;
    let html = document["html"].as_str().unwrap();
    assert!(html.contains("console.log('imported')"));
    assert!(html.contains("https://cdn.example.com/lib.js"));
}

#[tokio::test(start_paused = true)]
async fn test_library_change_reloads_without_quiet_period() {
    let state = app_state();
    let app = router(state.clone());

    let libraries = json!({"styles": ["https://cdn.example.com/a.css"], "scripts": []});
    let (status, _) = send(&app, Method::PUT, "/api/libraries", libraries.to_string()).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    sleep(Duration::from_millis(1)).await;
    let document = get_json(&app, "/api/document").await;
    assert_eq!(document["generation"], 2);
    assert!(
        document["html"]
            .as_str()
            .unwrap()
            .contains("<link rel=\"stylesheet\" href=\"https://cdn.example.com/a.css\">")
    );
}

#[tokio::test(start_paused = true)]
async fn test_appearance_is_kept() {
    let state = app_state();
    let app = router(state.clone());

    let appearance = json!({"layout": "vertical", "theme": "light"});
    let (status, _) = send(&app, Method::PUT, "/api/appearance", appearance.to_string()).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let state = get_json(&app, "/api/state").await;
    assert_eq!(state["appearance"], appearance);
}
