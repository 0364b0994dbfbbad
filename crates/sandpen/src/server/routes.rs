use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use log::{debug, trace};
use sandpen_core::sandbox::CONTENT_SECURITY_POLICY;
use sandpen_core::{
    Appearance, FragmentKind, Fragments, Generation, Libraries, LogEntry, Project,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::cdnjs::{self, CdnLibrary};
use crate::server::AppState;
use crate::server::error::ApiError;
use crate::server::ws;

static INDEX_HTML: &str = include_str!("../../assets/index.html");

pub(crate) fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/preview", get(preview))
        .route("/api/state", get(api_state))
        .route("/api/document", get(api_document))
        .route("/api/fragments/{kind}", put(api_put_fragment))
        .route("/api/libraries", put(api_put_libraries))
        .route("/api/libraries/search", get(api_search_libraries))
        .route("/api/appearance", put(api_put_appearance))
        .route("/api/bridge", post(api_bridge))
        .route("/api/logs", get(api_logs).delete(api_clear_logs))
        .route("/api/generate", post(api_generate))
        .route("/api/format/{kind}", post(api_format))
        .route("/api/project", get(api_export_project).post(api_import_project))
        .route("/api/ws", get(ws::ws_upgrade))
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// The running document on its own, still without same-origin rights
async fn preview(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let document = state
        .session
        .host()
        .standalone_document()
        .ok_or(ApiError::NoDocument)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8"),
            (header::CONTENT_SECURITY_POLICY, CONTENT_SECURITY_POLICY),
        ],
        document.to_string(),
    )
        .into_response())
}

#[derive(Debug, Serialize)]
struct StateResponse {
    fragments: Fragments,
    libraries: Libraries,
    appearance: Appearance,
    generation: Generation,
}

async fn api_state(State(state): State<Arc<AppState>>) -> Json<StateResponse> {
    let session = &state.session;
    Json(StateResponse {
        fragments: session.fragments(),
        libraries: session.libraries(),
        appearance: session.appearance(),
        generation: session.host().generation(),
    })
}

#[derive(Debug, Serialize)]
struct DocumentResponse {
    generation: Generation,
    html: String,
}

async fn api_document(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DocumentResponse>, ApiError> {
    let loaded = state.session.host().current().ok_or(ApiError::NoDocument)?;
    Ok(Json(DocumentResponse {
        generation: loaded.generation,
        html: loaded.document.to_string(),
    }))
}

fn parse_kind(kind: &str) -> Result<FragmentKind, ApiError> {
    kind.parse()
        .map_err(|e: sandpen_core::fragment::UnknownFragment| ApiError::BadRequest(e.to_string()))
}

async fn api_put_fragment(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
    text: String,
) -> Result<StatusCode, ApiError> {
    let kind = parse_kind(&kind)?;
    state.session.on_change(kind, text);
    Ok(StatusCode::NO_CONTENT)
}

async fn api_put_libraries(
    State(state): State<Arc<AppState>>,
    Json(libraries): Json<Libraries>,
) -> StatusCode {
    state.session.set_libraries(libraries);
    StatusCode::NO_CONTENT
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    q: String,
}

async fn api_search_libraries(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<CdnLibrary>>, ApiError> {
    if query.q.trim().is_empty() {
        return Ok(Json(Vec::new()));
    }
    let results = cdnjs::search(&state.http, query.q.trim())
        .await
        .map_err(|e| ApiError::Upstream(format!("{e:#}")))?;
    Ok(Json(results))
}

async fn api_put_appearance(
    State(state): State<Arc<AppState>>,
    Json(appearance): Json<Appearance>,
) -> StatusCode {
    state.session.set_appearance(appearance);
    state.persist().await;
    StatusCode::NO_CONTENT
}

/// A sandbox message as forwarded by the host page's relay
#[derive(Debug, Deserialize)]
struct RelayedMessage {
    generation: Generation,
    data: Value,
}

/// Always accepts; anything malformed, foreign or stale is dropped quietly
async fn api_bridge(State(state): State<Arc<AppState>>, body: Bytes) -> StatusCode {
    match serde_json::from_slice::<RelayedMessage>(&body) {
        Ok(relayed) => {
            state.session.bridge().receive(relayed.generation, &relayed.data);
        }
        Err(e) => trace!("Ignoring malformed relay body: {e}"),
    }
    StatusCode::NO_CONTENT
}

async fn api_logs(State(state): State<Arc<AppState>>) -> Json<Vec<LogEntry>> {
    Json(state.session.logs().entries())
}

async fn api_clear_logs(State(state): State<Arc<AppState>>) -> StatusCode {
    state.session.logs().clear();
    StatusCode::NO_CONTENT
}

#[derive(Debug, Deserialize)]
struct GenerateRequest {
    prompt: String,
}

async fn api_generate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<Fragments>, ApiError> {
    let generator = state.generator.clone().ok_or_else(|| {
        sandpen_core::GenerateError::Unavailable(state.generator_hint.clone())
    })?;

    let fragments = state
        .session
        .generate(generator.as_ref(), &request.prompt)
        .await?;
    Ok(Json(fragments))
}

#[derive(Debug, Serialize)]
struct FormatResponse {
    text: String,
}

/// Format the raw fragment and feed the result back through the normal edit path
async fn api_format(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
) -> Result<Json<FormatResponse>, ApiError> {
    let kind = parse_kind(&kind)?;
    let text = sandpen_format::format_fragment(kind, &state.session.value(kind))?;
    debug!("Formatted {kind} fragment");
    state.session.on_change(kind, text.clone());
    Ok(Json(FormatResponse { text }))
}

async fn api_export_project(State(state): State<Arc<AppState>>) -> Json<Project> {
    Json(state.session.export_project())
}

async fn api_import_project(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<Project>, ApiError> {
    let patch = Project::import(&body)?;
    let project = state.session.import_project(patch);
    state.persist().await;
    Ok(Json(project))
}
