#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use ai_llm_service::config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
use api::{
    build_router,
    core::{app_state::AppState, config::ApiConfig},
};
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

pub const TOKEN: &str = "test-token";
pub const API_KEY: &str = "test-key";

/// How the stub Gemini upstream answers.
#[derive(Clone)]
pub enum Upstream {
    /// `generateContent` succeeds with this candidate text.
    Reply(String),
    /// Every call fails with this status and JSON body.
    Fail(StatusCode, Value),
    /// Calls never complete within the test timeout.
    Hang,
    /// `ListModels` succeeds with this payload.
    Models(Value),
}

pub async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn key_ok(headers: &HeaderMap) -> bool {
    headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()) == Some(API_KEY)
}

fn bad_key() -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({ "error": { "code": 403, "message": "API key not valid", "status": "PERMISSION_DENIED" } })),
    )
        .into_response()
}

async fn answer(mode: &Upstream, ok: impl FnOnce() -> Option<Value>) -> Response {
    match mode {
        Upstream::Fail(status, body) => (*status, Json(body.clone())).into_response(),
        Upstream::Hang => {
            tokio::time::sleep(Duration::from_secs(30)).await;
            StatusCode::GATEWAY_TIMEOUT.into_response()
        }
        _ => match ok() {
            Some(body) => Json(body).into_response(),
            None => StatusCode::NOT_FOUND.into_response(),
        },
    }
}

async fn generate_content(State(mode): State<Arc<Upstream>>, headers: HeaderMap) -> Response {
    if !key_ok(&headers) {
        return bad_key();
    }
    answer(&mode, || match mode.as_ref() {
        Upstream::Reply(text) => Some(json!({
            "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }]
        })),
        _ => None,
    })
    .await
}

async fn list_models(State(mode): State<Arc<Upstream>>, headers: HeaderMap) -> Response {
    if !key_ok(&headers) {
        return bad_key();
    }
    answer(&mode, || match mode.as_ref() {
        Upstream::Models(payload) => Some(payload.clone()),
        _ => None,
    })
    .await
}

/// Starts a stub of the Gemini REST API and returns its base URL.
pub async fn spawn_gemini(mode: Upstream) -> String {
    let router = Router::new()
        .route("/v1beta/models", get(list_models))
        .route("/v1beta/models/{action}", post(generate_content))
        .with_state(Arc::new(mode));
    spawn(router).await
}

pub fn llm_config(endpoint: &str, api_key: Option<&str>, timeout_secs: u64) -> LlmModelConfig {
    LlmModelConfig {
        provider: LlmProvider::Gemini,
        model: "gemini-2.5-flash".into(),
        endpoint: endpoint.into(),
        api_key: api_key.map(str::to_string),
        max_tokens: None,
        temperature: None,
        top_p: None,
        timeout_secs: Some(timeout_secs),
    }
}

/// Starts the API in front of a stub upstream; returns the API base URL.
pub async fn spawn_api(mode: Upstream) -> String {
    let gemini = spawn_gemini(mode).await;
    spawn_api_with(llm_config(&gemini, Some(API_KEY), 1)).await
}

pub async fn spawn_api_with(llm: LlmModelConfig) -> String {
    let config = ApiConfig {
        api_address: "127.0.0.1:0".into(),
        auth_token: TOKEN.into(),
        llm,
    };
    let state = Arc::new(AppState::from_config(config).unwrap());
    spawn(build_router(state)).await
}

pub fn client() -> reqwest::Client {
    reqwest::Client::new()
}

pub const FENCED_ADVICE: &str = "```json\n{\"repairable\":true,\"worthRepairing\":true,\"estimatedCostINR\":450,\"estimatedTimeHours\":2,\"riskLevel\":\"low\",\"recommendation\":\"Re-solder the open trace.\",\"notes\":[\"Inspect adjacent pads\"]}\n```";

pub fn open_circuit() -> Value {
    json!({ "defectId": "D-OC-01", "label": "Open Circuit", "confidence": 0.93 })
}
