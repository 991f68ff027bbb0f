use std::sync::{Arc, Mutex};

use ai_llm_service::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{AiLlmError, StatusCode},
    services::gemini_service::GeminiService,
    text_generator::TextGenerator,
};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

#[derive(Default)]
struct Seen {
    key: Option<String>,
    action: Option<String>,
    body: Option<Value>,
}

struct Stub {
    status: StatusCode,
    reply: Value,
    seen: Mutex<Seen>,
}

async fn generate(
    State(stub): State<Arc<Stub>>,
    Path(action): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    {
        let mut seen = stub.seen.lock().unwrap();
        seen.key = headers
            .get("x-goog-api-key")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        seen.action = Some(action);
        seen.body = Some(body);
    }
    (stub.status, Json(stub.reply.clone())).into_response()
}

async fn models(State(stub): State<Arc<Stub>>) -> Response {
    (stub.status, Json(stub.reply.clone())).into_response()
}

async fn spawn_stub(status: StatusCode, reply: Value) -> (String, Arc<Stub>) {
    let stub = Arc::new(Stub {
        status,
        reply,
        seen: Mutex::default(),
    });
    let router = Router::new()
        .route("/v1beta/models", get(models))
        .route("/v1beta/models/{action}", post(generate))
        .with_state(stub.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (format!("http://{addr}"), stub)
}

fn service(endpoint: &str) -> GeminiService {
    GeminiService::new(LlmModelConfig {
        provider: LlmProvider::Gemini,
        model: "gemini-2.5-flash".into(),
        endpoint: endpoint.into(),
        api_key: Some("secret-key".into()),
        max_tokens: Some(512),
        temperature: Some(0.2),
        top_p: None,
        timeout_secs: Some(5),
    })
    .unwrap()
}

#[tokio::test]
async fn generate_content_concatenates_parts_and_sends_key_in_header() {
    let (base, stub) = spawn_stub(
        StatusCode::OK,
        json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "{\"a\":" }, { "text": "1}" }] },
                "finishReason": "STOP"
            }]
        }),
    )
    .await;

    let svc = service(&base);
    let text = svc.generate("describe the defect").await.unwrap();
    assert_eq!(text, "{\"a\":1}");
    assert_eq!(svc.model(), "gemini-2.5-flash");

    let seen = stub.seen.lock().unwrap();
    assert_eq!(seen.key.as_deref(), Some("secret-key"));
    assert_eq!(seen.action.as_deref(), Some("gemini-2.5-flash:generateContent"));
    let body = seen.body.as_ref().unwrap();
    assert_eq!(body["contents"][0]["parts"][0]["text"], "describe the defect");
    assert_eq!(body["generationConfig"]["maxOutputTokens"], 512);
}

#[tokio::test]
async fn error_status_keeps_body_for_diagnostics() {
    let (base, _) = spawn_stub(
        StatusCode::NOT_FOUND,
        json!({ "error": { "code": 404, "message": "models/gemini-9 is not found", "status": "NOT_FOUND" } }),
    )
    .await;

    let err = service(&base).generate_content("x").await.unwrap_err();
    assert_eq!(err.upstream_status(), Some(StatusCode::NOT_FOUND));
    assert_eq!(err.diagnostic(), "models/gemini-9 is not found");
}

#[tokio::test]
async fn blocked_prompt_has_no_candidates() {
    let (base, _) = spawn_stub(
        StatusCode::OK,
        json!({ "promptFeedback": { "blockReason": "SAFETY" } }),
    )
    .await;

    match service(&base).generate_content("x").await {
        Err(AiLlmError::EmptyCandidates { block_reason }) => {
            assert_eq!(block_reason.as_deref(), Some("SAFETY"))
        }
        other => panic!("expected EmptyCandidates, got {other:?}"),
    }
}

#[tokio::test]
async fn list_models_decodes_entries() {
    let (base, _) = spawn_stub(
        StatusCode::OK,
        json!({
            "models": [{
                "name": "models/gemini-2.5-flash",
                "displayName": "Gemini 2.5 Flash",
                "supportedGenerationMethods": ["generateContent"]
            }]
        }),
    )
    .await;

    let models = service(&base).list_models().await.unwrap();
    assert_eq!(models.len(), 1);
    assert_eq!(models[0].name, "models/gemini-2.5-flash");
    assert_eq!(models[0].display_name.as_deref(), Some("Gemini 2.5 Flash"));
    assert_eq!(models[0].supported_generation_methods, vec!["generateContent"]);
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_error() {
    let err = service("http://127.0.0.1:9").list_models().await.unwrap_err();
    assert!(matches!(
        err,
        AiLlmError::HttpTransport(_) | AiLlmError::Timeout(_)
    ));
}
