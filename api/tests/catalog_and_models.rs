mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

use common::*;

async fn get(base: &str, path: &str) -> (StatusCode, Value) {
    let res = client()
        .get(format!("{base}{path}"))
        .bearer_auth(TOKEN)
        .send()
        .await
        .unwrap();
    let status = res.status();
    (status, res.json().await.unwrap())
}

#[tokio::test]
async fn health_needs_no_token() {
    let base = spawn_api(Upstream::Reply(String::new())).await;

    let res = client().get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers()["x-request-id"].to_str().unwrap().starts_with("req-"));
    assert_eq!(res.json::<Value>().await.unwrap(), json!({ "status": "ok" }));
}

#[tokio::test]
async fn demo_result_is_served_by_id() {
    let base = spawn_api(Upstream::Reply(String::new())).await;

    let (status, body) = get(&base, "/api/demo-result?id=img03").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "id": "img03",
            "inputUrl": "/demo/inputs/Sample3_original.png",
            "outputUrls": {
                "bbox": "/demo/outputs/Sample3_bbox.png",
                "gradcam": "/demo/outputs/Sample3_gradcam.png",
                "zoomed": "/demo/outputs/Sample3_zoomed.png"
            },
            "label": "Mouse Bite",
            "defectId": "D-MB-03",
            "confidence": 0.89
        })
    );
}

#[tokio::test]
async fn demo_result_rejects_missing_and_unknown_ids() {
    let base = spawn_api(Upstream::Reply(String::new())).await;

    for path in ["/api/demo-result", "/api/demo-result?id=", "/api/demo-result?id=%20"] {
        let (status, body) = get(&base, path).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{path}");
        assert_eq!(body, json!({ "error": "Missing id" }));
    }

    let (status, body) = get(&base, "/api/demo-result?id=img99").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid id" }));
}

#[tokio::test]
async fn demo_result_requires_token() {
    let base = spawn_api(Upstream::Reply(String::new())).await;

    let res = client()
        .get(format!("{base}/api/demo-result?id=img01"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn list_models_keeps_useful_fields() {
    let base = spawn_api(Upstream::Models(json!({
        "models": [
            {
                "name": "models/gemini-2.5-flash",
                "displayName": "Gemini 2.5 Flash",
                "inputTokenLimit": 1048576,
                "supportedGenerationMethods": ["generateContent", "countTokens"]
            },
            { "name": "models/embedding-001", "supportedGenerationMethods": ["embedContent"] }
        ],
        "nextPageToken": "abc"
    })))
    .await;

    let (status, body) = get(&base, "/api/list-models").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "models": [
                {
                    "name": "models/gemini-2.5-flash",
                    "displayName": "Gemini 2.5 Flash",
                    "supportedMethods": ["generateContent", "countTokens"]
                },
                {
                    "name": "models/embedding-001",
                    "displayName": null,
                    "supportedMethods": ["embedContent"]
                }
            ]
        })
    );
}

#[tokio::test]
async fn list_models_passes_upstream_failure_through() {
    let payload = json!({ "error": { "code": 403, "message": "API key not valid", "status": "PERMISSION_DENIED" } });
    let base = spawn_api(Upstream::Fail(StatusCode::FORBIDDEN, payload.clone())).await;

    let (status, body) = get(&base, "/api/list-models").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, json!({ "error": "ListModels failed", "detail": payload }));
}

#[tokio::test]
async fn list_models_transport_failure_is_500() {
    // Nothing listens on the discard port.
    let base = spawn_api_with(llm_config("http://127.0.0.1:9", Some(API_KEY), 1)).await;

    let (status, body) = get(&base, "/api/list-models").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "ListModels error");
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn list_models_without_credential() {
    let gemini = spawn_gemini(Upstream::Models(json!({ "models": [] }))).await;
    let base = spawn_api_with(llm_config(&gemini, None, 1)).await;

    let (status, body) = get(&base, "/api/list-models").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Missing GEMINI_API_KEY" }));
}
