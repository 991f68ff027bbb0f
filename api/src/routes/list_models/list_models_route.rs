use std::sync::Arc;

use ai_llm_service::error_handler::AiLlmError;
use axum::{Extension, Json, extract::State, http::StatusCode};
use serde_json::Value;
use tracing::{error, info, instrument};

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
    middleware_layer::request_id::RequestId,
    routes::list_models::list_models_response::{ListModelsResponse, ModelSummary},
};

/// Proxies Gemini ListModels, trimmed to name / display name / methods.
///
/// Upstream non-2xx answers keep their status and pass the upstream payload
/// through as `detail`.
#[instrument(name = "list_models_route", skip_all, fields(request_id = %request_id.0))]
pub async fn list_models_route(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
) -> AppResult<Json<ListModelsResponse>> {
    let Some(gemini) = state.gemini.as_ref() else {
        error!("model listing requested without a configured credential");
        return Err(AppError::missing_credential(state.credential_var()));
    };

    match gemini.list_models().await {
        Ok(models) => {
            info!(count = models.len(), "models listed");
            Ok(Json(ListModelsResponse {
                models: models.into_iter().map(ModelSummary::from).collect(),
            }))
        }
        Err(AiLlmError::HttpStatus(e)) => {
            let detail = e.payload().unwrap_or_else(|| Value::String(e.body.clone()));
            Err(AppError::http(e.status, "ListModels failed").with_detail(detail))
        }
        Err(e) => Err(
            AppError::http(StatusCode::INTERNAL_SERVER_ERROR, "ListModels error")
                .with_detail(e.to_string()),
        ),
    }
}
