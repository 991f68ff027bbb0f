use std::sync::Arc;

use axum::{Extension, Json, body::Bytes, extract::State};
use repair_advisor::{AdviceError, DefectClassification, RepairAdvice};
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult, INVALID_JSON_BODY, INVALID_REQUEST_BODY},
    middleware_layer::{auth::Caller, request_id::RequestId},
};

/// HTTP endpoint producing repair advice for one classified defect.
///
/// Expects `{ defectId, label, confidence }`. A newer request from the same
/// caller for the same `defectId` supersedes this one (409).
#[instrument(
    name = "repair_advice_route",
    skip_all,
    fields(request_id = %request_id.0, caller = %caller.0)
)]
pub async fn repair_advice_route(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Extension(caller): Extension<Caller>,
    body: Bytes,
) -> AppResult<Json<RepairAdvice>> {
    let value: Value = serde_json::from_slice(&body).map_err(|e| {
        debug!(error = %e, body_len = body.len(), "body is not JSON");
        AppError::bad_request(INVALID_JSON_BODY)
    })?;

    let defect = DefectClassification::from_json(&value).map_err(|e| {
        debug!(error = %e, "rejecting classification");
        AppError::bad_request(INVALID_REQUEST_BODY)
    })?;

    let Some(advisor) = state.advisor.as_ref() else {
        error!("repair advice requested without a configured credential");
        return Err(AppError::missing_credential(state.credential_var()));
    };

    let key = format!("{}:{}", caller.0, defect.defect_id);
    match advisor.request_tracked(key, &defect).await {
        Ok(advice) => {
            info!(defect_id = %defect.defect_id, "repair advice served");
            Ok(Json(advice))
        }
        Err(e @ AdviceError::Superseded { .. }) => {
            info!(defect_id = %defect.defect_id, "request superseded");
            Err(e.into())
        }
        Err(e) => {
            warn!(defect_id = %defect.defect_id, error = %e, "repair advice failed");
            Err(e.into())
        }
    }
}
