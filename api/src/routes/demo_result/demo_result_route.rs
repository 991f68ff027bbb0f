use axum::{Extension, Json, extract::Query};
use repair_advisor::demo_results::{self, DemoResult};
use tracing::{debug, instrument};

use crate::{
    error_handler::{AppError, AppResult},
    middleware_layer::request_id::RequestId,
    routes::demo_result::demo_result_query::DemoResultQuery,
};

/// Stored detection result for the dashboard demo (`?id=img01`).
#[instrument(name = "demo_result_route", skip_all, fields(request_id = %request_id.0))]
pub async fn demo_result_route(
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<DemoResultQuery>,
) -> AppResult<Json<DemoResult>> {
    let id = query.id().ok_or_else(|| AppError::bad_request("Missing id"))?;

    match demo_results::find(id) {
        Some(result) => {
            debug!(id, defect_id = %result.defect_id, "demo result found");
            Ok(Json(result))
        }
        None => {
            debug!(id, "unknown demo id");
            Err(AppError::bad_request("Invalid id"))
        }
    }
}
