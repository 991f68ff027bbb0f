use ai_llm_service::error_handler::AiLlmError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use repair_advisor::AdviceError;
use serde_json::Value;
use thiserror::Error;

use crate::core::http::error_body::ErrorBody;

pub const INVALID_JSON_BODY: &str = "Invalid JSON body";
pub const INVALID_REQUEST_BODY: &str = "Invalid request body";
pub const GEMINI_CALL_FAILED: &str = "Gemini call failed";
pub const UNEXPECTED_SHAPE: &str = "Gemini returned unexpected JSON shape";
pub const SUPERSEDED: &str = "Superseded by a newer request";
pub const UNAUTHORIZED: &str = "Unauthorized";

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Config(#[from] AiLlmError),

    // --- IO / network / server ---
    #[error("failed to bind listener on {addr}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request / routing ---
    /// Mapped HTTP failure with the exact body the client receives.
    #[error("{error}")]
    Http {
        status: StatusCode,
        error: String,
        detail: Option<Value>,
        raw: Option<String>,
    },
}

impl AppError {
    pub fn http(status: StatusCode, error: impl Into<String>) -> Self {
        AppError::Http {
            status,
            error: error.into(),
            detail: None,
            raw: None,
        }
    }

    pub fn bad_request(error: impl Into<String>) -> Self {
        Self::http(StatusCode::BAD_REQUEST, error)
    }

    pub fn unauthorized() -> Self {
        Self::http(StatusCode::UNAUTHORIZED, UNAUTHORIZED)
    }

    /// 500 naming the credential the deployment lacks.
    pub fn missing_credential(var: &str) -> Self {
        Self::http(StatusCode::INTERNAL_SERVER_ERROR, format!("Missing {var}"))
    }

    /// Attaches `detail` to an [`AppError::Http`]; other variants pass through.
    pub fn with_detail(mut self, value: impl Into<Value>) -> Self {
        if let AppError::Http { detail, .. } = &mut self {
            *detail = Some(value.into());
        }
        self
    }

    pub fn with_raw(mut self, text: impl Into<String>) -> Self {
        if let AppError::Http { raw, .. } = &mut self {
            *raw = Some(text.into());
        }
        self
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Http { status, .. } => *status,
            // startup-only
            AppError::Config(_) | AppError::Bind { .. } | AppError::Server(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            AppError::Http {
                error, detail, raw, ..
            } => ErrorBody { error, detail, raw },
            other => ErrorBody::new(other.to_string()),
        };
        body.into_response_with_status(status)
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Maps advice failures onto the repair-advice route contract.
impl From<AdviceError> for AppError {
    fn from(err: AdviceError) -> Self {
        match err {
            AdviceError::InvalidInput(_) => AppError::bad_request(INVALID_REQUEST_BODY),
            AdviceError::UpstreamService { diagnostic, .. } => {
                AppError::http(StatusCode::INTERNAL_SERVER_ERROR, GEMINI_CALL_FAILED)
                    .with_detail(diagnostic)
            }
            AdviceError::MalformedResponse { reason, raw } => {
                AppError::http(StatusCode::INTERNAL_SERVER_ERROR, GEMINI_CALL_FAILED)
                    .with_detail(reason)
                    .with_raw(raw)
            }
            AdviceError::UnexpectedShape { raw, .. } => {
                AppError::http(StatusCode::BAD_GATEWAY, UNEXPECTED_SHAPE).with_detail(raw)
            }
            AdviceError::Superseded { .. } => AppError::http(StatusCode::CONFLICT, SUPERSEDED),
        }
    }
}
