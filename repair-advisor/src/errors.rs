//! Failure taxonomy of an advice request.
//!
//! Every variant is recoverable: callers turn them into structured responses,
//! nothing here should take the process down.

use ai_llm_service::error_handler::AiLlmError;
use thiserror::Error;

pub type AdviceResult<T> = Result<T, AdviceError>;

#[derive(Debug, Error)]
pub enum AdviceError {
    /// The classification is missing a field or has a wrong type.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The text-generation service was unreachable or answered with an error.
    #[error("upstream service error: {diagnostic}")]
    UpstreamService {
        /// Best available message extracted from the failure.
        diagnostic: String,
        #[source]
        source: AiLlmError,
    },

    /// No JSON object could be recovered from the reply.
    #[error("malformed response: {reason}")]
    MalformedResponse { reason: String, raw: String },

    /// A JSON object was recovered but does not match the advice shape.
    #[error("unexpected shape: {reason}")]
    UnexpectedShape { reason: String, raw: String },

    /// A newer request for the same key started while this one was in flight.
    #[error("superseded by a newer request (generation {generation})")]
    Superseded { generation: u64 },
}

impl AdviceError {
    /// Raw model output attached to the failure, if any.
    pub fn raw_text(&self) -> Option<&str> {
        match self {
            AdviceError::MalformedResponse { raw, .. }
            | AdviceError::UnexpectedShape { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

impl From<AiLlmError> for AdviceError {
    fn from(source: AiLlmError) -> Self {
        AdviceError::UpstreamService {
            diagnostic: source.diagnostic(),
            source,
        }
    }
}
