//! Unified error handling for `ai-llm-service`.
//!
//! This module exposes a single top-level error type [`AiLlmError`] for the whole
//! library, and groups config errors in the nested [`ConfigError`] enum. Small
//! helpers for reading/validating environment variables are provided and return
//! the unified [`Result<T>`] alias.
//!
//! All messages include the suffix `[AI LLM Service]` to simplify attribution in logs.

pub use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Literal used when no diagnostic can be extracted from a failure.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Max number of characters kept from an upstream body for log snippets.
const SNIPPET_MAX_CHARS: usize = 300;

/* ------------------------------------------------------------------------- */
/* Public result alias                                                       */
/* ------------------------------------------------------------------------- */

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, AiLlmError>;

/* ------------------------------------------------------------------------- */
/* Top-level error                                                           */
/* ------------------------------------------------------------------------- */

/// Top-level error for the `ai-llm-service` crate.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AiLlmError {
    /// Configuration/validation errors (startup/readiness).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Upstream returned a non-successful HTTP status.
    #[error(transparent)]
    HttpStatus(#[from] HttpError),

    /// Underlying HTTP transport error (e.g., `reqwest::Error`).
    #[error("[AI LLM Service] transport error: {0}")]
    HttpTransport(#[from] reqwest::Error),

    /// Operation exceeded the configured timeout.
    #[error("[AI LLM Service] operation timed out after {0:?}")]
    Timeout(Duration),

    /// Response payload could not be decoded as expected.
    #[error("[AI LLM Service] decode error: {0}")]
    Decode(String),

    /// The service answered 2xx but produced no usable text.
    #[error("[AI LLM Service] response contained no candidates{}", block_suffix(.block_reason))]
    EmptyCandidates {
        /// `promptFeedback.blockReason`, when the prompt was blocked.
        block_reason: Option<String>,
    },
}

fn block_suffix(reason: &Option<String>) -> String {
    match reason {
        Some(r) => format!(" (blocked: {r})"),
        None => String::new(),
    }
}

impl AiLlmError {
    /// Best available human-readable diagnostic for this failure.
    ///
    /// For upstream status errors the response payload is inspected first:
    /// top-level `message`, then nested `error.message`. Otherwise the error's
    /// own string form is used, and [`UNKNOWN_ERROR`] if that is empty.
    pub fn diagnostic(&self) -> String {
        let payload = match self {
            AiLlmError::HttpStatus(e) => e.payload(),
            _ => None,
        };
        diagnostic_from(payload.as_ref(), &self.to_string())
    }

    /// HTTP status reported by the upstream, if any.
    pub fn upstream_status(&self) -> Option<StatusCode> {
        match self {
            AiLlmError::HttpStatus(e) => Some(e.status),
            AiLlmError::HttpTransport(e) => e.status(),
            _ => None,
        }
    }
}

/// Non-success HTTP answer from the provider.
#[derive(Debug, Error)]
#[error("[AI LLM Service] HTTP {status} from {url}: {snippet}")]
pub struct HttpError {
    /// Numeric HTTP status code.
    pub status: StatusCode,
    /// Request URL (never contains the API key).
    pub url: String,
    /// Short, single-line snippet of the response body.
    pub snippet: String,
    /// Full response body as received.
    pub body: String,
}

impl HttpError {
    pub fn new(status: StatusCode, url: impl Into<String>, body: String) -> Self {
        Self {
            status,
            url: url.into(),
            snippet: make_snippet(&body),
            body,
        }
    }

    /// Response body parsed as JSON, when it is JSON.
    pub fn payload(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }
}

/// Applies the diagnostic fallback chain to an (optional) error payload.
///
/// `message` → `error.message` → `fallback` → [`UNKNOWN_ERROR`].
pub fn diagnostic_from(payload: Option<&Value>, fallback: &str) -> String {
    let non_empty = |v: Option<&Value>| {
        v.and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    if let Some(p) = payload {
        if let Some(msg) = non_empty(p.get("message")) {
            return msg;
        }
        if let Some(msg) = non_empty(p.get("error").and_then(|e| e.get("message"))) {
            return msg;
        }
    }

    let fallback = fallback.trim();
    if fallback.is_empty() {
        UNKNOWN_ERROR.to_string()
    } else {
        fallback.to_string()
    }
}

/// Collapses whitespace and truncates a body for logs and error messages.
pub fn make_snippet(body: &str) -> String {
    let flat = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= SNIPPET_MAX_CHARS {
        flat
    } else {
        let cut: String = flat.chars().take(SNIPPET_MAX_CHARS).collect();
        format!("{cut}…")
    }
}

/* ------------------------------------------------------------------------- */
/* Config errors                                                             */
/* ------------------------------------------------------------------------- */

/// Error enum for environment/config-driven setup.
///
/// Keep this focused: only errors that realistically happen at config
/// load/validation time.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is missing or empty.
    #[error("[AI LLM Service] missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A number failed to parse (like limits, timeouts).
    #[error("[AI LLM Service] invalid number in {var}: {reason}")]
    InvalidNumber {
        /// Variable name (e.g., `LLM_MAX_TOKENS`).
        var: &'static str,
        /// Human-readable reason (e.g., `expected u32`).
        reason: &'static str,
    },

    /// Value had the wrong format (e.g., invalid URL).
    #[error("[AI LLM Service] invalid format in {var}: {reason}")]
    InvalidFormat {
        /// Variable name (e.g., `GEMINI_ENDPOINT`).
        var: &'static str,
        /// Explanation (e.g., `must start with http:// or https://`).
        reason: &'static str,
    },

    /// A numeric field was outside of the allowed range.
    #[error("[AI LLM Service] {field} is out of range: {detail}")]
    OutOfRange {
        /// Field name (e.g., `temperature`).
        field: &'static str,
        /// Description of the expected range.
        detail: &'static str,
    },

    /// Model name was empty.
    #[error("[AI LLM Service] model name must not be empty")]
    EmptyModel,

    /// The provider needs an API key and none was configured.
    #[error("[AI LLM Service] missing API key for {0}")]
    MissingApiKey(&'static str),
}

/* ------------------------------------------------------------------------- */
/* Env helpers (return unified `Result<T>`)                                  */
/* ------------------------------------------------------------------------- */

/// Fetches a required, non-empty environment variable.
///
/// # Errors
/// Returns [`AiLlmError::Config`] with [`ConfigError::MissingVar`] if the
/// variable is absent or empty.
pub fn must_env(name: &'static str) -> Result<String> {
    env_opt(name).ok_or_else(|| ConfigError::MissingVar(name).into())
}

/// Fetches an optional, non-empty environment variable.
pub fn env_opt(name: &'static str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parses an optional `u32` from env (`Ok(None)` if unset/empty).
///
/// # Errors
/// Returns [`AiLlmError::Config`] with [`ConfigError::InvalidNumber`] if the
/// variable is set but not a valid `u32`.
pub fn env_opt_u32(name: &'static str) -> Result<Option<u32>> {
    match env_opt(name) {
        Some(v) => v.parse::<u32>().map(Some).map_err(|_| {
            AiLlmError::from(ConfigError::InvalidNumber {
                var: name,
                reason: "expected u32",
            })
        }),
        None => Ok(None),
    }
}

/// Parses an optional `u64` from env (`Ok(None)` if unset/empty).
pub fn env_opt_u64(name: &'static str) -> Result<Option<u64>> {
    match env_opt(name) {
        Some(v) => v.parse::<u64>().map(Some).map_err(|_| {
            AiLlmError::from(ConfigError::InvalidNumber {
                var: name,
                reason: "expected u64",
            })
        }),
        None => Ok(None),
    }
}

/// Parses an optional `f32` from env (`Ok(None)` if unset/empty).
pub fn env_opt_f32(name: &'static str) -> Result<Option<f32>> {
    match env_opt(name) {
        Some(v) => v.parse::<f32>().map(Some).map_err(|_| {
            AiLlmError::from(ConfigError::InvalidNumber {
                var: name,
                reason: "expected a decimal number",
            })
        }),
        None => Ok(None),
    }
}

/* ------------------------------------------------------------------------- */
/* Validation helpers (return unified `Result<T>`)                           */
/* ------------------------------------------------------------------------- */

/// Validates that an HTTP endpoint starts with `http://` or `https://`.
///
/// # Errors
/// Returns [`AiLlmError::Config`] with [`ConfigError::InvalidFormat`] when
/// the string does not start with a valid HTTP scheme.
pub fn validate_http_endpoint(var: &'static str, value: &str) -> Result<()> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidFormat {
            var,
            reason: "must start with http:// or https://",
        }
        .into())
    }
}

/// Validates that a floating-point value lies within an inclusive range.
///
/// # Errors
/// Returns [`AiLlmError::Config`] with [`ConfigError::OutOfRange`] if `value`
/// is outside `[min, max]`.
pub fn validate_range_f32(field: &'static str, value: f32, min: f32, max: f32) -> Result<()> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            detail: "expected value in inclusive range",
        }
        .into())
    }
}
