//! Default LLM config loaded from environment variables.
//!
//! Only **Gemini** is supported. The API key is optional here: a deployment
//! without `GEMINI_API_KEY` still boots, and the routes that need the model
//! answer with a "missing credential" error instead.
//!
//! # Environment variables
//!
//! - `GEMINI_API_KEY`      = service credential (optional)
//! - `GEMINI_ENDPOINT`     = base URL (default `https://generativelanguage.googleapis.com`)
//! - `GEMINI_MODEL`        = model id (default `gemini-2.5-flash`)
//! - `GEMINI_TIMEOUT_SECS` = outbound timeout in seconds (default `30`)
//! - `GEMINI_TEMPERATURE`  = optional sampling temperature (`0.0..=2.0`)
//! - `LLM_MAX_TOKENS`      = optional max output tokens (u32)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        AiLlmError, ConfigError, env_opt, env_opt_f32, env_opt_u32, env_opt_u64,
        validate_http_endpoint, validate_range_f32,
    },
};

pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Constructs the Gemini text-generation config.
///
/// # Errors
///
/// - [`ConfigError::InvalidFormat`] if `GEMINI_ENDPOINT` is not http(s)
/// - [`ConfigError::InvalidNumber`] for unparsable numeric variables
/// - [`ConfigError::OutOfRange`] for a temperature outside `0.0..=2.0`
/// - [`ConfigError::OutOfRange`] for a zero timeout
pub fn config_gemini() -> Result<LlmModelConfig, AiLlmError> {
    let endpoint = env_opt("GEMINI_ENDPOINT").unwrap_or_else(|| DEFAULT_GEMINI_ENDPOINT.into());
    validate_http_endpoint("GEMINI_ENDPOINT", &endpoint)?;

    let model = env_opt("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.into());

    let temperature = env_opt_f32("GEMINI_TEMPERATURE")?;
    if let Some(t) = temperature {
        validate_range_f32("temperature", t, 0.0, 2.0)?;
    }

    let timeout_secs = env_opt_u64("GEMINI_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS);
    if timeout_secs == 0 {
        return Err(ConfigError::OutOfRange {
            field: "GEMINI_TIMEOUT_SECS",
            detail: "expected at least 1 second",
        }
        .into());
    }

    Ok(LlmModelConfig {
        provider: LlmProvider::Gemini,
        model,
        endpoint,
        api_key: env_opt(LlmProvider::Gemini.credential_var()),
        max_tokens: env_opt_u32("LLM_MAX_TOKENS")?,
        temperature,
        top_p: None,
        timeout_secs: Some(timeout_secs),
    })
}
