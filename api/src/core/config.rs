//! HTTP-side configuration, read once at startup.
//!
//! - `API_ADDRESS` = listen address (default `127.0.0.1:8080`)
//! - `AUTH_TOKEN`  = bearer token accepted on protected routes (required)
//!
//! The Gemini part comes from [`config_gemini`].

use ai_llm_service::{
    config::{default_config::config_gemini, llm_model_config::LlmModelConfig},
    error_handler::{env_opt, must_env},
};

use crate::error_handler::AppError;

pub const DEFAULT_API_ADDRESS: &str = "127.0.0.1:8080";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_address: String,
    pub auth_token: String,
    pub llm: LlmModelConfig,
}

impl ApiConfig {
    /// Loads the configuration from environment variables.
    ///
    /// # Errors
    /// [`AppError::Config`] when `AUTH_TOKEN` is missing or a Gemini variable
    /// is malformed. A missing `GEMINI_API_KEY` is not an error here.
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            api_address: env_opt("API_ADDRESS").unwrap_or_else(|| DEFAULT_API_ADDRESS.into()),
            auth_token: must_env("AUTH_TOKEN")?,
            llm: config_gemini()?,
        })
    }
}
