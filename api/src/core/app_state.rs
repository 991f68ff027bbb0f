use std::{sync::Arc, time::Duration};

use ai_llm_service::{
    config::default_config::DEFAULT_TIMEOUT_SECS, services::gemini_service::GeminiService,
};
use repair_advisor::AdviceRequestor;
use tracing::warn;

use crate::{core::config::ApiConfig, error_handler::AppError};

/// Shared state for all HTTP handlers.
pub struct AppState {
    pub config: ApiConfig,
    /// `None` when no Gemini credential is configured.
    pub gemini: Option<Arc<GeminiService>>,
    /// Shares the Gemini client above; `None` under the same condition.
    pub advisor: Option<Arc<AdviceRequestor>>,
}

impl AppState {
    /// Builds the Gemini client and advice requestor from `config`.
    ///
    /// A missing API key is tolerated: the state is built without a client
    /// and the model-backed routes report the missing credential.
    pub fn from_config(config: ApiConfig) -> Result<Self, AppError> {
        if !config.llm.has_api_key() {
            warn!(
                var = config.llm.provider.credential_var(),
                "no Gemini credential configured, model-backed routes will answer 500"
            );
            return Ok(Self {
                config,
                gemini: None,
                advisor: None,
            });
        }

        let gemini = Arc::new(GeminiService::new(config.llm.clone())?);
        let timeout = Duration::from_secs(config.llm.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));
        let advisor = Arc::new(AdviceRequestor::new(gemini.clone()).with_timeout(timeout));

        Ok(Self {
            config,
            gemini: Some(gemini),
            advisor: Some(advisor),
        })
    }

    /// Name of the env var holding the Gemini credential.
    pub fn credential_var(&self) -> &'static str {
        self.config.llm.provider.credential_var()
    }
}
