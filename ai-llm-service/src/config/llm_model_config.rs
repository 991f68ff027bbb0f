use crate::config::llm_provider::LlmProvider;

/// Configuration for an LLM model invocation.
///
/// Built once at startup and injected into the service; nothing in this
/// crate reads the environment after construction.
///
/// # Examples
///
/// ```
/// use ai_llm_service::config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
///
/// let cfg = LlmModelConfig {
///     provider: LlmProvider::Gemini,
///     model: "gemini-2.5-flash".to_string(),
///     endpoint: "https://generativelanguage.googleapis.com".to_string(),
///     api_key: Some("AIza...".to_string()),
///     max_tokens: Some(1024),
///     temperature: Some(0.4),
///     top_p: None,
///     timeout_secs: Some(30),
/// };
/// assert!(cfg.has_api_key());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    /// The LLM provider/backend.
    pub provider: LlmProvider,

    /// Model identifier string (e.g., `"gemini-2.5-flash"`).
    pub model: String,

    /// Base URL of the provider API.
    pub endpoint: String,

    /// API key; `None` when the deployment has no credential configured.
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature.
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Request timeout (in seconds). Defaults to 30 when unset.
    pub timeout_secs: Option<u64>,
}

impl LlmModelConfig {
    /// True when a non-empty API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}
