//! Gemini service for text generation and model listing.
//!
//! Minimal, non-streaming client around the Generative Language REST API.
//! Endpoints are derived from `LlmModelConfig::endpoint`:
//! - POST {endpoint}/v1beta/models/{model}:generateContent: text generation
//! - GET  {endpoint}/v1beta/models: ListModels
//!
//! The API key travels in the `x-goog-api-key` header so request URLs can be
//! logged safely.
//!
//! Constructor validation:
//! - `cfg.api_key` must be present
//! - `cfg.endpoint` must start with http:// or https://

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::{
    config::{default_config::DEFAULT_TIMEOUT_SECS, llm_model_config::LlmModelConfig},
    error_handler::{AiLlmError, ConfigError, HttpError, validate_http_endpoint},
    text_generator::TextGenerator,
};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Thin client for the Gemini API.
///
/// Keeps a preconfigured `reqwest::Client` (timeout + auth header).
#[derive(Debug)]
pub struct GeminiService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    timeout: Duration,
    url_generate: String,
    url_models: String,
}

impl GeminiService {
    /// Creates a new [`GeminiService`] from the given config.
    ///
    /// # Errors
    /// - [`ConfigError::InvalidFormat`] if the endpoint is not http(s)
    /// - [`ConfigError::MissingApiKey`] if `cfg.api_key` is `None` or empty
    /// - [`ConfigError::EmptyModel`] if the model name is empty
    /// - [`AiLlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        let endpoint = cfg.endpoint.trim();
        validate_http_endpoint("GEMINI_ENDPOINT", endpoint)?;

        if !cfg.has_api_key() {
            return Err(ConfigError::MissingApiKey(cfg.provider.credential_var()).into());
        }
        let api_key = cfg.api_key.clone().unwrap_or_default();

        let model = cfg.model.trim().trim_start_matches("models/");
        if model.is_empty() {
            return Err(ConfigError::EmptyModel.into());
        }

        let timeout = Duration::from_secs(cfg.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));

        let mut headers = header::HeaderMap::new();
        let mut key_value = header::HeaderValue::from_str(api_key.trim()).map_err(|e| {
            AiLlmError::Decode(format!("API key is not a valid header value: {e}"))
        })?;
        key_value.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key_value);
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        let base = endpoint.trim_end_matches('/');
        let url_generate = format!("{base}/v1beta/models/{model}:generateContent");
        let url_models = format!("{base}/v1beta/models");

        info!(
            provider = ?cfg.provider,
            model = %model,
            endpoint = %cfg.endpoint,
            timeout_secs = timeout.as_secs(),
            "GeminiService initialized"
        );

        Ok(Self {
            client,
            cfg,
            timeout,
            url_generate,
            url_models,
        })
    }

    /// Performs a single **non-streaming** `generateContent` call.
    ///
    /// Concatenates the text parts of the first candidate.
    ///
    /// # Errors
    /// - [`AiLlmError::HttpStatus`] for non-2xx responses
    /// - [`AiLlmError::Timeout`] when the configured timeout elapses
    /// - [`AiLlmError::HttpTransport`] for other client/network failures
    /// - [`AiLlmError::Decode`] if the JSON cannot be parsed
    /// - [`AiLlmError::EmptyCandidates`] if no text was returned
    pub async fn generate_content(&self, prompt: &str) -> Result<String, AiLlmError> {
        let started = Instant::now();
        let body = GenerateContentRequest::from_cfg(&self.cfg, prompt);

        debug!(
            model = %self.cfg.model,
            prompt_len = prompt.len(),
            "POST {}", self.url_generate
        );

        let resp = self
            .client
            .post(&self.url_generate)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            let err = HttpError::new(status, self.url_generate.clone(), text);

            error!(
                %status,
                url = %err.url,
                snippet = %err.snippet,
                model = %self.cfg.model,
                latency_ms = started.elapsed().as_millis(),
                "Gemini generateContent returned non-success status"
            );
            return Err(err.into());
        }

        let out: GenerateContentResponse = resp.json().await.map_err(|e| {
            error!(
                error = %e,
                model = %self.cfg.model,
                latency_ms = started.elapsed().as_millis(),
                "failed to decode generateContent response"
            );
            AiLlmError::Decode(format!(
                "serde error: {e}; expected `candidates[0].content.parts[].text`"
            ))
        })?;

        let text = out.first_text().ok_or_else(|| AiLlmError::EmptyCandidates {
            block_reason: out.prompt_feedback.and_then(|f| f.block_reason),
        })?;

        info!(
            model = %self.cfg.model,
            latency_ms = started.elapsed().as_millis(),
            reply_len = text.len(),
            "generateContent completed"
        );

        Ok(text)
    }

    /// Lists models visible to the configured key (single page).
    ///
    /// # Errors
    /// Same transport/status/decode classes as [`GeminiService::generate_content`].
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>, AiLlmError> {
        let started = Instant::now();
        debug!("GET {}", self.url_models);

        let resp = self
            .client
            .get(&self.url_models)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            let err = HttpError::new(status, self.url_models.clone(), text);
            error!(
                %status,
                url = %err.url,
                snippet = %err.snippet,
                latency_ms = started.elapsed().as_millis(),
                "Gemini ListModels returned non-success status"
            );
            return Err(err.into());
        }

        let out: ListModelsResponse = resp
            .json()
            .await
            .map_err(|e| AiLlmError::Decode(format!("serde error: {e}; expected `models[]`")))?;

        info!(
            count = out.models.len(),
            latency_ms = started.elapsed().as_millis(),
            "ListModels completed"
        );

        Ok(out.models)
    }

    fn transport_error(&self, e: reqwest::Error) -> AiLlmError {
        if e.is_timeout() {
            error!(timeout_secs = self.timeout.as_secs(), "Gemini request timed out");
            AiLlmError::Timeout(self.timeout)
        } else {
            error!(error = %e, "Gemini transport failure");
            AiLlmError::HttpTransport(e)
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiService {
    async fn generate(&self, prompt: &str) -> Result<String, AiLlmError> {
        self.generate_content(prompt).await
    }

    fn model(&self) -> &str {
        &self.cfg.model
    }
}

/* ===========================================================================
HTTP payloads
======================================================================== */

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig", skip_serializing_if = "GenerationConfig::is_empty")]
    generation_config: GenerationConfig,
}

impl<'a> GenerateContentRequest<'a> {
    fn from_cfg(cfg: &LlmModelConfig, prompt: &'a str) -> Self {
        Self {
            contents: vec![Content {
                role: "user",
                parts: vec![PartIn { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: cfg.temperature,
                top_p: cfg.top_p,
                max_output_tokens: cfg.max_tokens,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<PartIn<'a>>,
}

#[derive(Debug, Serialize)]
struct PartIn<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

impl GenerationConfig {
    fn is_empty(&self) -> bool {
        self.temperature.is_none() && self.top_p.is_none() && self.max_output_tokens.is_none()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

impl GenerateContentResponse {
    fn first_text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.trim().is_empty() { None } else { Some(text) }
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<PartOut>,
}

#[derive(Debug, Deserialize)]
struct PartOut {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

/// One entry of the ListModels answer.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    /// Resource name, e.g. `models/gemini-2.5-flash`.
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub supported_generation_methods: Vec<String>,
}
