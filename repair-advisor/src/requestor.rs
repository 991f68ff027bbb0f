//! Advice Requestor: classification in, validated [`RepairAdvice`] out.
//!
//! Stateless per call and never retries on its own. Concurrent calls share
//! nothing except the optional [`GenerationTracker`] used by
//! [`AdviceRequestor::request_tracked`].

use std::{sync::Arc, time::Duration};

use ai_llm_service::{error_handler::AiLlmError, text_generator::TextGenerator};
use tracing::{debug, info, instrument, warn};

use crate::{
    advice::RepairAdvice,
    defect::DefectClassification,
    errors::{AdviceError, AdviceResult},
    generation::GenerationTracker,
    json_extract::extract_json_object,
    prompt::build_repair_prompt,
};

pub struct AdviceRequestor {
    generator: Arc<dyn TextGenerator>,
    timeout: Option<Duration>,
    generations: GenerationTracker,
}

impl AdviceRequestor {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            timeout: None,
            generations: GenerationTracker::new(),
        }
    }

    /// Bounds each generation call; elapsed calls fail as upstream timeouts.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn generations(&self) -> &GenerationTracker {
        &self.generations
    }

    /// Requests advice for `defect`.
    ///
    /// # Errors
    /// - [`AdviceError::InvalidInput`] if `defect` breaks its invariants
    /// - [`AdviceError::UpstreamService`] on transport/status/timeout failures
    /// - [`AdviceError::MalformedResponse`] if no JSON object is in the reply
    /// - [`AdviceError::UnexpectedShape`] if the reply is JSON but not a valid advice object
    #[instrument(
        name = "advice_request",
        skip(self, defect),
        fields(defect_id = %defect.defect_id, model = %self.generator.model())
    )]
    pub async fn request(&self, defect: &DefectClassification) -> AdviceResult<RepairAdvice> {
        defect.validate()?;

        let prompt = build_repair_prompt(defect);
        debug!(prompt_len = prompt.len(), "prompt built");

        let raw = self.generate(&prompt).await?;
        debug!(reply_len = raw.len(), "model replied");

        let object = extract_json_object(&raw).inspect_err(|e| {
            warn!(
                error = %e,
                reply_len = raw.len(),
                "could not recover a JSON object from model reply"
            );
        })?;

        let advice = RepairAdvice::from_extracted(object, &raw).inspect_err(|e| {
            warn!(error = %e, "model reply has unexpected shape");
        })?;

        info!(
            risk = ?advice.risk_level,
            repairable = advice.repairable,
            "repair advice ready"
        );
        Ok(advice)
    }

    /// Like [`AdviceRequestor::request`], but last-request-wins per `key`.
    ///
    /// If another call for the same key starts before this one completes,
    /// this call's outcome is discarded with [`AdviceError::Superseded`].
    pub async fn request_tracked(
        &self,
        key: impl Into<String>,
        defect: &DefectClassification,
    ) -> AdviceResult<RepairAdvice> {
        // Dropping this future mid-call drops the ticket, which clears the key.
        let ticket = self.generations.begin(key);
        let outcome = self.request(defect).await;

        let key = ticket.key().to_string();
        let generation = ticket.generation();
        if ticket.finish() {
            outcome
        } else {
            info!(%key, generation, "discarding superseded advice result");
            Err(AdviceError::Superseded { generation })
        }
    }

    async fn generate(&self, prompt: &str) -> AdviceResult<String> {
        let call = self.generator.generate(prompt);
        let raw = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| AiLlmError::Timeout(limit))??,
            None => call.await?,
        };
        Ok(raw)
    }
}
