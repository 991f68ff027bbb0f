use ai_llm_service::services::gemini_service::ModelInfo;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ListModelsResponse {
    pub models: Vec<ModelSummary>,
}

/// The fields of a Gemini model entry worth showing to a client.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSummary {
    /// e.g. `models/gemini-2.5-flash`
    pub name: String,
    pub display_name: Option<String>,
    pub supported_methods: Vec<String>,
}

impl From<ModelInfo> for ModelSummary {
    fn from(m: ModelInfo) -> Self {
        Self {
            name: m.name,
            display_name: m.display_name,
            supported_methods: m.supported_generation_methods,
        }
    }
}
