/// Represents the provider (backend) used for large language model (LLM) inference.
///
/// Only Google's Gemini REST API is wired today. Adding a provider means
/// extending this enum and adding a service under `services/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// Google Gemini (`generativelanguage.googleapis.com`).
    Gemini,
}

impl LlmProvider {
    /// Name of the environment variable holding this provider's credential.
    pub fn credential_var(self) -> &'static str {
        match self {
            LlmProvider::Gemini => "GEMINI_API_KEY",
        }
    }
}
