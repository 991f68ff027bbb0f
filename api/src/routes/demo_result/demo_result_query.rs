use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct DemoResultQuery {
    #[serde(default)]
    pub id: Option<String>,
}

impl DemoResultQuery {
    /// Trimmed, non-empty id.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}
