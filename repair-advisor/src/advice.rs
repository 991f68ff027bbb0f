use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::errors::{AdviceError, AdviceResult};

/// Repair risk bucket as reported by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Structured repair recommendation for one defect.
///
/// Deserialization is strict: every field must be present with its declared
/// JSON type. Numbers must be JSON numbers (`"500"` is rejected), `riskLevel`
/// must be one of `low`/`medium`/`high`, and `notes` must be an array of
/// strings. Extra keys are ignored.
///
/// Estimates stay [`Number`]s so they serialize back exactly as the model
/// wrote them (`450` stays `450`, not `450.0`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairAdvice {
    pub repairable: bool,
    #[serde(rename = "worthRepairing")]
    pub worth_repairing: bool,
    #[serde(rename = "estimatedCostINR")]
    pub estimated_cost_inr: Number,
    #[serde(rename = "estimatedTimeHours")]
    pub estimated_time_hours: Number,
    #[serde(rename = "riskLevel")]
    pub risk_level: RiskLevel,
    pub recommendation: String,
    pub notes: Vec<String>,
}

impl RepairAdvice {
    /// Validates an extracted object against the advice shape.
    ///
    /// # Errors
    /// [`AdviceError::UnexpectedShape`] carrying `raw` when any field is
    /// missing, mistyped, or outside its enum.
    pub fn from_extracted(object: Map<String, Value>, raw: &str) -> AdviceResult<Self> {
        serde_json::from_value(Value::Object(object)).map_err(|e| AdviceError::UnexpectedShape {
            reason: e.to_string(),
            raw: raw.to_string(),
        })
    }
}
