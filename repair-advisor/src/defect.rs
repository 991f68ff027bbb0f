use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{AdviceError, AdviceResult};

/// Upstream classification of one detected PCB fault.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefectClassification {
    pub defect_id: String,
    pub label: String,
    /// Classifier confidence in `0.0..=1.0`.
    pub confidence: f64,
}

impl DefectClassification {
    /// Builds a classification, enforcing [`DefectClassification::validate`].
    pub fn new(
        defect_id: impl Into<String>,
        label: impl Into<String>,
        confidence: f64,
    ) -> AdviceResult<Self> {
        let c = Self {
            defect_id: defect_id.into(),
            label: label.into(),
            confidence,
        };
        c.validate()?;
        Ok(c)
    }

    /// Reads a classification from an untyped JSON body.
    ///
    /// Unlike plain serde deserialization this reports which field is at
    /// fault, and never coerces (`"0.9"` is not a confidence).
    pub fn from_json(body: &Value) -> AdviceResult<Self> {
        let Some(obj) = body.as_object() else {
            return Err(AdviceError::InvalidInput("body must be a JSON object".into()));
        };

        let text = |key: &str| -> AdviceResult<String> {
            match obj.get(key) {
                Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
                Some(Value::String(_)) => Err(AdviceError::InvalidInput(format!("`{key}` is empty"))),
                Some(_) => Err(AdviceError::InvalidInput(format!("`{key}` must be a string"))),
                None => Err(AdviceError::InvalidInput(format!("`{key}` is missing"))),
            }
        };

        let defect_id = text("defectId")?;
        let label = text("label")?;
        let confidence = match obj.get("confidence") {
            Some(Value::Number(n)) => n.as_f64().ok_or_else(|| {
                AdviceError::InvalidInput("`confidence` is not representable as f64".into())
            })?,
            Some(_) => {
                return Err(AdviceError::InvalidInput(
                    "`confidence` must be a number".into(),
                ));
            }
            None => return Err(AdviceError::InvalidInput("`confidence` is missing".into())),
        };

        Self::new(defect_id, label, confidence)
    }

    /// Checks field invariants.
    ///
    /// # Errors
    /// [`AdviceError::InvalidInput`] for empty identifiers or a confidence
    /// outside `0.0..=1.0`.
    pub fn validate(&self) -> AdviceResult<()> {
        if self.defect_id.trim().is_empty() {
            return Err(AdviceError::InvalidInput("`defectId` is empty".into()));
        }
        if self.label.trim().is_empty() {
            return Err(AdviceError::InvalidInput("`label` is empty".into()));
        }
        if !(self.confidence.is_finite() && (0.0..=1.0).contains(&self.confidence)) {
            return Err(AdviceError::InvalidInput(format!(
                "`confidence` must be within 0.0..=1.0, got {}",
                self.confidence
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn invalid(v: Value) -> String {
        match DefectClassification::from_json(&v) {
            Err(AdviceError::InvalidInput(msg)) => msg,
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn reads_well_formed_body() {
        let c = DefectClassification::from_json(
            &json!({ "defectId": "D-OC-01", "label": "Open Circuit", "confidence": 0.93, "extra": 1 }),
        )
        .unwrap();
        assert_eq!(c.defect_id, "D-OC-01");
        assert_eq!(c.label, "Open Circuit");
        assert_eq!(c.confidence, 0.93);
    }

    #[test]
    fn integer_confidence_is_a_number() {
        let c = DefectClassification::from_json(&json!({ "defectId": "a", "label": "b", "confidence": 1 }))
            .unwrap();
        assert_eq!(c.confidence, 1.0);
    }

    #[test]
    fn rejects_missing_and_mistyped_fields() {
        assert!(invalid(json!({ "label": "b", "confidence": 0.5 })).contains("defectId"));
        assert!(invalid(json!({ "defectId": "", "label": "b", "confidence": 0.5 })).contains("defectId"));
        assert!(invalid(json!({ "defectId": "a", "label": 7, "confidence": 0.5 })).contains("label"));
        assert!(invalid(json!({ "defectId": "a", "label": "b", "confidence": "0.5" })).contains("confidence"));
        assert!(invalid(json!({ "defectId": "a", "label": "b" })).contains("confidence"));
        assert!(invalid(json!([1, 2])).contains("object"));
        assert!(invalid(Value::Null).contains("object"));
    }

    #[test]
    fn rejects_confidence_outside_unit_interval() {
        assert!(invalid(json!({ "defectId": "a", "label": "b", "confidence": 1.2 })).contains("0.0..=1.0"));
        assert!(DefectClassification::new("a", "b", f64::NAN).is_err());
        assert!(DefectClassification::new("a", "b", -0.1).is_err());
    }

    #[test]
    fn serializes_camel_case() {
        let c = DefectClassification::new("D-SP-04", "Spur", 0.87).unwrap();
        assert_eq!(
            serde_json::to_value(&c).unwrap(),
            json!({ "defectId": "D-SP-04", "label": "Spur", "confidence": 0.87 })
        );
    }
}
