//! Prompt construction for repair advice.

use crate::defect::DefectClassification;

/// Fixed instruction block; the classification JSON is appended after `Input:`.
const REPAIR_ADVICE_TEMPLATE: &str = r#"Return ONLY valid JSON. No extra text.

You are a PCB repair/rework advisor.
Given the defect info, output JSON in EXACT shape:

{
  "repairable": true/false,
  "worthRepairing": true/false,
  "estimatedCostINR": 0,
  "estimatedTimeHours": 0,
  "riskLevel": "low" | "medium" | "high",
  "recommendation": "string",
  "notes": ["string"]
}

Use INR estimates suitable for a student lab demo."#;

/// Builds the repair-advice prompt for `defect`.
pub fn build_repair_prompt(defect: &DefectClassification) -> String {
    // Three scalar fields; serialization does not fail in practice.
    let input = serde_json::to_string(defect).unwrap_or_else(|_| format!("{defect:?}"));
    format!("{REPAIR_ADVICE_TEMPLATE}\n\nInput:\n{input}")
}
