//! Repair advice for detected PCB defects.
//!
//! Flow: [`DefectClassification`] → [`prompt`] → LLM via
//! [`TextGenerator`](ai_llm_service::text_generator::TextGenerator) →
//! [`json_extract`] → [`RepairAdvice`] validation.

pub mod advice;
pub mod defect;
pub mod demo_results;
pub mod errors;
pub mod generation;
pub mod json_extract;
pub mod prompt;
pub mod requestor;

pub use advice::{RepairAdvice, RiskLevel};
pub use defect::DefectClassification;
pub use errors::{AdviceError, AdviceResult};
pub use requestor::AdviceRequestor;
