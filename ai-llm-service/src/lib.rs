//! Shared LLM plumbing for the PCB repair advisor.
//!
//! - [`config`]: provider/model configuration, loaded once from env
//! - [`services::gemini_service`]: Gemini REST client
//! - [`text_generator::TextGenerator`]: provider-agnostic generation seam
//! - [`error_handler`]: unified [`AiLlmError`](error_handler::AiLlmError)
//! - [`telemetry`]: workspace-scoped tracing layer

pub mod config;
pub mod error_handler;
pub mod services;
pub mod telemetry;
pub mod text_generator;
