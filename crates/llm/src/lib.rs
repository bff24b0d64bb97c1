//! Chat-completion client and structured generation for the writing stages.
//!
//! Provides OpenAI-compatible request/response types, a [`reqwest`]-backed
//! API client, the [`ChatCompleter`] seam the HTTP handlers depend on, JSON
//! parsing helpers, and the bounded repair loop that coaxes a complete
//! 40-beat sheet out of the model.

pub mod api;
pub mod beats;
pub mod completer;
pub mod error;
pub mod messages;
#[cfg(any(test, feature = "test-util"))]
pub mod scripted;
pub mod structured;

pub use api::{LlmConfig, OpenAiApi};
pub use completer::ChatCompleter;
pub use error::LlmError;
