#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! LLM completion clients and response handling for fact sheet extraction.
//!
//! Supports Anthropic Claude, `OpenAI` GPT, and any `OpenAI`-compatible
//! server via the `AI_BASE_URL` environment variable. The extraction flow
//! is a single completion per document: [`prompt`] renders the instruction
//! template around the document text, a [`providers::CompletionProvider`]
//! returns the model's free-form answer, and [`response`] pulls the fenced
//! JSON blocks back out of it.

pub mod prompt;
pub mod providers;
pub mod response;

use thiserror::Error;

/// Errors that can occur during AI operations.
#[derive(Debug, Error)]
pub enum AiError {
    /// HTTP request to LLM provider failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Provider-specific error.
    #[error("Provider error: {message}")]
    Provider {
        /// Description of what went wrong.
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config {
        /// Description.
        message: String,
    },
}
