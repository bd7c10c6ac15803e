//! Completion provider abstraction and implementations.
//!
//! Supports Anthropic Claude and `OpenAI` via a common trait. Extraction
//! needs exactly one request/response interaction per document, so the
//! trait surface is a single prompt-in, text-out call.

pub mod anthropic;
pub mod openai;

use crate::AiError;

/// Sampling temperature for all extraction calls. Field extraction wants
/// deterministic output, not creativity.
pub const TEMPERATURE: f32 = 0.0;

/// Upper bound on response length. The filled-in JSON skeleton plus any
/// surrounding prose fits comfortably within this.
pub const MAX_TOKENS: u32 = 4096;

/// Trait for LLM completion providers.
#[async_trait::async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Sends a single completion request and returns the model's free-form
    /// text response.
    ///
    /// # Errors
    ///
    /// Returns [`AiError`] if the request fails.
    async fn complete(&self, prompt: &str) -> Result<String, AiError>;
}

/// Creates a completion provider based on environment variables.
///
/// If `AI_PROVIDER` is explicitly set, uses that provider. Otherwise
/// auto-detects from available credentials:
///
/// 1. `OPENAI_API_KEY` set -> `OpenAI` GPT
/// 2. `ANTHROPIC_API_KEY` set -> Anthropic Claude
///
/// `AI_MODEL` overrides the per-provider default model, and `AI_BASE_URL`
/// points the `OpenAI` provider at a compatible local/self-hosted server
/// (Ollama, vLLM, llama.cpp).
///
/// # Errors
///
/// Returns [`AiError::Config`] if no credentials are found or the
/// explicitly requested provider is not configured.
pub fn create_provider_from_env() -> Result<Box<dyn CompletionProvider>, AiError> {
    let provider = std::env::var("AI_PROVIDER").unwrap_or_else(|_| detect_provider());

    match provider.to_lowercase().as_str() {
        "openai" | "gpt" => {
            let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| AiError::Config {
                message: "OPENAI_API_KEY environment variable not set".to_string(),
            })?;
            let model = std::env::var("AI_MODEL").unwrap_or_else(|_| "gpt-4o".to_string());
            let mut provider = openai::OpenAiProvider::new(api_key, model);
            if let Ok(base_url) = std::env::var("AI_BASE_URL") {
                provider = provider.with_base_url(base_url);
            }
            Ok(Box::new(provider))
        }
        "anthropic" | "claude" => {
            let api_key = std::env::var("ANTHROPIC_API_KEY").map_err(|_| AiError::Config {
                message: "ANTHROPIC_API_KEY environment variable not set".to_string(),
            })?;
            let model = std::env::var("AI_MODEL")
                .unwrap_or_else(|_| "claude-sonnet-4-20250514".to_string());
            Ok(Box::new(anthropic::AnthropicProvider::new(api_key, model)))
        }
        other => Err(AiError::Config {
            message: format!("Unknown AI provider: {other}. Use 'openai' or 'anthropic'."),
        }),
    }
}

/// Auto-detects which provider to use based on available credentials.
///
/// Returns a provider name string that matches the arms in
/// [`create_provider_from_env`].
fn detect_provider() -> String {
    if std::env::var("OPENAI_API_KEY").is_ok() {
        log::info!("Auto-detected AI provider: OpenAI (OPENAI_API_KEY found)");
        return "openai".to_string();
    }

    if std::env::var("ANTHROPIC_API_KEY").is_ok() {
        log::info!("Auto-detected AI provider: Anthropic (ANTHROPIC_API_KEY found)");
        return "anthropic".to_string();
    }

    log::warn!(
        "No AI credentials detected. Set OPENAI_API_KEY or ANTHROPIC_API_KEY. \
         You can also set AI_PROVIDER explicitly."
    );

    // Fall back to openai — will produce a clear error about missing key
    "openai".to_string()
}
