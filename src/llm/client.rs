use anyhow::Result;
use async_trait::async_trait;

use crate::config::Settings;
use crate::llm::gemini::GeminiClient;
use crate::llm::openai::OpenAiClient;

/// A text-generation service that turns one prompt into one completion.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send a single prompt, without conversation history, and return the
    /// completion text.
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Provider name for logs and diagnostics
    fn name(&self) -> &'static str;
}

/// Build an LLM provider from runtime settings.
pub fn build_provider(settings: &Settings) -> Result<Box<dyn LlmProvider>> {
    match settings.llm.provider.to_lowercase().as_str() {
        "openai" => Ok(Box::new(OpenAiClient::from_settings(settings)?)),
        "gemini" => Ok(Box::new(GeminiClient::from_settings(settings)?)),
        other => anyhow::bail!(
            "Unsupported llm.provider '{}'. Supported providers: openai, gemini",
            other
        ),
    }
}

/// Resolve a configured value, falling back to a default when blank.
pub(crate) fn setting_or(value: &str, default: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    #[test]
    fn unsupported_provider_returns_error() {
        let mut settings = Settings::default();
        settings.llm.provider = "unknown".to_string();

        let err = match build_provider(&settings) {
            Ok(_) => panic!("expected provider creation to fail"),
            Err(e) => e.to_string(),
        };
        assert!(err.contains("Unsupported llm.provider"));
    }

    #[test]
    fn openai_provider_requires_api_key() {
        let settings = Settings::default();

        let err = match build_provider(&settings) {
            Ok(_) => panic!("expected provider creation to fail"),
            Err(e) => e.to_string(),
        };
        assert!(err.contains("OpenAI API key is missing"));
    }

    #[test]
    fn gemini_provider_requires_api_key() {
        let mut settings = Settings::default();
        settings.llm.provider = "Gemini".to_string();

        let err = match build_provider(&settings) {
            Ok(_) => panic!("expected provider creation to fail"),
            Err(e) => e.to_string(),
        };
        assert!(err.contains("Gemini API key is missing"));
    }

    #[test]
    fn provider_is_selected_by_name() {
        let mut settings = Settings::default();
        settings.llm.api_key = "test-key".to_string();

        let provider = build_provider(&settings).unwrap();
        assert_eq!(provider.name(), "openai");

        settings.llm.provider = "gemini".to_string();
        let provider = build_provider(&settings).unwrap();
        assert_eq!(provider.name(), "gemini");
    }

    #[test]
    fn blank_settings_fall_back_to_defaults() {
        assert_eq!(setting_or("  ", "x"), "x");
        assert_eq!(setting_or(" y ", "x"), "y");
    }
}
