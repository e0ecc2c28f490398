use super::anthropic::AnthropicProvider;
use super::ollama::OllamaProvider;
use super::openai::OpenAiProvider;
use super::traits::{ChatOptions, ChatProvider};
use crate::error::ConfigError;
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString};

/// Supported chat backends. Parsing is case-insensitive and accepts
/// `anthropic` as an alias for `claude`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum ProviderKind {
    #[default]
    #[strum(to_string = "openai", serialize = "gpt")]
    OpenAi,
    #[strum(to_string = "mistral")]
    Mistral,
    #[strum(to_string = "groq")]
    Groq,
    #[strum(to_string = "claude", serialize = "anthropic")]
    Claude,
    #[strum(to_string = "ollama")]
    Ollama,
}

impl ProviderKind {
    pub fn parse(name: &str) -> Result<Self, ConfigError> {
        Self::from_str(name.trim()).map_err(|_| ConfigError::UnknownProvider(name.to_string()))
    }

    pub fn default_model(self) -> &'static str {
        match self {
            Self::OpenAi => "gpt-4o-mini",
            Self::Mistral => "mistral-large-latest",
            Self::Groq => "llama-3.3-70b-versatile",
            Self::Claude => "claude-3-5-sonnet-latest",
            Self::Ollama => "llama3.1",
        }
    }

    /// Provider-specific API key variable; `None` for keyless local backends.
    pub fn api_key_env(self) -> Option<&'static str> {
        match self {
            Self::OpenAi => Some("OPENAI_API_KEY"),
            Self::Mistral => Some("MISTRAL_API_KEY"),
            Self::Groq => Some("GROQ_API_KEY"),
            Self::Claude => Some("ANTHROPIC_API_KEY"),
            Self::Ollama => None,
        }
    }
}

/// Resolve the API key for a provider.
///
/// Resolution order:
/// 1. Explicitly provided `api_key` (trimmed, filtered if empty)
/// 2. Provider-specific environment variable (e.g. `OPENAI_API_KEY`)
/// 3. Generic fallback `STORYSMITH_API_KEY`
pub fn resolve_api_key(kind: ProviderKind, explicit_api_key: Option<&str>) -> Option<String> {
    if let Some(key) = explicit_api_key.map(str::trim).filter(|k| !k.is_empty()) {
        return Some(key.to_string());
    }

    kind.api_key_env()
        .into_iter()
        .chain(["STORYSMITH_API_KEY"])
        .find_map(|env_var| {
            std::env::var(env_var)
                .ok()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        })
}

/// Where a provider should send its requests. `None` means the public default.
#[derive(Debug, Clone, Default)]
pub struct ProviderEndpoint<'a> {
    pub api_key: Option<&'a str>,
    pub base_url: Option<&'a str>,
}

pub fn create_provider(
    kind: ProviderKind,
    endpoint: &ProviderEndpoint<'_>,
    options: ChatOptions,
) -> Box<dyn ChatProvider> {
    let api_key = endpoint.api_key;
    match kind {
        ProviderKind::OpenAi => Box::new(OpenAiProvider::compatible(
            "OpenAI",
            endpoint.base_url.unwrap_or(super::openai::OPENAI_BASE_URL),
            "OPENAI_API_KEY",
            api_key,
            options,
        )),
        ProviderKind::Mistral => Box::new(OpenAiProvider::compatible(
            "Mistral",
            endpoint.base_url.unwrap_or("https://api.mistral.ai/v1"),
            "MISTRAL_API_KEY",
            api_key,
            options,
        )),
        ProviderKind::Groq => Box::new(OpenAiProvider::compatible(
            "Groq",
            endpoint.base_url.unwrap_or("https://api.groq.com/openai/v1"),
            "GROQ_API_KEY",
            api_key,
            options,
        )),
        ProviderKind::Claude => Box::new(AnthropicProvider::with_base_url(
            api_key,
            endpoint.base_url,
            options,
        )),
        // Ollama ignores the api key since it's a local service.
        ProviderKind::Ollama => Box::new(OllamaProvider::new(endpoint.base_url, options)),
    }
}
