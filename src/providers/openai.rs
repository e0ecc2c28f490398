use crate::error::LlmError;
use crate::providers::{
    ChatMessage, ChatReply, build_provider_client,
    traits::{ChatOptions, ChatProvider, price_reply},
};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Chat-completions adapter for OpenAI and the OpenAI-compatible backends
/// (Mistral, Groq). Only the base URL, display name and key variable differ.
pub struct OpenAiProvider {
    name: String,
    key_env_var: &'static str,
    /// Pre-computed `"Bearer <key>"` header value (avoids `format!` per request).
    cached_auth_header: Option<String>,
    cached_chat_url: String,
    options: ChatOptions,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u64,
    completion_tokens: u64,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl OpenAiProvider {
    pub fn new(api_key: Option<&str>, options: ChatOptions) -> Self {
        Self::compatible("OpenAI", OPENAI_BASE_URL, "OPENAI_API_KEY", api_key, options)
    }

    pub fn compatible(
        name: &str,
        base_url: &str,
        key_env_var: &'static str,
        api_key: Option<&str>,
        options: ChatOptions,
    ) -> Self {
        let base_url = base_url.trim_end_matches('/');
        let cached_chat_url = if base_url.ends_with("/chat/completions") {
            base_url.to_string()
        } else {
            format!("{base_url}/chat/completions")
        };
        Self {
            name: name.to_string(),
            key_env_var,
            cached_auth_header: api_key
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(|k| format!("Bearer {k}")),
            cached_chat_url,
            options,
            client: build_provider_client(),
        }
    }

    fn build_request<'a>(&'a self, messages: &'a [ChatMessage]) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.options.model,
            messages: messages
                .iter()
                .map(|m| Message {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            temperature: self.options.temperature,
        }
    }

    fn extract_reply(&self, chat_response: ChatResponse) -> anyhow::Result<ChatReply> {
        let text = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| LlmError::EmptyResponse {
                provider: self.name.clone(),
            })?;
        let mut reply = match chat_response.usage {
            Some(usage) => {
                ChatReply::with_usage(text, usage.prompt_tokens, usage.completion_tokens)
            }
            None => ChatReply::text_only(text),
        };
        if let Some(api_model) = chat_response.model {
            reply = reply.with_model(api_model);
        }
        Ok(price_reply(reply, &self.options))
    }

    async fn call_api(&self, messages: &[ChatMessage]) -> anyhow::Result<ChatResponse> {
        let auth_header =
            self.cached_auth_header
                .as_ref()
                .ok_or_else(|| LlmError::MissingCredentials {
                    provider: self.name.clone(),
                    env_var: self.key_env_var,
                })?;

        let request = self.build_request(messages);
        let response = self
            .client
            .post(&self.cached_chat_url)
            .header("Authorization", auth_header)
            .json(&request)
            .send()
            .await
            .with_context(|| format!("{} request failed", self.name))?;

        if !response.status().is_success() {
            return Err(super::api_error(&self.name, response).await);
        }

        response
            .json()
            .await
            .with_context(|| format!("{} response JSON decode failed", self.name))
    }
}

#[async_trait]
impl ChatProvider for OpenAiProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn chat(&self, messages: &[ChatMessage]) -> anyhow::Result<ChatReply> {
        let chat_response = self.call_api(messages).await?;
        self.extract_reply(chat_response)
    }
}
