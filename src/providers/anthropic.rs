use crate::error::LlmError;
use crate::providers::{
    ChatMessage, ChatReply, MessageRole, build_provider_client,
    traits::{ChatOptions, ChatProvider, price_reply},
};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
const MAX_TOKENS: u32 = 4096;

pub struct AnthropicProvider {
    /// Pre-computed auth: `("Authorization", "Bearer <token>")` or `("x-api-key", "<key>")`.
    cached_auth: Option<(&'static str, String)>,
    cached_messages_url: String,
    options: ChatOptions,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
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
    content: Vec<ResponseContentBlock>,
    usage: Option<Usage>,
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u64,
    output_tokens: u64,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ResponseContentBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Unsupported,
}

impl AnthropicProvider {
    pub fn new(api_key: Option<&str>, options: ChatOptions) -> Self {
        Self::with_base_url(api_key, None, options)
    }

    pub fn with_base_url(
        api_key: Option<&str>,
        base_url: Option<&str>,
        options: ChatOptions,
    ) -> Self {
        let base = base_url
            .map_or(ANTHROPIC_BASE_URL, |u| u.trim_end_matches('/'))
            .to_string();
        let cached_messages_url = format!("{base}/v1/messages");
        let cached_auth = api_key.map(str::trim).filter(|k| !k.is_empty()).map(|k| {
            if Self::is_setup_token(k) {
                ("Authorization", format!("Bearer {k}"))
            } else {
                ("x-api-key", k.to_string())
            }
        });
        Self {
            cached_auth,
            cached_messages_url,
            options,
            client: build_provider_client(),
        }
    }

    fn is_setup_token(token: &str) -> bool {
        token.starts_with("sk-ant-oat01-")
    }

    /// The messages API takes system text as a top-level field, so system
    /// entries are lifted out of the conversation and joined in order.
    fn build_request<'a>(&'a self, messages: &'a [ChatMessage]) -> ChatRequest<'a> {
        let system_parts: Vec<&str> = messages
            .iter()
            .filter(|m| m.role == MessageRole::System)
            .map(|m| m.content.as_str())
            .collect();
        let system = if system_parts.is_empty() {
            None
        } else {
            Some(system_parts.join("\n\n"))
        };

        ChatRequest {
            model: &self.options.model,
            max_tokens: MAX_TOKENS,
            system,
            messages: messages
                .iter()
                .filter(|m| m.role != MessageRole::System)
                .map(|m| Message {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            temperature: self.options.temperature,
        }
    }

    fn extract_reply(chat_response: ChatResponse, options: &ChatOptions) -> anyhow::Result<ChatReply> {
        let text = chat_response
            .content
            .iter()
            .filter_map(|block| match block {
                ResponseContentBlock::Text { text } => Some(text.as_str()),
                ResponseContentBlock::Unsupported => None,
            })
            .collect::<Vec<_>>()
            .join("\n");

        if text.is_empty() {
            return Err(LlmError::EmptyResponse {
                provider: "Anthropic".to_string(),
            }
            .into());
        }

        let mut reply = match chat_response.usage {
            Some(usage) => ChatReply::with_usage(text, usage.input_tokens, usage.output_tokens),
            None => ChatReply::text_only(text),
        };
        if let Some(api_model) = chat_response.model {
            reply = reply.with_model(api_model);
        }
        Ok(price_reply(reply, options))
    }

    async fn call_api(&self, messages: &[ChatMessage]) -> anyhow::Result<ChatResponse> {
        let (auth_name, auth_value) =
            self.cached_auth
                .as_ref()
                .ok_or_else(|| LlmError::MissingCredentials {
                    provider: "Anthropic".to_string(),
                    env_var: "ANTHROPIC_API_KEY",
                })?;

        let request = self.build_request(messages);
        let response = self
            .client
            .post(&self.cached_messages_url)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .header(*auth_name, auth_value)
            .json(&request)
            .send()
            .await
            .context("Anthropic request failed")?;

        if !response.status().is_success() {
            return Err(super::api_error("Anthropic", response).await);
        }

        response
            .json()
            .await
            .context("Anthropic response JSON decode failed")
    }
}

#[async_trait]
impl ChatProvider for AnthropicProvider {
    fn name(&self) -> &str {
        "Anthropic"
    }

    async fn chat(&self, messages: &[ChatMessage]) -> anyhow::Result<ChatReply> {
        let chat_response = self.call_api(messages).await?;
        Self::extract_reply(chat_response, &self.options)
    }
}
