use crate::providers::{
    ChatMessage, ChatReply, build_provider_client,
    traits::{ChatOptions, ChatProvider},
};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const OLLAMA_BASE_URL: &str = "http://localhost:11434";

/// Local Ollama server. Replies always cost nothing.
pub struct OllamaProvider {
    base_url: String,
    options: ChatOptions,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    stream: bool,
    options: Options,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct Options {
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ResponseMessage,
    prompt_eval_count: Option<u64>,
    eval_count: Option<u64>,
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

impl OllamaProvider {
    pub fn new(base_url: Option<&str>, options: ChatOptions) -> Self {
        Self {
            base_url: base_url
                .unwrap_or(OLLAMA_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
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
            stream: false,
            options: Options {
                temperature: self.options.temperature,
            },
        }
    }

    fn extract_reply(chat_response: ChatResponse) -> ChatReply {
        let text = chat_response.message.content;
        let mut reply = match (chat_response.prompt_eval_count, chat_response.eval_count) {
            (Some(input_tokens), Some(output_tokens)) => {
                ChatReply::with_usage(text, input_tokens, output_tokens)
            }
            _ => ChatReply::text_only(text),
        };
        if let Some(api_model) = chat_response.model {
            reply = reply.with_model(api_model);
        }
        reply
    }

    async fn call_api(&self, messages: &[ChatMessage]) -> anyhow::Result<ChatResponse> {
        let request = self.build_request(messages);
        let url = format!("{}/api/chat", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .with_context(|| format!("Ollama request to {url} failed. Is Ollama running? (ollama serve)"))?;

        if !response.status().is_success() {
            let err = super::api_error("Ollama", response).await;
            anyhow::bail!("{err}. Is the model pulled? (ollama pull {})", self.options.model);
        }

        response
            .json()
            .await
            .context("Ollama response JSON decode failed")
    }
}

#[async_trait]
impl ChatProvider for OllamaProvider {
    fn name(&self) -> &str {
        "Ollama"
    }

    async fn chat(&self, messages: &[ChatMessage]) -> anyhow::Result<ChatReply> {
        let chat_response = self.call_api(messages).await?;
        Ok(Self::extract_reply(chat_response))
    }
}
