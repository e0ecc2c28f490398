use super::response::{ChatMessage, ChatReply};
use crate::usage::{ModelPricing, lookup_pricing};
use async_trait::async_trait;

/// Per-adapter request settings, fixed when the adapter is created.
#[derive(Debug, Clone)]
pub struct ChatOptions {
    pub model: String,
    pub temperature: f64,
    pub pricing: Vec<ModelPricing>,
}

impl ChatOptions {
    pub fn new(model: impl Into<String>, temperature: f64) -> Self {
        Self {
            model: model.into(),
            temperature,
            pricing: crate::usage::default_pricing(),
        }
    }

    #[must_use]
    pub fn with_pricing(mut self, pricing: Vec<ModelPricing>) -> Self {
        self.pricing = pricing;
        self
    }
}

/// Attach a cost to `reply` from its token usage.
///
/// The model reported by the backend wins over the requested one. Replies
/// without usage, or for models missing from the table, cost nothing.
pub fn price_reply(reply: ChatReply, options: &ChatOptions) -> ChatReply {
    let model = reply.model.as_deref().unwrap_or(&options.model);
    let (Some(input), Some(output)) = (reply.input_tokens, reply.output_tokens) else {
        tracing::debug!(model, "reply carried no token usage; counting it as free");
        return reply;
    };
    match lookup_pricing(model, &options.pricing) {
        Some(pricing) => {
            let cost = pricing.estimate_cost(input, output);
            reply.with_cost(cost)
        }
        None => {
            tracing::debug!(model, "no pricing entry for model; counting it as free");
            reply
        }
    }
}

/// A chat backend: takes the whole ordered conversation, returns one reply.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Short provider name used in logs and error messages.
    fn name(&self) -> &str;

    async fn chat(&self, messages: &[ChatMessage]) -> anyhow::Result<ChatReply>;
}
