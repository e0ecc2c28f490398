#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use storysmith::error::InputError;
use storysmith::providers::{ChatMessage, ChatProvider, ChatReply};
use storysmith::session::Operator;
use storysmith::usage::Cost;

/// Reply with `text` costing `dollars`.
pub fn reply(text: &str, dollars: f64) -> Result<ChatReply> {
    Ok(ChatReply::text_only(text).with_cost(Cost::from_dollars(dollars)))
}

pub fn free(text: &str) -> Result<ChatReply> {
    reply(text, 0.0)
}

#[derive(Debug)]
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<Result<ChatReply>>>,
    seen_messages: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedProvider {
    pub fn new(replies: Vec<Result<ChatReply>>) -> Self {
        Self {
            replies: Mutex::new(VecDeque::from(replies)),
            seen_messages: Mutex::new(Vec::new()),
        }
    }

    pub fn seen_messages(&self) -> Vec<Vec<ChatMessage>> {
        self.seen_messages
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    pub fn calls(&self) -> usize {
        self.seen_messages().len()
    }
}

#[async_trait]
impl ChatProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn chat(&self, messages: &[ChatMessage]) -> Result<ChatReply> {
        self.seen_messages
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(messages.to_vec());

        self.replies
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Err(anyhow::anyhow!("script exhausted")))
    }
}

/// Answers questions from a fixed list; runs dry like a closed stdin.
#[derive(Debug, Default)]
pub struct ScriptedOperator {
    answers: VecDeque<String>,
    pub questions: Vec<String>,
}

impl ScriptedOperator {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            questions: Vec::new(),
        }
    }
}

impl Operator for ScriptedOperator {
    fn read_request(&mut self) -> Result<String, InputError> {
        self.answers
            .pop_front()
            .ok_or_else(|| InputError::Closed("the feature request".into()))
    }

    fn ask(&mut self, round: usize, question: &str) -> Result<String, InputError> {
        self.questions.push(question.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| InputError::Closed(format!("the answer to question {round}")))
    }
}
