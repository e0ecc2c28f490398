use super::operator::Operator;
use super::prompts::CLARIFY_SYSTEM_PROMPT;
use super::request_reply;
use super::transcript::Transcript;
use crate::error::Result;
use crate::providers::ChatProvider;
use crate::usage::Cost;
use std::time::{Duration, Instant};

/// Reply prefix meaning the model needs no further answers.
pub const COMPLETION_SIGNAL: &str = "COMPLETE";

/// Two seed entries plus six rounds.
pub const MAX_TRANSCRIPT_ENTRIES: usize = 14;

/// Case-sensitive prefix check on the raw reply, no trimming.
pub fn is_completion_signal(reply: &str) -> bool {
    reply.starts_with(COMPLETION_SIGNAL)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClarificationOutcome {
    /// The model signalled it had enough context.
    Complete,
    /// The transcript reached [`MAX_TRANSCRIPT_ENTRIES`].
    Capped,
}

impl ClarificationOutcome {
    pub fn describe(self) -> &'static str {
        match self {
            Self::Complete => "model had enough context",
            Self::Capped => "question limit reached",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Clarification {
    pub transcript: Transcript,
    pub outcome: ClarificationOutcome,
    /// Sum of every reply's cost, the completion reply included.
    pub cost: Cost,
    pub elapsed: Duration,
}

impl Clarification {
    pub fn rounds(&self) -> usize {
        self.transcript.round_count()
    }
}

/// Interviews the operator one question at a time until the model is
/// satisfied or the transcript is full.
pub struct ClarificationLoop<'a> {
    provider: &'a dyn ChatProvider,
}

impl<'a> ClarificationLoop<'a> {
    pub fn new(provider: &'a dyn ChatProvider) -> Self {
        Self { provider }
    }

    pub async fn run(&self, request: &str, operator: &mut dyn Operator) -> Result<Clarification> {
        let started = Instant::now();
        let mut transcript = Transcript::new(CLARIFY_SYSTEM_PROMPT, request);
        let mut cost = Cost::ZERO;

        let outcome = loop {
            let reply = request_reply(self.provider, transcript.messages()).await?;
            cost += reply.cost;

            if is_completion_signal(&reply.text) {
                break ClarificationOutcome::Complete;
            }

            let round = transcript.round_count() + 1;
            let answer = operator.ask(round, &reply.text)?;
            transcript.push_round(reply.text, answer);
            tracing::debug!(round, entries = transcript.len(), "clarification round recorded");

            if transcript.len() >= MAX_TRANSCRIPT_ENTRIES {
                break ClarificationOutcome::Capped;
            }
        };

        let elapsed = started.elapsed();
        tracing::info!(
            ?outcome,
            rounds = transcript.round_count(),
            cost = %cost,
            elapsed_secs = elapsed.as_secs_f64(),
            "clarification finished"
        );

        Ok(Clarification {
            transcript,
            outcome,
            cost,
            elapsed,
        })
    }
}
