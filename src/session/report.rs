use super::clarify::{Clarification, ClarificationOutcome};
use super::prompts::{initial_thoughts_messages, user_stories_messages};
use super::request_reply;
use super::transcript::Transcript;
use crate::error::Result;
use crate::providers::ChatProvider;
use crate::usage::Cost;
use std::fmt::Write as _;
use std::time::{Duration, Instant};

const FENCE: &str = "```";

/// Remove a surrounding markdown code fence, with or without a language tag.
///
/// Applied until nothing changes, so stripping twice equals stripping once.
pub fn strip_code_fence(text: &str) -> &str {
    let mut current = text.trim();
    loop {
        let next = strip_fence_once(current);
        if next.len() == current.len() {
            return current;
        }
        current = next;
    }
}

fn strip_fence_once(text: &str) -> &str {
    let mut body = text.trim();
    if let Some(after) = body.strip_prefix(FENCE) {
        body = match after.split_once('\n') {
            Some((_language, rest)) => rest,
            None => after,
        };
    }
    body = body.trim_end();
    if let Some(rest) = body.strip_suffix(FENCE) {
        body = rest;
    }
    body.trim()
}

/// Cost and wall-clock figures for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    pub cost: Cost,
    pub clarification: Duration,
    pub generation: Duration,
}

impl SessionStats {
    pub fn total_time(&self) -> Duration {
        self.clarification + self.generation
    }

    pub fn render(&self) -> String {
        format!(
            "## Stats\n\n\
             - Total cost: ${}\n\
             - Clarification time: {:.2}s\n\
             - Generation time: {:.2}s\n\
             - Total time: {:.2}s\n",
            self.cost,
            self.clarification.as_secs_f64(),
            self.generation.as_secs_f64(),
            self.total_time().as_secs_f64(),
        )
    }
}

/// A finished document, ready to be written.
#[derive(Debug, Clone)]
pub struct Report {
    pub document: String,
    /// The user-stories section as embedded in `document`.
    pub user_stories: String,
    pub stats: SessionStats,
    pub outcome: ClarificationOutcome,
    pub rounds: usize,
}

/// Header quoting the request, followed by the Q&A of every completed round.
pub fn render_request_section(transcript: &Transcript) -> String {
    let mut out = String::from("# Feature Request\n\n");
    let request = transcript.request().trim_end();
    if request.is_empty() {
        out.push_str(">\n");
    }
    for line in request.lines() {
        if line.is_empty() {
            out.push_str(">\n");
        } else {
            let _ = writeln!(out, "> {line}");
        }
    }
    out.push('\n');

    let mut rounds = transcript.rounds().enumerate().peekable();
    if rounds.peek().is_some() {
        out.push_str("## Clarifying Questions\n\n");
        for (index, round) in rounds {
            let _ = write!(
                out,
                "**Question {}:** {}\n\n**Answer:** {}\n\n",
                index + 1,
                round.question,
                round.answer
            );
        }
    }
    out
}

/// Turns a finished clarification into the final document with two more
/// provider calls: a breakdown of the request, then the user stories.
pub struct ReportAssembler<'a> {
    provider: &'a dyn ChatProvider,
}

impl<'a> ReportAssembler<'a> {
    pub fn new(provider: &'a dyn ChatProvider) -> Self {
        Self { provider }
    }

    pub async fn assemble(&self, clarification: Clarification) -> Result<Report> {
        let started = Instant::now();
        let mut cost = clarification.cost;
        let mut document = render_request_section(&clarification.transcript);

        tracing::info!("requesting initial thoughts");
        let thoughts = request_reply(self.provider, &initial_thoughts_messages(&document)).await?;
        cost += thoughts.cost;

        tracing::info!("requesting user stories");
        let stories = request_reply(
            self.provider,
            &user_stories_messages(clarification.transcript.request(), &thoughts.text),
        )
        .await?;
        cost += stories.cost;

        let generation = started.elapsed();

        let user_stories = strip_code_fence(&stories.text).to_string();
        let _ = write!(
            document,
            "## Initial Thoughts\n\n{}\n\n## User Stories\n\n{user_stories}\n\n",
            thoughts.text.trim(),
        );

        let stats = SessionStats {
            cost,
            clarification: clarification.elapsed,
            generation,
        };
        document.push_str(&stats.render());

        tracing::info!(cost = %cost, "report assembled");

        Ok(Report {
            document,
            user_stories,
            stats,
            outcome: clarification.outcome,
            rounds: clarification.rounds(),
        })
    }
}
