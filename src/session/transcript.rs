use crate::providers::ChatMessage;

/// Entries present before the first round: the system prompt and the request.
pub const SEED_ENTRIES: usize = 2;

/// One answered clarifying question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Round<'a> {
    pub question: &'a str,
    pub answer: &'a str,
}

/// Conversation sent to the provider during clarification.
///
/// Always starts with a system entry and the user's request, then grows by
/// one assistant question and one user answer per round.
#[derive(Debug, Clone)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new(system_prompt: impl Into<String>, request: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::system(system_prompt), ChatMessage::user(request)],
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// A transcript is never empty; kept for the `len`/`is_empty` pair.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The original feature request, verbatim.
    pub fn request(&self) -> &str {
        &self.messages[1].content
    }

    pub fn push_round(&mut self, question: impl Into<String>, answer: impl Into<String>) {
        self.messages.push(ChatMessage::assistant(question));
        self.messages.push(ChatMessage::user(answer));
    }

    pub fn rounds(&self) -> impl Iterator<Item = Round<'_>> {
        self.messages[SEED_ENTRIES..]
            .chunks_exact(2)
            .map(|pair| Round {
                question: &pair[0].content,
                answer: &pair[1].content,
            })
    }

    pub fn round_count(&self) -> usize {
        (self.messages.len() - SEED_ENTRIES) / 2
    }
}
