//! One interview: clarify the request, elaborate it, render the document.

pub mod clarify;
pub mod operator;
pub mod output;
pub mod prompts;
pub mod report;
pub mod transcript;

pub use clarify::{
    COMPLETION_SIGNAL, Clarification, ClarificationLoop, ClarificationOutcome,
    MAX_TRANSCRIPT_ENTRIES, is_completion_signal,
};
pub use operator::{ConsoleOperator, Operator};
pub use output::{report_filename, write_report};
pub use report::{Report, ReportAssembler, SessionStats, strip_code_fence};
pub use transcript::{Round, Transcript};

use crate::error::{LlmError, Result};
use crate::providers::{ChatMessage, ChatProvider, ChatReply};

/// Run the clarification loop and assemble the report. Nothing is written.
pub async fn run_session(
    provider: &dyn ChatProvider,
    operator: &mut dyn Operator,
    request: &str,
) -> Result<Report> {
    let clarification = ClarificationLoop::new(provider).run(request, operator).await?;
    ReportAssembler::new(provider).assemble(clarification).await
}

/// One provider call with failures mapped into [`LlmError`].
pub(crate) async fn request_reply(
    provider: &dyn ChatProvider,
    messages: &[ChatMessage],
) -> Result<ChatReply> {
    let reply = provider.chat(messages).await.map_err(|error| {
        match error.downcast::<LlmError>() {
            Ok(llm) => llm,
            Err(other) => LlmError::request(provider.name(), &other),
        }
    })?;
    tracing::debug!(
        provider = provider.name(),
        messages = messages.len(),
        cost = %reply.cost,
        input_tokens = reply.input_tokens,
        output_tokens = reply.output_tokens,
        "provider replied"
    );
    Ok(reply)
}
