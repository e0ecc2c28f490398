use crate::support::{ScriptedOperator, ScriptedProvider, free, reply};
use storysmith::StoryError;
use storysmith::error::{InputError, LlmError};
use storysmith::providers::MessageRole;
use storysmith::session::{ClarificationLoop, ClarificationOutcome, MAX_TRANSCRIPT_ENTRIES};
use storysmith::usage::Cost;

#[tokio::test]
async fn asks_each_question_until_complete() {
    let provider = ScriptedProvider::new(vec![
        free("Which formats?"),
        free("Who can export?"),
        free("How large can a report get?"),
        free("COMPLETE"),
    ]);
    let mut operator = ScriptedOperator::new(["CSV and PDF", "Admins", "10k rows"]);

    let clarification = ClarificationLoop::new(&provider)
        .run("Let users export reports", &mut operator)
        .await
        .unwrap();

    assert_eq!(clarification.outcome, ClarificationOutcome::Complete);
    assert_eq!(clarification.rounds(), 3);
    assert_eq!(clarification.transcript.len(), 8);
    assert_eq!(
        operator.questions,
        ["Which formats?", "Who can export?", "How large can a report get?"]
    );

    let last = clarification.transcript.messages().last().unwrap();
    assert_eq!(last.role, MessageRole::User);
    assert_eq!(last.content, "10k rows");
}

#[tokio::test]
async fn every_turn_sends_the_whole_transcript() {
    let provider = ScriptedProvider::new(vec![
        free("Which formats?"),
        free("Who can export?"),
        free("COMPLETE"),
    ]);
    let mut operator = ScriptedOperator::new(["CSV", "Admins"]);

    ClarificationLoop::new(&provider)
        .run("Let users export reports", &mut operator)
        .await
        .unwrap();

    let seen = provider.seen_messages();
    let lengths: Vec<usize> = seen.iter().map(Vec::len).collect();
    assert_eq!(lengths, [2, 4, 6]);
    assert_eq!(seen[0][0].role, MessageRole::System);
    assert_eq!(seen[0][1].content, "Let users export reports");
    assert_eq!(seen[2][2].role, MessageRole::Assistant);
    assert_eq!(seen[2][2].content, "Which formats?");
    assert_eq!(seen[2][3].content, "CSV");
}

#[tokio::test]
async fn transcript_length_tracks_rounds_below_the_cap() {
    for rounds in 0..6 {
        let mut replies: Vec<_> = (1..=rounds)
            .map(|n| free(&format!("Question {n}?")))
            .collect();
        replies.push(free("COMPLETE"));
        let provider = ScriptedProvider::new(replies);
        let mut operator = ScriptedOperator::new((1..=rounds).map(|n| format!("Answer {n}")));

        let clarification = ClarificationLoop::new(&provider)
            .run("Add dark mode", &mut operator)
            .await
            .unwrap();

        assert_eq!(clarification.rounds(), rounds);
        assert_eq!(clarification.transcript.len(), 2 + 2 * rounds);
        assert_eq!(operator.questions.len(), rounds);
        assert_eq!(clarification.outcome, ClarificationOutcome::Complete);
    }
}

#[tokio::test]
async fn stops_after_six_rounds_without_complete() {
    let provider = ScriptedProvider::new(
        (1..=10)
            .map(|n| free(&format!("Question {n}?")))
            .collect(),
    );
    let mut operator = ScriptedOperator::new((1..=10).map(|n| format!("Answer {n}")));

    let clarification = ClarificationLoop::new(&provider)
        .run("Add dark mode", &mut operator)
        .await
        .unwrap();

    assert_eq!(clarification.outcome, ClarificationOutcome::Capped);
    assert_eq!(clarification.rounds(), 6);
    assert_eq!(clarification.transcript.len(), MAX_TRANSCRIPT_ENTRIES);
    assert_eq!(operator.questions.len(), 6);
    assert_eq!(provider.calls(), 6);
}

#[tokio::test]
async fn complete_reply_is_not_a_question_but_is_paid_for() {
    let provider = ScriptedProvider::new(vec![
        reply("Which formats?", 0.01),
        reply("COMPLETE - I have what I need", 0.02),
    ]);
    let mut operator = ScriptedOperator::new(["CSV"]);

    let clarification = ClarificationLoop::new(&provider)
        .run("Let users export reports", &mut operator)
        .await
        .unwrap();

    assert_eq!(operator.questions, ["Which formats?"]);
    assert!(
        clarification
            .transcript
            .messages()
            .iter()
            .all(|m| !m.content.starts_with("COMPLETE"))
    );
    assert_eq!(clarification.cost, Cost::from_dollars(0.03));
}

#[tokio::test]
async fn lowercase_complete_is_just_a_question() {
    let provider = ScriptedProvider::new(vec![free("complete the export?"), free("COMPLETE")]);
    let mut operator = ScriptedOperator::new(["yes"]);

    let clarification = ClarificationLoop::new(&provider)
        .run("Let users export reports", &mut operator)
        .await
        .unwrap();

    assert_eq!(clarification.rounds(), 1);
    assert_eq!(operator.questions, ["complete the export?"]);
}

#[tokio::test]
async fn closed_input_aborts_the_loop() {
    let provider = ScriptedProvider::new(vec![free("Which formats?"), free("Who can export?")]);
    let mut operator = ScriptedOperator::new(["CSV"]);

    let err = ClarificationLoop::new(&provider)
        .run("Let users export reports", &mut operator)
        .await
        .unwrap_err();

    assert!(matches!(err, StoryError::Input(InputError::Closed(_))));
    assert_eq!(provider.calls(), 2);
}

#[tokio::test]
async fn provider_failure_is_an_llm_error() {
    let provider = ScriptedProvider::new(vec![Err(anyhow::anyhow!("connection refused"))]);
    let mut operator = ScriptedOperator::default();

    let err = ClarificationLoop::new(&provider)
        .run("Let users export reports", &mut operator)
        .await
        .unwrap_err();

    match err {
        StoryError::Llm(LlmError::Request { provider, message }) => {
            assert_eq!(provider, "scripted");
            assert!(message.contains("connection refused"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(operator.questions.is_empty());
}

#[tokio::test]
async fn typed_provider_errors_pass_through() {
    let provider = ScriptedProvider::new(vec![Err(LlmError::Auth {
        provider: "OpenAI".into(),
    }
    .into())]);
    let mut operator = ScriptedOperator::default();

    let err = ClarificationLoop::new(&provider)
        .run("Let users export reports", &mut operator)
        .await
        .unwrap_err();

    assert!(matches!(err, StoryError::Llm(LlmError::Auth { .. })));
}

#[tokio::test]
async fn empty_request_still_runs() {
    let provider = ScriptedProvider::new(vec![free("COMPLETE")]);
    let mut operator = ScriptedOperator::default();

    let clarification = ClarificationLoop::new(&provider)
        .run("", &mut operator)
        .await
        .unwrap();

    assert_eq!(clarification.rounds(), 0);
    assert_eq!(clarification.transcript.request(), "");
}
