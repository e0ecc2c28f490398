use crate::support::{ScriptedOperator, ScriptedProvider, free, reply};
use storysmith::StoryError;
use storysmith::error::LlmError;
use storysmith::session::{ClarificationOutcome, run_session};
use storysmith::usage::Cost;

fn scripted_session() -> (ScriptedProvider, ScriptedOperator) {
    let provider = ScriptedProvider::new(vec![
        reply("Which file format?", 0.01),
        reply("Who is allowed to export?", 0.02),
        reply("COMPLETE", 0.0),
        reply("1. Pick columns\n2. Large reports stream in chunks", 0.03),
        reply(
            "```markdown\n# Feature: Export reports\n\n## Scenario: Admin exports CSV\n- Given I am an admin\n```",
            0.04,
        ),
    ]);
    let operator = ScriptedOperator::new(["CSV", "Admins only"]);
    (provider, operator)
}

fn position(document: &str, needle: &str) -> usize {
    document
        .find(needle)
        .unwrap_or_else(|| panic!("{needle:?} missing from document:\n{document}"))
}

#[tokio::test]
async fn document_sections_appear_in_order() {
    let (provider, mut operator) = scripted_session();

    let report = run_session(&provider, &mut operator, "Let users export reports")
        .await
        .unwrap();
    let doc = &report.document;

    let order = [
        "# Feature Request",
        "> Let users export reports",
        "## Clarifying Questions",
        "**Question 1:** Which file format?",
        "**Answer:** CSV",
        "**Question 2:** Who is allowed to export?",
        "**Answer:** Admins only",
        "## Initial Thoughts",
        "1. Pick columns",
        "## User Stories",
        "# Feature: Export reports",
        "## Scenario: Admin exports CSV",
        "## Stats",
        "- Total cost: $0.1000",
        "- Clarification time: ",
        "- Generation time: ",
        "- Total time: ",
    ];
    let positions: Vec<usize> = order.iter().map(|needle| position(doc, needle)).collect();
    assert!(
        positions.windows(2).all(|pair| pair[0] < pair[1]),
        "sections out of order: {positions:?}"
    );

    assert!(!doc.contains("```"));
    assert!(!doc.contains("COMPLETE"));
    assert_eq!(report.rounds, 2);
    assert_eq!(report.outcome, ClarificationOutcome::Complete);
    assert_eq!(
        report.user_stories,
        "# Feature: Export reports\n\n## Scenario: Admin exports CSV\n- Given I am an admin"
    );
}

#[tokio::test]
async fn total_cost_is_the_exact_sum_of_every_reply() {
    let provider = ScriptedProvider::new(vec![
        reply("Which file format?", 0.01),
        reply("COMPLETE", 0.02),
        reply("Breakdown", 0.03),
        reply("# Feature: Export", 0.04),
    ]);
    let mut operator = ScriptedOperator::new(["CSV"]);

    let report = run_session(&provider, &mut operator, "Let users export reports")
        .await
        .unwrap();

    assert_eq!(report.stats.cost, Cost::from_dollars(0.10));
    assert_eq!(report.stats.cost.to_string(), "0.1000");
    assert!(report.document.contains("- Total cost: $0.1000"));
}

#[tokio::test]
async fn elaboration_prompts_carry_their_context() {
    let (provider, mut operator) = scripted_session();

    run_session(&provider, &mut operator, "Let users export reports")
        .await
        .unwrap();

    let seen = provider.seen_messages();
    assert_eq!(seen.len(), 5);

    let thoughts_request = &seen[3][1].content;
    assert!(thoughts_request.contains("> Let users export reports"));
    assert!(thoughts_request.contains("**Answer:** Admins only"));
    assert!(!thoughts_request.contains("## Initial Thoughts"));

    let stories_request = &seen[4][1].content;
    assert!(stories_request.contains("<initial-request>Let users export reports</initial-request>"));
    assert!(stories_request.contains("2. Large reports stream in chunks"));
}

#[tokio::test]
async fn immediate_complete_skips_questions_section() {
    let provider = ScriptedProvider::new(vec![
        free("COMPLETE"),
        free("Breakdown"),
        free("# Feature: Dark mode"),
    ]);
    let mut operator = ScriptedOperator::default();

    let report = run_session(&provider, &mut operator, "Add dark mode")
        .await
        .unwrap();

    assert_eq!(report.rounds, 0);
    assert!(!report.document.contains("## Clarifying Questions"));
    assert!(report.document.contains("# Feature: Dark mode"));
    assert!(report.document.contains("- Total cost: $0.0000"));
}

#[tokio::test]
async fn failing_user_stories_call_fails_the_session() {
    let provider = ScriptedProvider::new(vec![
        free("COMPLETE"),
        free("Breakdown"),
        Err(anyhow::anyhow!("quota exceeded")),
    ]);
    let mut operator = ScriptedOperator::default();

    let err = run_session(&provider, &mut operator, "Add dark mode")
        .await
        .unwrap_err();

    assert!(matches!(err, StoryError::Llm(LlmError::Request { .. })));
    assert!(err.to_string().contains("quota exceeded"));
}
