use super::common::*;
use crate::admissions::service::ConversationId;

fn conversation(id: &str) -> ConversationId {
    ConversationId(id.to_string())
}

#[test]
fn first_message_opens_the_conversation() {
    let service = build_service();
    let turn = service.handle_message(&conversation("tg-1001"), "anything");

    assert_eq!(turn.stage, "awaiting_institution");
    assert!(turn.report.is_none());
    assert!(turn.message.contains("State University"));
    assert!(turn.message.contains("Technical University"));
}

#[test]
fn invalid_score_reprompts_with_the_accepted_range() {
    let service = build_service();
    let id = conversation("tg-1002");
    service.handle_message(&id, "");
    service.handle_message(&id, "Technical University");

    let turn = service.handle_message(&id, "lots");
    assert_eq!(turn.stage, "awaiting_math");
    assert!(turn.message.contains("not a whole number"));
    assert!(turn.message.contains("0-100"));
}

#[test]
fn completed_conversation_returns_a_report_and_is_discarded() {
    let service = build_service();
    let id = conversation("tg-1003");
    service.handle_message(&id, "");

    for answer in ["State University", "80", "70", "60", "60", "50"] {
        let turn = service.handle_message(&id, answer);
        assert!(turn.report.is_none(), "completed early at '{answer}'");
    }

    let turn = service.handle_message(&id, "8");
    assert_eq!(turn.stage, "complete");
    let report = turn.report.expect("completion carries a report");
    assert_eq!(report.institution, "State University");
    assert!(turn.message.contains("Results for State University:"));

    // The session is gone; the next message starts over.
    let turn = service.handle_message(&id, "whatever");
    assert_eq!(turn.stage, "awaiting_institution");
}

#[test]
fn conversations_are_isolated_by_id() {
    let service = build_service();
    let first = conversation("tg-2001");
    let second = conversation("tg-2002");
    service.handle_message(&first, "");
    service.handle_message(&first, "Technical University");

    let turn = service.handle_message(&second, "");
    assert_eq!(turn.stage, "awaiting_institution");

    let turn = service.handle_message(&first, "80");
    assert_eq!(turn.stage, "awaiting_native_language");
}

#[test]
fn all_zero_profile_renders_no_qualifying_programs() {
    let service = build_service();
    let id = conversation("tg-3001");
    service.handle_message(&id, "");

    for answer in ["Technical University", "0", "0", "0", "0"] {
        service.handle_message(&id, answer);
    }
    let turn = service.handle_message(&id, "0");

    assert_eq!(turn.stage, "complete");
    let report = turn.report.expect("completion carries a report");
    assert!(report.placements.is_empty());
    assert!(turn
        .message
        .contains("You do not qualify for any program at Technical University."));
}

#[test]
fn report_message_echoes_the_collected_scores() {
    let service = build_service();
    let id = conversation("tg-3002");
    service.handle_message(&id, "");

    for answer in ["State University", "81", "72", "63", "54", "45"] {
        service.handle_message(&id, answer);
    }
    let turn = service.handle_message(&id, "6");

    assert!(turn.message.contains("math: 81"));
    assert!(turn.message.contains("native language: 72"));
    assert!(turn.message.contains("physics: 63"));
    assert!(turn.message.contains("supplementary exam: 54"));
    assert!(turn.message.contains("achievement bonus: 6"));
}
