use super::common::*;
use crate::admissions::catalog::AdmissionCatalog;
use crate::admissions::domain::Subject;
use crate::admissions::evaluation::EligibilityReport;
use crate::admissions::intake::{
    IntakeReply, IntakeSession, IntakeStage, Prompt, ValidationError,
};

/// Feeds answers that must all be accepted, returning the stage label after
/// each one.
fn drive(
    session: &mut IntakeSession,
    catalog: &AdmissionCatalog,
    answers: &[&str],
) -> Vec<&'static str> {
    let mut stages = Vec::new();
    for answer in answers {
        match session.answer(catalog, answer) {
            IntakeReply::Ask(_) => stages.push(session.stage().label()),
            IntakeReply::Complete(_) => stages.push("complete"),
            IntakeReply::Retry { error, .. } => panic!("'{answer}' rejected: {error}"),
        }
    }
    stages
}

fn complete(
    session: &mut IntakeSession,
    catalog: &AdmissionCatalog,
    answer: &str,
) -> EligibilityReport {
    match session.answer(catalog, answer) {
        IntakeReply::Complete(report) => report,
        other => panic!("expected completion, got {other:?}"),
    }
}

#[test]
fn opens_with_the_institution_choice() {
    let catalog = sample_catalog();
    let session = IntakeSession::new();

    assert_eq!(session.stage(), IntakeStage::AwaitingInstitution);
    match session.prompt(&catalog) {
        Prompt::ChooseInstitution { options } => {
            assert_eq!(options, vec!["State University", "Technical University"]);
        }
        other => panic!("expected institution prompt, got {other:?}"),
    }
}

#[test]
fn unknown_institution_reprompts_without_advancing() {
    let catalog = sample_catalog();
    let mut session = IntakeSession::new();

    match session.answer(&catalog, "Nowhere University") {
        IntakeReply::Retry { error, prompt } => {
            assert_eq!(
                error,
                ValidationError::UnknownInstitution {
                    input: "Nowhere University".to_string()
                }
            );
            assert!(matches!(prompt, Prompt::ChooseInstitution { .. }));
        }
        other => panic!("expected retry, got {other:?}"),
    }
    assert_eq!(session.stage(), IntakeStage::AwaitingInstitution);
    assert!(session.profile().institution.is_empty());
}

#[test]
fn institution_match_is_case_sensitive() {
    let catalog = sample_catalog();
    let mut session = IntakeSession::new();

    assert!(matches!(
        session.answer(&catalog, "state university"),
        IntakeReply::Retry { .. }
    ));
    assert_eq!(session.stage(), IntakeStage::AwaitingInstitution);
}

#[test]
fn flow_without_supplementary_never_visits_that_stage() {
    let catalog = sample_catalog();
    let mut session = IntakeSession::new();

    let stages = drive(
        &mut session,
        &catalog,
        &["Technical University", "80", "70", "60", "50"],
    );
    assert_eq!(
        stages,
        vec![
            "awaiting_math",
            "awaiting_native_language",
            "awaiting_physics",
            "awaiting_computer_science",
            "awaiting_achievements",
        ]
    );

    let report = complete(&mut session, &catalog, "5");
    assert_eq!(report.profile.supplementary, None);
}

#[test]
fn flow_with_supplementary_visits_it_once_between_physics_and_computer_science() {
    let catalog = sample_catalog();
    let mut session = IntakeSession::new();

    let stages = drive(
        &mut session,
        &catalog,
        &["State University", "80", "70", "60", "55", "50"],
    );
    assert_eq!(
        stages,
        vec![
            "awaiting_math",
            "awaiting_native_language",
            "awaiting_physics",
            "awaiting_supplementary_exam",
            "awaiting_computer_science",
            "awaiting_achievements",
        ]
    );

    let report = complete(&mut session, &catalog, "5");
    assert_eq!(report.profile.supplementary, Some(55));
}

#[test]
fn rejected_answer_keeps_stage_and_profile_untouched() {
    let catalog = sample_catalog();
    let mut session = IntakeSession::new();
    drive(&mut session, &catalog, &["Technical University"]);

    for bad in ["abc", "101", "-3", ""] {
        match session.answer(&catalog, bad) {
            IntakeReply::Retry { prompt, .. } => {
                assert_eq!(
                    prompt,
                    Prompt::EnterScore {
                        subject: Subject::Math
                    }
                );
            }
            other => panic!("expected retry for '{bad}', got {other:?}"),
        }
        assert_eq!(session.stage(), IntakeStage::AwaitingScore(Subject::Math));
        assert!(session.profile().scores.is_empty());
    }
}

#[test]
fn out_of_range_score_reports_the_accepted_range() {
    let catalog = sample_catalog();
    let mut session = IntakeSession::new();
    drive(&mut session, &catalog, &["Technical University"]);

    match session.answer(&catalog, "101") {
        IntakeReply::Retry { error, .. } => {
            assert_eq!(error, ValidationError::OutOfRange { value: 101, max: 100 });
        }
        other => panic!("expected retry, got {other:?}"),
    }
}

#[test]
fn achievement_bonus_is_capped_at_ten() {
    let catalog = sample_catalog();
    let mut session = IntakeSession::new();
    drive(
        &mut session,
        &catalog,
        &["Technical University", "80", "70", "60", "50"],
    );

    match session.answer(&catalog, "11") {
        IntakeReply::Retry { error, .. } => {
            assert_eq!(error, ValidationError::OutOfRange { value: 11, max: 10 });
        }
        other => panic!("expected retry, got {other:?}"),
    }

    let report = complete(&mut session, &catalog, "10");
    assert_eq!(report.profile.achievements, 10);
}

#[test]
fn completed_report_echoes_every_collected_score() {
    let catalog = sample_catalog();
    let mut session = IntakeSession::new();
    drive(
        &mut session,
        &catalog,
        &["State University", "81", "72", "63", "54", "45"],
    );
    let report = complete(&mut session, &catalog, "6");

    assert_eq!(report.institution, "State University");
    assert_eq!(report.profile.score(Subject::Math), Some(81));
    assert_eq!(report.profile.score(Subject::NativeLanguage), Some(72));
    assert_eq!(report.profile.score(Subject::Physics), Some(63));
    assert_eq!(report.profile.score(Subject::ComputerScience), Some(45));
    assert_eq!(report.profile.supplementary, Some(54));
    assert_eq!(report.profile.achievements, 6);
}

#[test]
fn surrounding_whitespace_in_answers_is_tolerated() {
    let catalog = sample_catalog();
    let mut session = IntakeSession::new();

    let stages = drive(&mut session, &catalog, &["  Technical University  ", " 80 "]);
    assert_eq!(stages, vec!["awaiting_math", "awaiting_native_language"]);
    assert_eq!(session.profile().score(Subject::Math), Some(80));
}
