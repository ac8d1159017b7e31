use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::admissions::catalog::{AdmissionCatalog, RuleRow};
use crate::admissions::domain::{AdmissionRule, ApplicantProfile, Subject};
use crate::admissions::service::AdmissionService;

pub(super) fn rule(
    required: &[(Subject, u16)],
    optional: &[(Subject, u16)],
    supplementary_min: Option<u16>,
    threshold: u16,
) -> AdmissionRule {
    AdmissionRule {
        description: "Test Program".to_string(),
        required_subjects: required.iter().copied().collect(),
        optional_subjects: optional.iter().copied().collect(),
        supplementary_min,
        total_score_threshold: threshold,
    }
}

pub(super) fn profile(
    scores: &[(Subject, u16)],
    supplementary: Option<u16>,
    achievements: u16,
) -> ApplicantProfile {
    ApplicantProfile {
        institution: "State University".to_string(),
        scores: scores.iter().copied().collect(),
        supplementary,
        achievements,
    }
}

#[allow(clippy::too_many_arguments)]
pub(super) fn row(
    institution: &str,
    program: &str,
    description: &str,
    threshold: &str,
    supplementary_required: &str,
    supplementary_min: &str,
    electives: &str,
    math: &str,
    native_language: &str,
    physics: &str,
    computer_science: &str,
) -> RuleRow {
    RuleRow {
        institution: institution.to_string(),
        program: program.to_string(),
        description: description.to_string(),
        total_score_threshold: threshold.to_string(),
        supplementary_required: supplementary_required.to_string(),
        supplementary_min: supplementary_min.to_string(),
        elective_subjects: electives.to_string(),
        math: math.to_string(),
        native_language: native_language.to_string(),
        physics: physics.to_string(),
        computer_science: computer_science.to_string(),
    }
}

/// Two institutions: "State University" requires the supplementary exam,
/// "Technical University" does not.
pub(super) fn sample_rows() -> Vec<RuleRow> {
    vec![
        row(
            "State University",
            "Applied Math",
            "Applied Mathematics and Computer Science",
            "260",
            "yes",
            "50",
            "-",
            "70",
            "60",
            "-",
            "-",
        ),
        row(
            "State University",
            "Mechanics",
            "Fundamental Mechanics",
            "250",
            "yes",
            "40",
            "physics",
            "60",
            "50",
            "55",
            "-",
        ),
        row(
            "Technical University",
            "Software Engineering",
            "Software Engineering",
            "240",
            "no",
            "-",
            "physics, computer science",
            "60",
            "50",
            "50",
            "40",
        ),
        row(
            "Technical University",
            "Robotics",
            "Robotics and Automation",
            "220",
            "no",
            "-",
            "-",
            "55",
            "45",
            "50",
            "-",
        ),
    ]
}

pub(super) fn sample_catalog() -> AdmissionCatalog {
    AdmissionCatalog::from_rows(&sample_rows()).expect("sample catalog builds")
}

pub(super) fn build_service() -> AdmissionService {
    AdmissionService::new(Arc::new(sample_catalog()))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
