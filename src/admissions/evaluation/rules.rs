use super::super::domain::{AdmissionRule, ApplicantProfile};

/// Best score the applicant holds among the elective group. Subjects the
/// profile has no score for contribute 0 to the comparison.
pub(crate) fn best_elective_score(rule: &AdmissionRule, profile: &ApplicantProfile) -> u16 {
    rule.optional_subjects
        .keys()
        .map(|&subject| profile.score(subject).unwrap_or(0))
        .max()
        .unwrap_or(0)
}

/// Eligibility gate: at least one elective subject must meet its own floor.
/// A missing score counts as 0, so a subject with a 0 floor always passes.
pub(crate) fn elective_floor_met(rule: &AdmissionRule, profile: &ApplicantProfile) -> bool {
    rule.optional_subjects
        .iter()
        .any(|(&subject, &floor)| profile.score(subject).unwrap_or(0) >= floor)
}
