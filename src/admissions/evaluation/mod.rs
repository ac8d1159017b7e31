//! Pure scoring of applicant profiles against admission rules.
//!
//! Nothing here holds state or performs I/O: both entry points are plain
//! functions over the catalog and a finished profile, so any number of
//! conversations can evaluate concurrently without synchronization.

mod rules;

use serde::{Deserialize, Serialize};

use super::catalog::AdmissionCatalog;
use super::domain::{
    AdmissionRule, ApplicantProfile, EligibilityOutcome, PlacementTier, ProgramPlacement,
};
use rules::{best_elective_score, elective_floor_met};

/// Evaluates one applicant against one program rule.
pub fn evaluate_program(rule: &AdmissionRule, profile: &ApplicantProfile) -> EligibilityOutcome {
    let mut total: u16 = 0;

    for (&subject, &minimum) in &rule.required_subjects {
        match profile.score(subject) {
            Some(score) if score >= minimum => total += score,
            _ => return EligibilityOutcome::Ineligible,
        }
    }

    if let Some(minimum) = rule.supplementary_min {
        match profile.supplementary {
            Some(score) if score >= minimum => total += score,
            _ => return EligibilityOutcome::Ineligible,
        }
    }

    if !rule.optional_subjects.is_empty() {
        // Two deliberately separate computations over the same scores: the
        // best score maximizes the applicant's total, the floor check gates
        // eligibility. Collapsing them into one comparison is wrong.
        if !elective_floor_met(rule, profile) {
            return EligibilityOutcome::Ineligible;
        }
        total += best_elective_score(rule, profile);
    }

    total += profile.achievements;

    if total >= rule.total_score_threshold {
        EligibilityOutcome::EligibleFree { total }
    } else {
        EligibilityOutcome::EligiblePaid { total }
    }
}

/// Runs every program of the institution, keeping non-ineligible outcomes in
/// catalog order. An empty result means "not eligible anywhere" and is a
/// normal outcome for the caller to render, not an error.
pub fn evaluate_institution(
    catalog: &AdmissionCatalog,
    institution: &str,
    profile: &ApplicantProfile,
) -> Vec<ProgramPlacement> {
    let Some(programs) = catalog.programs(institution) else {
        return Vec::new();
    };

    programs
        .iter()
        .filter_map(|program| {
            let (tier, total) = match evaluate_program(&program.rule, profile) {
                EligibilityOutcome::Ineligible => return None,
                EligibilityOutcome::EligibleFree { total } => (PlacementTier::Free, total),
                EligibilityOutcome::EligiblePaid { total } => (PlacementTier::Paid, total),
            };
            Some(ProgramPlacement {
                description: program.rule.description.clone(),
                tier,
                total,
                threshold: program.rule.total_score_threshold,
            })
        })
        .collect()
}

/// Structured result handed back when a conversation completes: the
/// placements plus an echo of everything the applicant entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityReport {
    pub institution: String,
    pub placements: Vec<ProgramPlacement>,
    pub profile: ApplicantProfile,
}

impl EligibilityReport {
    pub fn build(catalog: &AdmissionCatalog, profile: ApplicantProfile) -> Self {
        let placements = evaluate_institution(catalog, &profile.institution, &profile);
        Self {
            institution: profile.institution.clone(),
            placements,
            profile,
        }
    }
}
