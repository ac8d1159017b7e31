use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Upper bound for standardized and supplementary exam scores.
pub const MAX_EXAM_SCORE: u16 = 100;

/// Upper bound for the achievement bonus.
pub const MAX_ACHIEVEMENT_SCORE: u16 = 10;

/// Fixed set of state-exam subjects collected from every applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subject {
    Math,
    NativeLanguage,
    Physics,
    ComputerScience,
}

impl Subject {
    /// Collection order: math first, computer science last.
    pub const ALL: [Subject; 4] = [
        Subject::Math,
        Subject::NativeLanguage,
        Subject::Physics,
        Subject::ComputerScience,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Subject::Math => "math",
            Subject::NativeLanguage => "native language",
            Subject::Physics => "physics",
            Subject::ComputerScience => "computer science",
        }
    }

    /// Parses a subject identifier from rule data, tolerating case and
    /// space/hyphen/underscore variations.
    pub fn parse(raw: &str) -> Option<Subject> {
        let normalized = raw.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "math" | "mathematics" => Some(Subject::Math),
            "native_language" | "native" => Some(Subject::NativeLanguage),
            "physics" => Some(Subject::Physics),
            "computer_science" | "informatics" => Some(Subject::ComputerScience),
            _ => None,
        }
    }
}

/// Eligibility rule for one institution+program pair.
///
/// `required_subjects` and `optional_subjects` are disjoint; the catalog
/// builder guarantees this by construction so no score is counted twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionRule {
    /// Display text shown to the applicant in results.
    pub description: String,
    /// Mandatory subjects with their minimum scores.
    pub required_subjects: BTreeMap<Subject, u16>,
    /// Pick-one-of elective group. Only the applicant's best score among the
    /// group counts toward the total; each subject carries its own floor
    /// (0 when the rule source leaves it unspecified).
    pub optional_subjects: BTreeMap<Subject, u16>,
    /// `Some(min)` exactly when the program requires the supplementary exam.
    pub supplementary_min: Option<u16>,
    /// Total-score cut line for an unconditional (free) place.
    pub total_score_threshold: u16,
}

/// Scores accumulated over one conversation. A subject absent from `scores`
/// has not been asked yet; that is distinct from an entered 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    pub institution: String,
    pub scores: BTreeMap<Subject, u16>,
    pub supplementary: Option<u16>,
    pub achievements: u16,
}

impl ApplicantProfile {
    pub fn score(&self, subject: Subject) -> Option<u16> {
        self.scores.get(&subject).copied()
    }
}

/// Per-program verdict produced by the eligibility engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EligibilityOutcome {
    Ineligible,
    EligibleFree { total: u16 },
    EligiblePaid { total: u16 },
}

impl EligibilityOutcome {
    /// Computed total when the applicant is not ineligible.
    pub fn total(self) -> Option<u16> {
        match self {
            EligibilityOutcome::Ineligible => None,
            EligibilityOutcome::EligibleFree { total }
            | EligibilityOutcome::EligiblePaid { total } => Some(total),
        }
    }
}

/// Placement tier for a program the applicant qualifies for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementTier {
    Free,
    Paid,
}

impl PlacementTier {
    pub const fn label(self) -> &'static str {
        match self {
            PlacementTier::Free => "free",
            PlacementTier::Paid => "paid",
        }
    }
}

/// One non-ineligible program outcome prepared for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramPlacement {
    pub description: String,
    pub tier: PlacementTier,
    pub total: u16,
    pub threshold: u16,
}
