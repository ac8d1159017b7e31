//! Per-conversation state machine collecting one applicant's inputs.
//!
//! Stages advance in a fixed order with one branch: the supplementary exam
//! is requested between physics and computer science, and only when the
//! chosen institution requires it. Rejected answers never move the stage or
//! touch the profile; they only re-prompt.

use serde::Serialize;

use super::catalog::AdmissionCatalog;
use super::domain::{ApplicantProfile, Subject, MAX_ACHIEVEMENT_SCORE, MAX_EXAM_SCORE};
use super::evaluation::EligibilityReport;

/// Which answer the conversation currently waits for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeStage {
    AwaitingInstitution,
    AwaitingScore(Subject),
    AwaitingSupplementary,
    AwaitingAchievements,
}

impl IntakeStage {
    pub const fn label(self) -> &'static str {
        match self {
            IntakeStage::AwaitingInstitution => "awaiting_institution",
            IntakeStage::AwaitingScore(Subject::Math) => "awaiting_math",
            IntakeStage::AwaitingScore(Subject::NativeLanguage) => "awaiting_native_language",
            IntakeStage::AwaitingScore(Subject::Physics) => "awaiting_physics",
            IntakeStage::AwaitingScore(Subject::ComputerScience) => "awaiting_computer_science",
            IntakeStage::AwaitingSupplementary => "awaiting_supplementary_exam",
            IntakeStage::AwaitingAchievements => "awaiting_achievements",
        }
    }
}

/// What to ask the applicant next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    ChooseInstitution { options: Vec<String> },
    EnterScore { subject: Subject },
    EnterSupplementary,
    EnterAchievements,
}

/// Recoverable per-answer failure. The stage stays put and the same input is
/// requested again; this never surfaces as a propagated error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("'{input}' is not one of the listed institutions")]
    UnknownInstitution { input: String },
    #[error("'{input}' is not a whole number")]
    NotANumber { input: String },
    #[error("{value} is outside the accepted range 0-{max}")]
    OutOfRange { value: u16, max: u16 },
}

/// Outcome of feeding one answer to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeReply {
    /// The answer was stored; ask for the next input.
    Ask(Prompt),
    /// The answer was rejected; re-ask the same input.
    Retry {
        error: ValidationError,
        prompt: Prompt,
    },
    /// Collection finished; the profile was evaluated and discarded.
    Complete(EligibilityReport),
}

/// One conversation's collection state. Owned by the orchestrator, one per
/// conversation id; nothing is shared across conversations.
#[derive(Debug, Clone)]
pub struct IntakeSession {
    stage: IntakeStage,
    profile: ApplicantProfile,
}

impl Default for IntakeSession {
    fn default() -> Self {
        Self::new()
    }
}

impl IntakeSession {
    /// Starts a fresh conversation at the institution prompt.
    pub fn new() -> Self {
        Self {
            stage: IntakeStage::AwaitingInstitution,
            profile: ApplicantProfile::default(),
        }
    }

    pub fn stage(&self) -> IntakeStage {
        self.stage
    }

    /// Fields collected so far.
    pub fn profile(&self) -> &ApplicantProfile {
        &self.profile
    }

    /// The prompt matching the current stage, for opening and re-prompting.
    pub fn prompt(&self, catalog: &AdmissionCatalog) -> Prompt {
        match self.stage {
            IntakeStage::AwaitingInstitution => Prompt::ChooseInstitution {
                options: catalog
                    .institution_names()
                    .iter()
                    .map(|name| name.to_string())
                    .collect(),
            },
            IntakeStage::AwaitingScore(subject) => Prompt::EnterScore { subject },
            IntakeStage::AwaitingSupplementary => Prompt::EnterSupplementary,
            IntakeStage::AwaitingAchievements => Prompt::EnterAchievements,
        }
    }

    /// Validates one answer against the current stage. A valid answer stores
    /// its field and advances; the final one evaluates the finished profile.
    pub fn answer(&mut self, catalog: &AdmissionCatalog, input: &str) -> IntakeReply {
        match self.stage {
            IntakeStage::AwaitingInstitution => self.answer_institution(catalog, input),
            IntakeStage::AwaitingScore(subject) => self.answer_score(catalog, subject, input),
            IntakeStage::AwaitingSupplementary => self.answer_supplementary(catalog, input),
            IntakeStage::AwaitingAchievements => self.answer_achievements(catalog, input),
        }
    }

    fn answer_institution(&mut self, catalog: &AdmissionCatalog, input: &str) -> IntakeReply {
        // Exact, case-sensitive match against the names as displayed.
        let name = input.trim();
        if !catalog.contains(name) {
            return self.retry(
                catalog,
                ValidationError::UnknownInstitution {
                    input: name.to_string(),
                },
            );
        }

        self.profile.institution = name.to_string();
        self.advance(catalog, IntakeStage::AwaitingScore(Subject::Math))
    }

    fn answer_score(
        &mut self,
        catalog: &AdmissionCatalog,
        subject: Subject,
        input: &str,
    ) -> IntakeReply {
        let score = match parse_bounded(input, MAX_EXAM_SCORE) {
            Ok(score) => score,
            Err(error) => return self.retry(catalog, error),
        };
        self.profile.scores.insert(subject, score);

        let next = match subject {
            Subject::Math => IntakeStage::AwaitingScore(Subject::NativeLanguage),
            Subject::NativeLanguage => IntakeStage::AwaitingScore(Subject::Physics),
            Subject::Physics => {
                // Branch decided by the catalog, not by an applicant answer.
                if catalog.requires_supplementary(&self.profile.institution) {
                    IntakeStage::AwaitingSupplementary
                } else {
                    IntakeStage::AwaitingScore(Subject::ComputerScience)
                }
            }
            Subject::ComputerScience => IntakeStage::AwaitingAchievements,
        };
        self.advance(catalog, next)
    }

    fn answer_supplementary(&mut self, catalog: &AdmissionCatalog, input: &str) -> IntakeReply {
        let score = match parse_bounded(input, MAX_EXAM_SCORE) {
            Ok(score) => score,
            Err(error) => return self.retry(catalog, error),
        };
        self.profile.supplementary = Some(score);
        self.advance(catalog, IntakeStage::AwaitingScore(Subject::ComputerScience))
    }

    fn answer_achievements(&mut self, catalog: &AdmissionCatalog, input: &str) -> IntakeReply {
        let score = match parse_bounded(input, MAX_ACHIEVEMENT_SCORE) {
            Ok(score) => score,
            Err(error) => return self.retry(catalog, error),
        };
        self.profile.achievements = score;

        let profile = std::mem::take(&mut self.profile);
        IntakeReply::Complete(EligibilityReport::build(catalog, profile))
    }

    fn advance(&mut self, catalog: &AdmissionCatalog, stage: IntakeStage) -> IntakeReply {
        self.stage = stage;
        IntakeReply::Ask(self.prompt(catalog))
    }

    fn retry(&self, catalog: &AdmissionCatalog, error: ValidationError) -> IntakeReply {
        IntakeReply::Retry {
            error,
            prompt: self.prompt(catalog),
        }
    }
}

fn parse_bounded(input: &str, max: u16) -> Result<u16, ValidationError> {
    let trimmed = input.trim();
    let value: u16 = trimmed.parse().map_err(|_| ValidationError::NotANumber {
        input: trimmed.to_string(),
    })?;
    if value > max {
        return Err(ValidationError::OutOfRange { value, max });
    }
    Ok(value)
}
