//! Admission rules, eligibility scoring, and conversational intake.

pub mod catalog;
pub mod domain;
pub mod evaluation;
pub mod intake;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use catalog::{AdmissionCatalog, CatalogError, RuleRow, RuleSourceError};
pub use domain::{
    AdmissionRule, ApplicantProfile, EligibilityOutcome, PlacementTier, ProgramPlacement, Subject,
};
pub use evaluation::{evaluate_institution, evaluate_program, EligibilityReport};
pub use intake::{IntakeReply, IntakeSession, IntakeStage, Prompt, ValidationError};
pub use router::conversation_router;
pub use service::{AdmissionService, ConversationId, ConversationTurn};
