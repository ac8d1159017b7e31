use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::catalog::AdmissionCatalog;
use super::domain::{PlacementTier, Subject, MAX_ACHIEVEMENT_SCORE, MAX_EXAM_SCORE};
use super::evaluation::EligibilityReport;
use super::intake::{IntakeReply, IntakeSession, Prompt};

/// Identifier wrapper for one applicant conversation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationId(pub String);

/// One outbound reply: the rendered message, the stage the conversation is
/// now in, and the structured report when the conversation just completed.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationTurn {
    pub message: String,
    pub stage: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<EligibilityReport>,
}

/// Orchestrator binding intake sessions to a message transport. Sessions
/// are keyed by conversation id and never shared; the catalog is shared
/// read-only across all of them.
pub struct AdmissionService {
    catalog: Arc<AdmissionCatalog>,
    sessions: Mutex<HashMap<ConversationId, IntakeSession>>,
}

impl AdmissionService {
    pub fn new(catalog: Arc<AdmissionCatalog>) -> Self {
        Self {
            catalog,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn catalog(&self) -> &AdmissionCatalog {
        &self.catalog
    }

    /// Handles one inbound message. The first message of an unknown
    /// conversation starts it and is answered with the institution prompt;
    /// a completed conversation is dropped so the next message starts fresh.
    pub fn handle_message(&self, conversation: &ConversationId, text: &str) -> ConversationTurn {
        let mut sessions = self.sessions.lock().expect("session mutex poisoned");

        match sessions.entry(conversation.clone()) {
            Entry::Vacant(slot) => {
                let session = IntakeSession::new();
                let prompt = session.prompt(&self.catalog);
                let stage = session.stage().label();
                slot.insert(session);
                debug!(conversation = %conversation.0, "conversation started");
                ConversationTurn {
                    message: format!(
                        "Hi! Let's check which programs you qualify for.\n{}",
                        render_prompt(&prompt)
                    ),
                    stage,
                    report: None,
                }
            }
            Entry::Occupied(mut slot) => match slot.get_mut().answer(&self.catalog, text) {
                IntakeReply::Ask(prompt) => ConversationTurn {
                    message: render_prompt(&prompt),
                    stage: slot.get().stage().label(),
                    report: None,
                },
                IntakeReply::Retry { error, prompt } => ConversationTurn {
                    message: format!("{error}. {}", render_prompt(&prompt)),
                    stage: slot.get().stage().label(),
                    report: None,
                },
                IntakeReply::Complete(report) => {
                    slot.remove();
                    info!(
                        conversation = %conversation.0,
                        institution = %report.institution,
                        placements = report.placements.len(),
                        "conversation completed"
                    );
                    ConversationTurn {
                        message: render_report(&report),
                        stage: "complete",
                        report: Some(report),
                    }
                }
            },
        }
    }
}

pub(crate) fn render_prompt(prompt: &Prompt) -> String {
    match prompt {
        Prompt::ChooseInstitution { options } => {
            format!("Choose an institution: {}", options.join(", "))
        }
        Prompt::EnterScore { subject } => format!(
            "Enter your {} exam score (0-{MAX_EXAM_SCORE}):",
            subject.label()
        ),
        Prompt::EnterSupplementary => {
            format!("Enter your supplementary exam score (0-{MAX_EXAM_SCORE}):")
        }
        Prompt::EnterAchievements => {
            format!("Enter your achievement bonus points (0-{MAX_ACHIEVEMENT_SCORE}):")
        }
    }
}

pub(crate) fn render_report(report: &EligibilityReport) -> String {
    let mut lines = Vec::new();

    if report.placements.is_empty() {
        lines.push(format!(
            "You do not qualify for any program at {}.",
            report.institution
        ));
    } else {
        lines.push(format!("Results for {}:", report.institution));
        for placement in &report.placements {
            lines.push(format!("- {}", placement.description));
            lines.push(match placement.tier {
                PlacementTier::Free => format!(
                    "  score {} meets the threshold {} (free place)",
                    placement.total, placement.threshold
                ),
                PlacementTier::Paid => format!(
                    "  score {} is below the threshold {} (a paid place is still open to you)",
                    placement.total, placement.threshold
                ),
            });
        }
    }

    lines.push("Your scores:".to_string());
    for subject in Subject::ALL {
        if let Some(score) = report.profile.score(subject) {
            lines.push(format!("  {}: {}", subject.label(), score));
        }
    }
    if let Some(score) = report.profile.supplementary {
        lines.push(format!("  supplementary exam: {score}"));
    }
    lines.push(format!(
        "  achievement bonus: {}",
        report.profile.achievements
    ));

    lines.join("\n")
}
