//! Immutable institution → program → rule catalog built from tabular rule
//! rows at startup and shared read-only by every conversation.

mod loader;

pub use loader::{load_rows, load_rows_from_path, RuleSourceError};

use std::collections::BTreeMap;

use serde::Deserialize;

use super::domain::{AdmissionRule, Subject};

/// Sentinel the rule sheet uses for "not applicable".
const ABSENT: &str = "-";

/// One rule-source row in the shape handed over by the spreadsheet loader.
///
/// Numeric fields stay as raw text so the catalog builder can fail fast with
/// a precise error instead of silently defaulting.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleRow {
    #[serde(rename = "Institution")]
    pub institution: String,
    #[serde(rename = "Program")]
    pub program: String,
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "Passing Total", default)]
    pub total_score_threshold: String,
    #[serde(rename = "Supplementary Required", default)]
    pub supplementary_required: String,
    #[serde(rename = "Supplementary Min", default)]
    pub supplementary_min: String,
    #[serde(rename = "Elective Subjects", default)]
    pub elective_subjects: String,
    #[serde(rename = "Math", default)]
    pub math: String,
    #[serde(rename = "Native Language", default)]
    pub native_language: String,
    #[serde(rename = "Physics", default)]
    pub physics: String,
    #[serde(rename = "Computer Science", default)]
    pub computer_science: String,
}

impl RuleRow {
    fn subject_minimum(&self, subject: Subject) -> &str {
        match subject {
            Subject::Math => &self.math,
            Subject::NativeLanguage => &self.native_language,
            Subject::Physics => &self.physics,
            Subject::ComputerScience => &self.computer_science,
        }
    }
}

/// Rule rows that cannot be turned into a catalog. Surfaced to the operator
/// at startup; the service never runs on a partially built catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("row {row}: missing program description")]
    MissingDescription { row: usize },
    #[error("row {row}: missing passing total")]
    MissingThreshold { row: usize },
    #[error("row {row}: {field} value '{value}' is not a non-negative integer")]
    InvalidScore {
        row: usize,
        field: &'static str,
        value: String,
    },
    #[error("row {row}: unrecognized supplementary exam flag '{value}'")]
    InvalidFlag { row: usize, value: String },
    #[error("row {row}: unknown elective subject '{value}'")]
    UnknownElective { row: usize, value: String },
    #[error("row {row}: duplicate program '{program}' under '{institution}'")]
    DuplicateProgram {
        row: usize,
        institution: String,
        program: String,
    },
}

/// A named program paired with its admission rule.
#[derive(Debug, Clone)]
pub struct ProgramEntry {
    pub name: String,
    pub rule: AdmissionRule,
}

#[derive(Debug, Clone)]
struct InstitutionEntry {
    name: String,
    programs: Vec<ProgramEntry>,
}

/// Read-only admission rules, preserving rule-source order for institutions
/// and for programs within an institution.
#[derive(Debug, Clone, Default)]
pub struct AdmissionCatalog {
    institutions: Vec<InstitutionEntry>,
}

impl AdmissionCatalog {
    /// Pure transformation of loader rows into the nested catalog. Rows
    /// sharing an institution name merge under it in first-seen order.
    pub fn from_rows(rows: &[RuleRow]) -> Result<Self, CatalogError> {
        let mut catalog = AdmissionCatalog::default();

        for (index, row) in rows.iter().enumerate() {
            let row_number = index + 1;
            let rule = build_rule(row_number, row)?;

            let institution = row.institution.trim();
            let entry = match catalog
                .institutions
                .iter_mut()
                .find(|entry| entry.name == institution)
            {
                Some(entry) => entry,
                None => {
                    catalog.institutions.push(InstitutionEntry {
                        name: institution.to_string(),
                        programs: Vec::new(),
                    });
                    catalog
                        .institutions
                        .last_mut()
                        .expect("institution just pushed")
                }
            };

            let program = row.program.trim();
            if entry.programs.iter().any(|existing| existing.name == program) {
                return Err(CatalogError::DuplicateProgram {
                    row: row_number,
                    institution: institution.to_string(),
                    program: program.to_string(),
                });
            }
            entry.programs.push(ProgramEntry {
                name: program.to_string(),
                rule,
            });
        }

        Ok(catalog)
    }

    /// Institution names in rule-source order, for the choice prompt.
    pub fn institution_names(&self) -> Vec<&str> {
        self.institutions
            .iter()
            .map(|entry| entry.name.as_str())
            .collect()
    }

    /// Exact, case-sensitive lookup, matching the names as displayed.
    pub fn contains(&self, institution: &str) -> bool {
        self.programs(institution).is_some()
    }

    /// Programs under an institution, preserving rule-source order.
    pub fn programs(&self, institution: &str) -> Option<&[ProgramEntry]> {
        self.institutions
            .iter()
            .find(|entry| entry.name == institution)
            .map(|entry| entry.programs.as_slice())
    }

    /// True when any program under the institution requires the
    /// supplementary exam; drives the intake branch after physics.
    pub fn requires_supplementary(&self, institution: &str) -> bool {
        self.programs(institution)
            .map(|programs| {
                programs
                    .iter()
                    .any(|program| program.rule.supplementary_min.is_some())
            })
            .unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.institutions.is_empty()
    }
}

fn build_rule(row_number: usize, row: &RuleRow) -> Result<AdmissionRule, CatalogError> {
    let description = row.description.trim();
    if description.is_empty() {
        return Err(CatalogError::MissingDescription { row: row_number });
    }

    let total_score_threshold =
        parse_minimum(row_number, "passing total", &row.total_score_threshold)?
            .ok_or(CatalogError::MissingThreshold { row: row_number })?;

    let supplementary_min = if parse_flag(row_number, &row.supplementary_required)? {
        let minimum = parse_minimum(row_number, "supplementary min", &row.supplementary_min)?;
        Some(minimum.unwrap_or(0))
    } else {
        None
    };

    let mut optional_subjects: BTreeMap<Subject, u16> = BTreeMap::new();
    if !is_absent(&row.elective_subjects) {
        for token in row.elective_subjects.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            let subject = Subject::parse(token).ok_or_else(|| CatalogError::UnknownElective {
                row: row_number,
                value: token.to_string(),
            })?;
            optional_subjects.insert(subject, 0);
        }
    }

    // A subject named in the elective list is never required outright; its
    // column minimum becomes the elective floor instead.
    let mut required_subjects = BTreeMap::new();
    for subject in Subject::ALL {
        let Some(minimum) =
            parse_minimum(row_number, subject.label(), row.subject_minimum(subject))?
        else {
            continue;
        };
        if let Some(floor) = optional_subjects.get_mut(&subject) {
            *floor = minimum;
        } else {
            required_subjects.insert(subject, minimum);
        }
    }

    Ok(AdmissionRule {
        description: description.to_string(),
        required_subjects,
        optional_subjects,
        supplementary_min,
        total_score_threshold,
    })
}

fn is_absent(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed == ABSENT
}

fn parse_minimum(
    row: usize,
    field: &'static str,
    value: &str,
) -> Result<Option<u16>, CatalogError> {
    if is_absent(value) {
        return Ok(None);
    }
    let trimmed = value.trim();
    trimmed
        .parse::<u16>()
        .map(Some)
        .map_err(|_| CatalogError::InvalidScore {
            row,
            field,
            value: trimmed.to_string(),
        })
}

fn parse_flag(row: usize, value: &str) -> Result<bool, CatalogError> {
    if is_absent(value) {
        return Ok(false);
    }
    match value.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "1" => Ok(true),
        "no" | "n" | "false" | "0" => Ok(false),
        other => Err(CatalogError::InvalidFlag {
            row,
            value: other.to_string(),
        }),
    }
}
