use std::collections::BTreeSet;

use studyplan_core::{PlanDraft, SubjectConstraints};

/// Subject reference of one selected content item, as seen by the checker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSubjectRef {
    pub subject_id: String,
    pub subject_name: String,
    pub detail_subject: Option<String>,
}

impl ContentSubjectRef {
    /// Flatten every selected content item of a draft.
    pub fn from_draft(draft: &PlanDraft) -> Vec<Self> {
        draft
            .all_contents()
            .map(|content| {
                let category = content.category().unwrap_or_default().to_string();
                ContentSubjectRef {
                    subject_id: category.clone(),
                    subject_name: category,
                    detail_subject: content.specific_subject().map(str::to_string),
                }
            })
            .collect()
    }
}

/// Verdict of a subject constraint check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintCheck {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Checks selected content against a plan's subject constraints.
///
/// The wizard only routes the returned messages to errors or warnings
/// depending on `constraint_handling`.
pub trait SubjectConstraintChecker: Send + Sync {
    fn check(&self, contents: &[ContentSubjectRef], constraints: &SubjectConstraints)
    -> ConstraintCheck;
}

/// Category-name matching checker for required and excluded subjects.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultConstraintChecker;

impl SubjectConstraintChecker for DefaultConstraintChecker {
    fn check(
        &self,
        contents: &[ContentSubjectRef],
        constraints: &SubjectConstraints,
    ) -> ConstraintCheck {
        let mut errors = Vec::new();

        for required in &constraints.required_subjects {
            let category = required.subject_category.trim().to_lowercase();
            let matching = contents
                .iter()
                .filter(|content| content.subject_name.to_lowercase().contains(&category))
                .count();

            if (matching as u32) < required.min_count {
                errors.push(format!(
                    "required subject \"{}\" needs {} content items but only {matching} are selected",
                    required.subject_category, required.min_count
                ));
            }
        }

        if !constraints.excluded_subjects.is_empty() {
            let selected: BTreeSet<String> = contents
                .iter()
                .map(|content| {
                    if content.subject_id.is_empty() {
                        &content.subject_name
                    } else {
                        &content.subject_id
                    }
                })
                .filter(|subject| !subject.is_empty())
                .map(|subject| subject.trim().to_lowercase())
                .collect();

            let included: Vec<&str> = constraints
                .excluded_subjects
                .iter()
                .filter(|subject| selected.contains(&subject.trim().to_lowercase()))
                .map(String::as_str)
                .collect();

            if !included.is_empty() {
                errors.push(format!(
                    "excluded subjects are selected: {}",
                    included.join(", ")
                ));
            }
        }

        ConstraintCheck {
            valid: errors.is_empty(),
            errors,
        }
    }
}
