use chrono::{Local, NaiveDate};
use serde::Serialize;
use studyplan_core::{ConstraintHandling, OrderedSet, PlanDraft, ValidationResult};
use studyplan_rules::{
    validate_academy_schedules, validate_content_ranges, validate_exclusions, validate_period,
};
use tracing::debug;

use crate::constraints::{ContentSubjectRef, DefaultConstraintChecker, SubjectConstraintChecker};
use crate::quota::required_subject_shortfalls;
use crate::step::WizardStep;

/// Steps re-run before submission; the others cannot block.
const SUBMISSION_STEPS: [WizardStep; 4] = [
    WizardStep::Basics,
    WizardStep::TimeSettings,
    WizardStep::ContentSelection,
    WizardStep::QuantityAdjustment,
];

/// Inputs a step needs besides the draft itself.
#[derive(Clone, Copy)]
pub struct WizardContext<'a> {
    /// Date the period is evaluated against.
    pub today: NaiveDate,
    pub checker: &'a dyn SubjectConstraintChecker,
}

impl WizardContext<'static> {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            checker: &DefaultConstraintChecker,
        }
    }
}

impl WizardContext<'_> {
    pub fn with_checker<'b>(self, checker: &'b dyn SubjectConstraintChecker) -> WizardContext<'b> {
        WizardContext {
            today: self.today,
            checker,
        }
    }
}

impl Default for WizardContext<'static> {
    fn default() -> Self {
        Self::new(Local::now().date_naive())
    }
}

/// A draft that passed `validate_all`, with the warnings it carried.
///
/// This is the only form in which a draft is handed to the scheduler.
#[derive(Debug, Clone, Serialize)]
pub struct ValidatedDraft {
    pub draft: PlanDraft,
    pub warnings: Vec<String>,
}

/// Validate one wizard step using today's date and the default checker.
pub fn validate_step(step: WizardStep, draft: &PlanDraft) -> ValidationResult {
    validate_step_with(step, draft, &WizardContext::default())
}

/// Validate one wizard step.
pub fn validate_step_with(
    step: WizardStep,
    draft: &PlanDraft,
    ctx: &WizardContext<'_>,
) -> ValidationResult {
    let result = match step {
        WizardStep::Basics => validate_basics(draft, ctx),
        WizardStep::TimeSettings => validate_time_settings(draft),
        WizardStep::SchedulePreview => validate_schedule_preview(draft),
        WizardStep::StudentContents => validate_student_contents(draft),
        WizardStep::ContentSelection => validate_content_selection(draft),
        WizardStep::AllocationConstraints => validate_allocation_constraints(draft, ctx),
        WizardStep::QuantityAdjustment => validate_quantity_adjustment(draft),
        WizardStep::ResultsReview => ValidationResult::new(),
    }
    .deduplicated();

    debug!(
        event = "step_validated",
        step = %step,
        errors = result.errors.len(),
        warnings = result.warnings.len()
    );
    result
}

/// Validate every step that can block submission.
pub fn validate_all(draft: &PlanDraft) -> ValidationResult {
    validate_all_with(draft, &WizardContext::default())
}

/// Validate every step that can block submission, removing repeated messages.
pub fn validate_all_with(draft: &PlanDraft, ctx: &WizardContext<'_>) -> ValidationResult {
    let mut errors = OrderedSet::new();
    let mut warnings = OrderedSet::new();

    for step in SUBMISSION_STEPS {
        let result = validate_step_with(step, draft, ctx);
        errors.extend(result.errors);
        warnings.extend(result.warnings);
    }

    ValidationResult {
        errors: errors.into_vec(),
        warnings: warnings.into_vec(),
    }
}

/// Run the submission checks and hand back the draft when it is admissible.
pub fn finalize(
    draft: &PlanDraft,
    ctx: &WizardContext<'_>,
) -> Result<ValidatedDraft, ValidationResult> {
    let result = validate_all_with(draft, ctx);
    if !result.is_valid() {
        return Err(result);
    }

    Ok(ValidatedDraft {
        draft: draft.clone(),
        warnings: result.warnings,
    })
}

fn validate_basics(draft: &PlanDraft, ctx: &WizardContext<'_>) -> ValidationResult {
    let mut result = ValidationResult::new();

    let has_name = draft
        .name
        .as_deref()
        .is_some_and(|name| !name.trim().is_empty());
    if !has_name {
        result.push_error("enter a plan name");
    }

    if draft.plan_purpose.is_none() && !draft.student_may_choose_purpose() {
        result.push_error("select a plan purpose");
    }

    if draft.scheduler_type.is_none() {
        result.push_error("select a scheduler type");
    }

    match (draft.period_start, draft.period_end) {
        (Some(start), Some(end)) => result.merge(validate_period(start, end, ctx.today)),
        _ => result.push_error("set the study period"),
    }

    result
}

fn validate_time_settings(draft: &PlanDraft) -> ValidationResult {
    let mut result = ValidationResult::new();

    if !draft.exclusions.is_empty() {
        match (draft.period_start, draft.period_end) {
            (Some(start), Some(end)) => {
                result.merge(validate_exclusions(start, end, &draft.exclusions));
            }
            _ => debug!(event = "exclusions_unchecked", reason = "period not set"),
        }
    }

    if !draft.academy_schedules.is_empty() {
        result.merge(validate_academy_schedules(&draft.academy_schedules));
    }

    result
}

fn validate_schedule_preview(draft: &PlanDraft) -> ValidationResult {
    let mut result = ValidationResult::new();

    if draft.daily_schedule.as_ref().is_none_or(|days| days.is_empty()) {
        result.push_warning("no schedule preview yet; go back and review the schedule");
    }
    if draft.schedule_summary.is_none() {
        result.push_warning("no schedule summary yet");
    }

    result
}

fn validate_student_contents(draft: &PlanDraft) -> ValidationResult {
    validate_content_ranges(&draft.student_contents, "student content")
}

fn validate_content_selection(draft: &PlanDraft) -> ValidationResult {
    let mut result = ValidationResult::new();

    if draft.total_contents() == 0 {
        result.push_error("select at least one content item");
    }

    result.merge(validate_content_ranges(
        &draft.recommended_contents,
        "recommended content",
    ));

    if let Some(constraints) = &draft.subject_constraints
        && constraints.enable_required_subjects_validation
        && !constraints.required_subjects.is_empty()
    {
        let shortfalls =
            required_subject_shortfalls(draft.all_contents(), &constraints.required_subjects);
        if !shortfalls.is_empty() {
            let details = shortfalls
                .iter()
                .map(|shortfall| {
                    format!(
                        "{} {}/{}",
                        shortfall.label, shortfall.selected, shortfall.required
                    )
                })
                .collect::<Vec<_>>()
                .join(", ");
            result.push_error(format!(
                "required subjects need more content: {details}"
            ));
        }
    }

    result
}

fn validate_allocation_constraints(draft: &PlanDraft, ctx: &WizardContext<'_>) -> ValidationResult {
    let mut result = validate_content_selection(draft);

    if draft
        .scheduler_type
        .is_some_and(|scheduler| scheduler.is_fixed_timetable())
    {
        if draft.subject_allocations.is_empty() {
            result.push_error("set the strategy and weakness subject allocations");
        } else {
            let content_subjects: OrderedSet<&str> =
                draft.all_contents().filter_map(|content| content.category()).collect();
            let missing: OrderedSet<&str> = draft
                .subject_allocations
                .iter()
                .map(|allocation| allocation.subject_name.as_str())
                .filter(|subject| !content_subjects.contains(subject))
                .collect();

            if !missing.is_empty() {
                result.push_error(format!(
                    "select content for these allocated subjects: {}",
                    missing.into_vec().join(", ")
                ));
            }
        }

        let cycle = draft.study_review_cycle.unwrap_or_default();
        if !(1..=7).contains(&cycle.study_days) {
            result.push_error("study days must be between 1 and 7");
        }
        if !(1..=7).contains(&cycle.review_days) {
            result.push_error("review days must be between 1 and 7");
        }
        if cycle.study_days.saturating_add(cycle.review_days) > 7 {
            result.push_error("study days and review days must add up to 7 or fewer");
        }
    }

    if let Some(constraints) = &draft.subject_constraints {
        let subjects = ContentSubjectRef::from_draft(draft);
        let check = ctx.checker.check(&subjects, constraints);
        if !check.valid {
            match constraints.constraint_handling {
                ConstraintHandling::Strict => result.errors.extend(check.errors),
                ConstraintHandling::Lenient => result.warnings.extend(check.errors),
            }
        }
    }

    result
}

fn validate_quantity_adjustment(draft: &PlanDraft) -> ValidationResult {
    let mut result = ValidationResult::new();

    if draft.total_contents() == 0 {
        result.push_error("select at least one content item");
    }

    result.merge(validate_content_ranges(&draft.student_contents, "student content"));
    result.merge(validate_content_ranges(
        &draft.recommended_contents,
        "recommended content",
    ));

    result
}
