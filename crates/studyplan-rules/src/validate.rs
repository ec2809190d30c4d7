use std::collections::{BTreeSet, HashSet};

use chrono::{Local, NaiveDate};
use studyplan_core::{
    AcademySchedule, ContentItem, Exclusion, MAX_CONTENTS, PlanDraft, PlanPurpose, Result,
    SchedulerType, ValidationResult, WORKLOAD_WARNING_CONTENTS, parse_time_of_day,
};
use tracing::debug;

use crate::schema::validate_non_study_time_blocks;

/// Longest period (in days) accepted without a warning.
pub const MAX_PERIOD_DAYS: i64 = 365;

const EXCLUSION_WARNING_RATIO: f64 = 0.5;
const EXCLUSION_ERROR_RATIO: f64 = 0.8;

/// Purpose and scheduler pairs that work but are known to fit poorly.
const SUBOPTIMAL_COMBINATIONS: &[(PlanPurpose, SchedulerType, &str)] = &[
    (
        PlanPurpose::Csat,
        SchedulerType::Timetable1730,
        "the fixed 1730 timetable repeats a weekly cycle; CSAT preparation usually fits the automatic scheduler better",
    ),
    (
        PlanPurpose::MockExam,
        SchedulerType::Timetable1730,
        "the fixed 1730 timetable repeats a weekly cycle; mock exam preparation usually fits the automatic scheduler better",
    ),
];

/// Options for `validate_creation`.
#[derive(Debug, Clone)]
pub struct CreationOptions {
    /// Defer content checks to a later step (camp submissions).
    pub skip_content_validation: bool,
    /// Date the period is evaluated against.
    pub today: NaiveDate,
}

impl CreationOptions {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            skip_content_validation: false,
            today,
        }
    }

    pub fn skip_contents(mut self) -> Self {
        self.skip_content_validation = true;
        self
    }
}

impl Default for CreationOptions {
    fn default() -> Self {
        Self::new(Local::now().date_naive())
    }
}

/// Validate a complete plan submission.
///
/// Returns `Err` only for programmer or configuration failures; every rule
/// violation is reported inside the returned `ValidationResult`.
pub fn validate_creation(draft: &PlanDraft, options: &CreationOptions) -> Result<ValidationResult> {
    let mut result = ValidationResult::new();

    match (draft.period_start, draft.period_end) {
        (Some(start), Some(end)) => {
            result.merge(validate_period(start, end, options.today));
            result.merge(validate_exclusions(start, end, &draft.exclusions));
        }
        _ => result.push_error("study period (period_start and period_end) is required"),
    }

    if options.skip_content_validation {
        debug!(event = "content_validation_skipped");
    } else {
        let contents: Vec<ContentItem> = draft.all_contents().cloned().collect();
        result.merge(validate_contents(&contents));
    }

    result.merge(validate_academy_schedules(&draft.academy_schedules));

    if let (Some(purpose), Some(scheduler)) = (draft.plan_purpose, draft.scheduler_type) {
        result.merge(validate_purpose_scheduler(purpose, scheduler));
    }

    result.merge(validate_non_study_time_blocks(&draft.non_study_time_blocks)?);

    debug!(
        event = "creation_validated",
        errors = result.errors.len(),
        warnings = result.warnings.len()
    );
    Ok(result)
}

/// Validate the study period `[start, end]`.
pub fn validate_period(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> ValidationResult {
    let mut result = ValidationResult::new();

    if start < today {
        result.push_warning(format!(
            "period_start {start} is in the past; plans will only be placed from today"
        ));
    }

    if start == end {
        result.push_error(format!(
            "study period must span at least 1 day (minimum 1 day); period_start and period_end are both {start}"
        ));
        return result;
    }
    if start > end {
        result.push_error(format!(
            "period_start {start} must be before period_end {end}"
        ));
        return result;
    }

    let span_days = (end - start).num_days();
    if span_days > MAX_PERIOD_DAYS {
        result.push_warning(format!(
            "study period spans {span_days} days; periods longer than {MAX_PERIOD_DAYS} days are hard to keep up"
        ));
    }

    result
}

/// Validate exclusion dates against the period.
pub fn validate_exclusions(
    start: NaiveDate,
    end: NaiveDate,
    exclusions: &[Exclusion],
) -> ValidationResult {
    let mut result = ValidationResult::new();

    let mut excluded_days = BTreeSet::new();
    for exclusion in exclusions {
        let date = exclusion.exclusion_date;
        if date < start || date > end {
            result.push_error(format!(
                "exclusion date {date} is outside the study period ({start} ~ {end})"
            ));
        } else {
            excluded_days.insert(date);
        }
    }

    let total_days = (end - start).num_days() + 1;
    if total_days <= 0 || excluded_days.is_empty() {
        return result;
    }

    let excluded = excluded_days.len();
    let ratio = excluded as f64 / total_days as f64;
    let percent = (ratio * 100.0).round();
    if ratio > EXCLUSION_WARNING_RATIO {
        result.push_warning(format!(
            "{excluded} of {total_days} days ({percent}%) are excluded; more than half of the period has no study"
        ));
    }
    if ratio > EXCLUSION_ERROR_RATIO {
        result.push_error(format!(
            "{excluded} of {total_days} days ({percent}%) are excluded; at most 80% of the period may be excluded"
        ));
    }

    result
}

/// Validate the selected content list for a full submission.
pub fn validate_contents(contents: &[ContentItem]) -> ValidationResult {
    let mut result = ValidationResult::new();

    if contents.is_empty() {
        result.push_error("select at least one content item");
        return result;
    }

    if contents.len() > MAX_CONTENTS {
        result.push_error(format!(
            "{} content items selected; at most {MAX_CONTENTS} are allowed",
            contents.len()
        ));
    } else if contents.len() > WORKLOAD_WARNING_CONTENTS {
        result.push_warning(format!(
            "{} content items selected; more than {WORKLOAD_WARNING_CONTENTS} may be a heavy workload",
            contents.len()
        ));
    }

    result.merge(validate_content_ranges(contents, "content"));

    let mut seen = HashSet::new();
    for content in contents {
        let key = (content.content_type, content.content_id.as_str());
        if !seen.insert(key) {
            result.push_warning(format!(
                "content '{}' is selected more than once",
                content.content_id
            ));
        }
    }

    result
}

/// Check that each item covers a non-empty, non-negative range.
///
/// `label` prefixes messages together with the 1-based position.
pub fn validate_content_ranges(contents: &[ContentItem], label: &str) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (idx, content) in contents.iter().enumerate() {
        let position = idx + 1;
        if content.start_range >= content.end_range {
            result.push_error(format!(
                "{label} {position}: start_range must be less than end_range"
            ));
        }
        if content.start_range < 0 || content.end_range < 0 {
            result.push_error(format!("{label} {position}: ranges must be 0 or greater"));
        }
    }

    result
}

/// Validate weekly academy commitments.
pub fn validate_academy_schedules(schedules: &[AcademySchedule]) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (idx, schedule) in schedules.iter().enumerate() {
        let position = idx + 1;
        if !(0..=6).contains(&schedule.day_of_week) {
            result.push_error(format!(
                "academy schedule {position}: day_of_week must be between 0 and 6 (got {})",
                schedule.day_of_week
            ));
        }

        match (
            parse_time_of_day(&schedule.start_time),
            parse_time_of_day(&schedule.end_time),
        ) {
            (Some(start), Some(end)) => {
                if start >= end {
                    result.push_error(format!(
                        "academy schedule {position}: start_time {} must be before end_time {}",
                        start.format("%H:%M"),
                        end.format("%H:%M")
                    ));
                }
            }
            _ => result.push_error(format!(
                "academy schedule {position}: times must use HH:MM (got '{}' ~ '{}')",
                schedule.start_time, schedule.end_time
            )),
        }
    }

    result
}

/// Flag purpose and scheduler pairs known to fit poorly. Never blocks.
pub fn validate_purpose_scheduler(
    purpose: PlanPurpose,
    scheduler: SchedulerType,
) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (bad_purpose, bad_scheduler, advice) in SUBOPTIMAL_COMBINATIONS {
        if *bad_purpose == purpose && *bad_scheduler == scheduler {
            result.push_warning(format!(
                "plan purpose '{}' with scheduler '{}': {advice}",
                purpose.as_str(),
                scheduler.as_str()
            ));
        }
    }

    result
}
