//! Rule library for study plan drafts.
//!
//! Every rule is a pure function returning a `ValidationResult`; the
//! `validate_creation` entrypoint unions them for a complete submission.

pub mod schema;
pub mod status;
pub mod validate;

pub use schema::{
    NonStudyBlockKind, NonStudyTimeBlockContract, non_study_time_blocks_json_schema,
    plan_draft_json_schema, validate_non_study_time_blocks,
};
pub use status::{allowed_transitions, can_transition, validate_status_transition};
pub use studyplan_core::{PlanDraft, PlanError, PlanStatus, ValidationResult};
pub use validate::{
    CreationOptions, MAX_PERIOD_DAYS, validate_academy_schedules, validate_content_ranges,
    validate_contents, validate_creation, validate_exclusions, validate_period,
    validate_purpose_scheduler,
};
