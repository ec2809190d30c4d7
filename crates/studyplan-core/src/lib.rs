//! Core contracts for study plan validation.
//!
//! This crate defines the plan draft model assembled by the creation wizard,
//! the plan lifecycle states, the uniform `ValidationResult` returned by every
//! rule, and small helpers shared by the rule library and the wizard.

pub mod error;
pub mod model;
pub mod result;
pub mod status;
pub mod time;

pub use error::{PlanError, Result};
pub use model::{
    AcademySchedule, ConstraintHandling, ContentItem, ContentType, DailySchedule, Exclusion,
    ExclusionType, NonStudyTimeBlock, PlanDraft, PlanPurpose, RequiredSubject, ScheduleSummary,
    SchedulerType, StudyReviewCycle, SubjectAllocation, SubjectConstraints, TemplateLockedFields,
    TemplateStep1Fields,
};
pub use result::{OrderedSet, ValidationResult};
pub use status::PlanStatus;
pub use time::parse_time_of_day;

/// Maximum number of content items a single plan may carry.
pub const MAX_CONTENTS: usize = 9;

/// Content count above which a workload advisory is raised.
pub const WORKLOAD_WARNING_CONTENTS: usize = 6;
