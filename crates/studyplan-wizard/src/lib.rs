//! Step-by-step validation for the plan creation wizard.
//!
//! Each wizard step is mapped to the rule library checks that matter at that
//! point plus a few wizard-only checks (required subject quotas, subject
//! allocations and the study/review cycle). `validate_all` re-runs the steps
//! that can block submission.

pub mod constraints;
pub mod quota;
pub mod step;
pub mod validate;

pub use constraints::{
    ConstraintCheck, ContentSubjectRef, DefaultConstraintChecker, SubjectConstraintChecker,
};
pub use quota::{QuotaShortfall, required_subject_shortfalls};
pub use step::WizardStep;
pub use validate::{
    ValidatedDraft, WizardContext, finalize, validate_all, validate_all_with, validate_step,
    validate_step_with,
};
