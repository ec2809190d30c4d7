use chrono::NaiveDate;
use serde_json::json;
use studyplan_core::{PlanDraft, SubjectConstraints};
use studyplan_wizard::{
    ConstraintCheck, ContentSubjectRef, SubjectConstraintChecker, WizardContext, WizardStep,
    finalize, validate_all_with, validate_step_with,
};

fn ctx() -> WizardContext<'static> {
    WizardContext::new(NaiveDate::from_ymd_opt(2024, 12, 1).unwrap_or_default())
}

fn draft(value: serde_json::Value) -> PlanDraft {
    serde_json::from_value(value).expect("parse draft")
}

fn base_draft() -> serde_json::Value {
    json!({
        "name": "1학기 중간고사 대비",
        "plan_purpose": "내신대비",
        "scheduler_type": "1730_timetable",
        "period_start": "2025-03-01",
        "period_end": "2025-04-20",
        "student_contents": [
            {"content_type": "book", "content_id": "book-math", "start_range": 1, "end_range": 150,
             "subject_category": "수학", "subject": "수학I"}
        ],
        "recommended_contents": [
            {"content_type": "lecture", "content_id": "lecture-eng", "start_range": 1, "end_range": 20,
             "subject_category": "영어"}
        ],
        "subject_allocations": [
            {"subject_name": "수학"},
            {"subject_name": "영어"}
        ],
        "study_review_cycle": {"study_days": 6, "review_days": 1}
    })
}

struct RejectingChecker;

impl SubjectConstraintChecker for RejectingChecker {
    fn check(
        &self,
        contents: &[ContentSubjectRef],
        _constraints: &SubjectConstraints,
    ) -> ConstraintCheck {
        ConstraintCheck {
            valid: false,
            errors: vec![format!("checked {} content items", contents.len())],
        }
    }
}

#[test]
fn basics_step_requires_core_fields() {
    let result = validate_step_with(WizardStep::Basics, &draft(json!({})), &ctx());
    assert_eq!(
        result.errors,
        vec![
            "enter a plan name",
            "select a plan purpose",
            "select a scheduler type",
            "set the study period",
        ]
    );
}

#[test]
fn template_can_leave_purpose_to_the_student() {
    let mut value = base_draft();
    value.as_object_mut().map(|object| object.remove("plan_purpose"));
    value["template_locked_fields"] = json!({"step1": {"allow_student_plan_purpose": true}});

    let result = validate_step_with(WizardStep::Basics, &draft(value), &ctx());
    assert!(result.is_valid(), "{:?}", result.errors);
}

#[test]
fn basics_step_delegates_period_rules() {
    let mut value = base_draft();
    value["period_end"] = json!("2025-03-01");

    let result = validate_step_with(WizardStep::Basics, &draft(value), &ctx());
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].contains("minimum 1 day"));
}

#[test]
fn time_settings_step_checks_only_present_lists() {
    let result = validate_step_with(WizardStep::TimeSettings, &draft(base_draft()), &ctx());
    assert!(result.is_valid());

    let mut value = base_draft();
    value["academy_schedules"] = json!([
        {"day_of_week": 1, "start_time": "19:00", "end_time": "18:00"}
    ]);
    value["exclusions"] = json!([
        {"exclusion_date": "2025-05-05", "exclusion_type": "휴가"}
    ]);
    let result = validate_step_with(WizardStep::TimeSettings, &draft(value), &ctx());
    assert_eq!(result.errors.len(), 2);
}

#[test]
fn required_subject_quota_reports_one_aggregated_error() {
    let value = json!({
        "student_contents": [
            {"content_type": "book", "content_id": "b1", "start_range": 0, "end_range": 10,
             "subject_category": "수학"}
        ],
        "subject_constraints": {
            "enable_required_subjects_validation": true,
            "required_subjects": [
                {"subject_category": "수학", "min_count": 2},
                {"subject_category": "국어", "min_count": 1}
            ],
            "constraint_handling": "strict"
        }
    });

    let result = validate_step_with(WizardStep::ContentSelection, &draft(value), &ctx());
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].contains("수학 1/2"));
    assert!(result.errors[0].contains("국어 0/1"));
}

#[test]
fn quota_is_skipped_when_disabled() {
    let value = json!({
        "student_contents": [
            {"content_type": "book", "content_id": "b1", "start_range": 0, "end_range": 10,
             "subject_category": "수학"}
        ],
        "subject_constraints": {
            "enable_required_subjects_validation": false,
            "required_subjects": [{"subject_category": "수학", "min_count": 5}],
            "constraint_handling": "strict"
        }
    });

    let result = validate_step_with(WizardStep::ContentSelection, &draft(value), &ctx());
    assert!(result.is_valid());
}

#[test]
fn allocation_step_requires_matching_content() {
    let mut value = base_draft();
    value["subject_allocations"] = json!([
        {"subject_name": "수학"},
        {"subject_name": "과학"},
        {"subject_name": "사회"}
    ]);

    let result = validate_step_with(WizardStep::AllocationConstraints, &draft(value), &ctx());
    assert_eq!(
        result.errors,
        vec!["select content for these allocated subjects: 과학, 사회"]
    );

    let mut value = base_draft();
    value["subject_allocations"] = json!([]);
    let result = validate_step_with(WizardStep::AllocationConstraints, &draft(value), &ctx());
    assert_eq!(
        result.errors,
        vec!["set the strategy and weakness subject allocations"]
    );
}

#[test]
fn allocation_step_checks_cycle_bounds_independently() {
    let mut value = base_draft();
    value["study_review_cycle"] = json!({"study_days": 8, "review_days": 0});

    let result = validate_step_with(WizardStep::AllocationConstraints, &draft(value), &ctx());
    assert_eq!(result.errors.len(), 3);

    let mut value = base_draft();
    value["study_review_cycle"] = json!({"study_days": 5, "review_days": 3});
    let result = validate_step_with(WizardStep::AllocationConstraints, &draft(value), &ctx());
    assert_eq!(
        result.errors,
        vec!["study days and review days must add up to 7 or fewer"]
    );
}

#[test]
fn allocation_step_reports_extreme_cycle_values() {
    let mut value = base_draft();
    value["study_review_cycle"] = json!({"study_days": i64::MAX, "review_days": 1});
    let result = validate_step_with(WizardStep::AllocationConstraints, &draft(value), &ctx());
    assert_eq!(
        result.errors,
        vec![
            "study days must be between 1 and 7",
            "study days and review days must add up to 7 or fewer",
        ]
    );

    let mut value = base_draft();
    value["study_review_cycle"] = json!({"study_days": i64::MIN, "review_days": -1});
    let result = validate_step_with(WizardStep::AllocationConstraints, &draft(value), &ctx());
    assert_eq!(
        result.errors,
        vec![
            "study days must be between 1 and 7",
            "review days must be between 1 and 7",
        ]
    );

    let mut value = base_draft();
    value["study_review_cycle"] = json!({"study_days": i64::MAX, "review_days": 1});
    assert!(finalize(&draft(value), &ctx()).is_ok());
}

#[test]
fn allocation_checks_apply_only_to_fixed_timetable() {
    let mut value = base_draft();
    value["scheduler_type"] = json!("자동스케줄러");
    value["subject_allocations"] = json!([]);
    value["study_review_cycle"] = json!({"study_days": 9, "review_days": 9});

    let result = validate_step_with(WizardStep::AllocationConstraints, &draft(value), &ctx());
    assert!(result.is_valid());
}

#[test]
fn constraint_handling_routes_checker_output() {
    let checker = RejectingChecker;

    let mut value = base_draft();
    value["subject_constraints"] = json!({"constraint_handling": "strict"});
    let strict = validate_step_with(
        WizardStep::AllocationConstraints,
        &draft(value),
        &ctx().with_checker(&checker),
    );
    assert_eq!(strict.errors, vec!["checked 2 content items"]);
    assert!(strict.warnings.is_empty());

    let mut value = base_draft();
    value["subject_constraints"] = json!({"constraint_handling": "lenient"});
    let lenient = validate_step_with(
        WizardStep::AllocationConstraints,
        &draft(value),
        &ctx().with_checker(&checker),
    );
    assert!(lenient.is_valid());
    assert_eq!(lenient.warnings, vec!["checked 2 content items"]);
}

#[test]
fn default_checker_flags_excluded_subjects() {
    let mut value = base_draft();
    value["subject_constraints"] = json!({
        "excluded_subjects": ["영어"],
        "constraint_handling": "strict"
    });

    let result = validate_step_with(WizardStep::AllocationConstraints, &draft(value), &ctx());
    assert_eq!(result.errors, vec!["excluded subjects are selected: 영어"]);
}

#[test]
fn quantity_step_rechecks_both_lists() {
    let mut value = base_draft();
    value["student_contents"][0]["end_range"] = json!(0);
    value["recommended_contents"][0]["start_range"] = json!(-3);

    let result = validate_step_with(WizardStep::QuantityAdjustment, &draft(value), &ctx());
    assert_eq!(
        result.errors,
        vec![
            "student content 1: start_range must be less than end_range",
            "recommended content 1: ranges must be 0 or greater",
        ]
    );
}

#[test]
fn validate_all_deduplicates_repeated_findings() {
    let mut value = base_draft();
    value["student_contents"] = json!([]);
    value["recommended_contents"] = json!([
        {"content_type": "lecture", "content_id": "l1", "start_range": 5, "end_range": 5}
    ]);
    let plan = draft(value);

    let step4 = validate_step_with(WizardStep::ContentSelection, &plan, &ctx());
    let step6 = validate_step_with(WizardStep::QuantityAdjustment, &plan, &ctx());
    assert_eq!(step4.errors, step6.errors);

    let all = validate_all_with(&plan, &ctx());
    assert_eq!(
        all.errors,
        vec!["recommended content 1: start_range must be less than end_range"]
    );
}

#[test]
fn validate_all_accumulates_every_submission_step() {
    let mut value = base_draft();
    value.as_object_mut().map(|object| object.remove("name"));
    value["academy_schedules"] = json!([
        {"day_of_week": 9, "start_time": "18:00", "end_time": "19:00"}
    ]);
    value["student_contents"] = json!([]);
    value["recommended_contents"] = json!([]);
    let plan = draft(value);

    let all = validate_all_with(&plan, &ctx());
    for step in [
        WizardStep::Basics,
        WizardStep::TimeSettings,
        WizardStep::ContentSelection,
        WizardStep::QuantityAdjustment,
    ] {
        for error in validate_step_with(step, &plan, &ctx()).errors {
            assert!(all.errors.contains(&error), "missing {error} from step {step}");
        }
    }
    assert!(all.errors.iter().any(|e| e == "enter a plan name"));
    assert!(all.errors.iter().any(|e| e.starts_with("academy schedule 1")));
    assert!(all.errors.iter().any(|e| e == "select at least one content item"));
}

#[test]
fn finalize_hands_back_admissible_drafts() {
    let validated = finalize(&draft(base_draft()), &ctx()).expect("draft is admissible");
    assert_eq!(validated.draft.name.as_deref(), Some("1학기 중간고사 대비"));
    assert!(validated.warnings.is_empty());

    let mut value = base_draft();
    value["period_start"] = json!("2025-05-01");
    let report = finalize(&draft(value), &ctx()).expect_err("reversed period is rejected");
    assert!(!report.is_valid());
}
