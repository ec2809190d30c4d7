use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Declared goal of a study plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum PlanPurpose {
    /// School exam preparation.
    #[serde(rename = "내신대비")]
    SchoolExam,
    /// Mock exam preparation.
    #[serde(rename = "모의고사", alias = "모의고사(수능)")]
    MockExam,
    /// College scholastic ability test preparation.
    #[serde(rename = "수능")]
    Csat,
    #[serde(rename = "기타")]
    Other,
}

impl PlanPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanPurpose::SchoolExam => "내신대비",
            PlanPurpose::MockExam => "모의고사",
            PlanPurpose::Csat => "수능",
            PlanPurpose::Other => "기타",
        }
    }
}

/// Scheduling mode the plan will be handed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum SchedulerType {
    /// Fixed weekly timetable with study/review cycles and subject allocations.
    #[serde(rename = "1730_timetable")]
    Timetable1730,
    #[serde(rename = "자동스케줄러")]
    Automatic,
    #[serde(rename = "custom")]
    Custom,
}

impl SchedulerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchedulerType::Timetable1730 => "1730_timetable",
            SchedulerType::Automatic => "자동스케줄러",
            SchedulerType::Custom => "custom",
        }
    }

    /// Returns true for the fixed-timetable mode that requires subject allocations.
    pub fn is_fixed_timetable(&self) -> bool {
        matches!(self, SchedulerType::Timetable1730)
    }
}

/// Reason a date is excluded from the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ExclusionType {
    #[serde(rename = "휴가")]
    Vacation,
    #[serde(rename = "개인사정")]
    Personal,
    #[serde(rename = "휴일지정")]
    DesignatedHoliday,
    #[serde(rename = "기타")]
    Other,
}

/// A calendar date on which nothing should be scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Exclusion {
    pub exclusion_date: NaiveDate,
    pub exclusion_type: ExclusionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// A weekly academy commitment the plan must not contradict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AcademySchedule {
    /// 0 = Sunday .. 6 = Saturday.
    pub day_of_week: i64,
    /// `HH:MM` (a trailing `:SS` is tolerated).
    pub start_time: String,
    pub end_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub academy_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

/// Kind of study material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Book,
    Lecture,
    Custom,
}

/// A selected content item and the page/episode range to cover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ContentItem {
    pub content_type: ContentType,
    pub content_id: String,
    pub start_range: i64,
    pub end_range: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Subject category (ex.: 수학, 영어).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_category: Option<String>,
    /// Specific subject inside the category (ex.: 미적분).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

impl ContentItem {
    pub fn new(content_type: ContentType, content_id: impl Into<String>, start: i64, end: i64) -> Self {
        Self {
            content_type,
            content_id: content_id.into(),
            start_range: start,
            end_range: end,
            title: None,
            subject_category: None,
            subject: None,
        }
    }

    pub fn with_subject(mut self, category: impl Into<String>, subject: Option<&str>) -> Self {
        self.subject_category = Some(category.into());
        self.subject = subject.map(|value| value.to_string());
        self
    }

    /// Category with blank values treated as absent.
    pub fn category(&self) -> Option<&str> {
        self.subject_category
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    /// Specific subject with blank values treated as absent.
    pub fn specific_subject(&self) -> Option<&str> {
        self.subject
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

/// How violations reported by the subject constraint checker are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintHandling {
    /// Violations block the step.
    Strict,
    /// Violations are advisory.
    #[default]
    #[serde(alias = "warning", alias = "auto_fix")]
    Lenient,
}

/// Minimum amount of content required for a subject category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RequiredSubject {
    pub subject_category: String,
    /// Narrows the requirement to one subject inside the category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub min_count: u32,
}

/// Required/excluded subject policy attached to a plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SubjectConstraints {
    #[serde(default)]
    pub enable_required_subjects_validation: bool,
    #[serde(default)]
    pub required_subjects: Vec<RequiredSubject>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded_subjects: Vec<String>,
    #[serde(default)]
    pub constraint_handling: ConstraintHandling,
}

/// Subject included in the fixed-timetable allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SubjectAllocation {
    pub subject_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_days: Option<u8>,
}

/// Study/review day balance for the fixed-timetable mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StudyReviewCycle {
    pub study_days: i64,
    pub review_days: i64,
}

impl Default for StudyReviewCycle {
    fn default() -> Self {
        Self {
            study_days: 6,
            review_days: 1,
        }
    }
}

/// Recurring window during which no study is placed (meals, sleep, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NonStudyTimeBlock {
    #[serde(rename = "type")]
    pub kind: String,
    pub start_time: String,
    pub end_time: String,
    /// Days the block applies to; absent means every day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Template flags controlling which step 1 fields the student may fill in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TemplateStep1Fields {
    #[serde(default)]
    pub allow_student_plan_purpose: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TemplateLockedFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step1: Option<TemplateStep1Fields>,
}

/// One day of the schedule preview produced by the scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DailySchedule {
    pub date: NaiveDate,
    pub day_type: String,
    pub study_hours: f64,
}

/// Aggregate figures of the schedule preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScheduleSummary {
    pub total_days: u32,
    pub total_study_days: u32,
    pub total_review_days: u32,
    pub total_study_hours: f64,
}

/// In-progress plan configuration assembled by the creation wizard.
///
/// The validators only read a draft; they never mutate or persist it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PlanDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_purpose: Option<PlanPurpose>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduler_type: Option<SchedulerType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_end: Option<NaiveDate>,
    #[serde(default)]
    pub exclusions: Vec<Exclusion>,
    #[serde(default)]
    pub academy_schedules: Vec<AcademySchedule>,
    #[serde(default)]
    pub student_contents: Vec<ContentItem>,
    #[serde(default)]
    pub recommended_contents: Vec<ContentItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_constraints: Option<SubjectConstraints>,
    #[serde(default)]
    pub subject_allocations: Vec<SubjectAllocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub study_review_cycle: Option<StudyReviewCycle>,
    #[serde(default)]
    pub non_study_time_blocks: Vec<NonStudyTimeBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_locked_fields: Option<TemplateLockedFields>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_schedule: Option<Vec<DailySchedule>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_summary: Option<ScheduleSummary>,
}

impl PlanDraft {
    /// Student-chosen and recommended contents, in that order.
    pub fn all_contents(&self) -> impl Iterator<Item = &ContentItem> {
        self.student_contents
            .iter()
            .chain(self.recommended_contents.iter())
    }

    pub fn total_contents(&self) -> usize {
        self.student_contents.len() + self.recommended_contents.len()
    }

    /// Whether a template lets the student pick the plan purpose later.
    pub fn student_may_choose_purpose(&self) -> bool {
        self.template_locked_fields
            .as_ref()
            .and_then(|fields| fields.step1.as_ref())
            .is_some_and(|step1| step1.allow_student_plan_purpose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_wizard_payload() {
        let draft: PlanDraft = serde_json::from_value(json!({
            "name": "겨울방학 플랜",
            "plan_purpose": "모의고사(수능)",
            "scheduler_type": "1730_timetable",
            "period_start": "2025-01-01",
            "period_end": "2025-02-28",
            "student_contents": [
                {"content_type": "book", "content_id": "b-1", "start_range": 1, "end_range": 120,
                 "subject_category": "수학", "subject": "미적분"}
            ],
            "subject_constraints": {"constraint_handling": "warning"},
            "non_study_time_blocks": [
                {"type": "수면", "start_time": "00:00", "end_time": "07:00"}
            ]
        }))
        .expect("parse draft");

        assert_eq!(draft.plan_purpose, Some(PlanPurpose::MockExam));
        assert_eq!(draft.scheduler_type, Some(SchedulerType::Timetable1730));
        assert_eq!(draft.total_contents(), 1);
        assert_eq!(
            draft.subject_constraints.map(|c| c.constraint_handling),
            Some(ConstraintHandling::Lenient)
        );
        assert_eq!(draft.non_study_time_blocks[0].kind, "수면");
        assert!(draft.exclusions.is_empty());
    }

    #[test]
    fn blank_subject_fields_are_absent() {
        let item = ContentItem::new(ContentType::Lecture, "l-1", 0, 10).with_subject("  ", Some(""));
        assert_eq!(item.category(), None);
        assert_eq!(item.specific_subject(), None);
    }

    #[test]
    fn purpose_choice_follows_template_flag() {
        let mut draft = PlanDraft::default();
        assert!(!draft.student_may_choose_purpose());
        draft.template_locked_fields = Some(TemplateLockedFields {
            step1: Some(TemplateStep1Fields {
                allow_student_plan_purpose: true,
            }),
        });
        assert!(draft.student_may_choose_purpose());
    }
}
