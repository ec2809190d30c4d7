use std::fmt;
use std::str::FromStr;

use studyplan_core::PlanError;

/// Screens of the plan creation wizard, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardStep {
    /// 1: name, purpose, scheduler and period.
    Basics,
    /// 2: exclusion dates and academy schedules.
    TimeSettings,
    /// 2.5: preview of the derived daily schedule.
    SchedulePreview,
    /// 3: content chosen by the student.
    StudentContents,
    /// 4: final content selection including recommendations.
    ContentSelection,
    /// 5: subject allocation and constraints.
    AllocationConstraints,
    /// 6: per-content quantity adjustment.
    QuantityAdjustment,
    /// 7: read-only results review.
    ResultsReview,
}

impl WizardStep {
    pub const ALL: [WizardStep; 8] = [
        WizardStep::Basics,
        WizardStep::TimeSettings,
        WizardStep::SchedulePreview,
        WizardStep::StudentContents,
        WizardStep::ContentSelection,
        WizardStep::AllocationConstraints,
        WizardStep::QuantityAdjustment,
        WizardStep::ResultsReview,
    ];

    /// Identifier used by the wizard UI.
    pub fn id(&self) -> &'static str {
        match self {
            WizardStep::Basics => "1",
            WizardStep::TimeSettings => "2",
            WizardStep::SchedulePreview => "2.5",
            WizardStep::StudentContents => "3",
            WizardStep::ContentSelection => "4",
            WizardStep::AllocationConstraints => "5",
            WizardStep::QuantityAdjustment => "6",
            WizardStep::ResultsReview => "7",
        }
    }

    pub fn number(&self) -> f64 {
        match self {
            WizardStep::Basics => 1.0,
            WizardStep::TimeSettings => 2.0,
            WizardStep::SchedulePreview => 2.5,
            WizardStep::StudentContents => 3.0,
            WizardStep::ContentSelection => 4.0,
            WizardStep::AllocationConstraints => 5.0,
            WizardStep::QuantityAdjustment => 6.0,
            WizardStep::ResultsReview => 7.0,
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for WizardStep {
    type Err = PlanError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        WizardStep::ALL
            .into_iter()
            .find(|step| step.id() == trimmed)
            .ok_or_else(|| PlanError::InvalidStep(value.to_string()))
    }
}

impl TryFrom<f64> for WizardStep {
    type Error = PlanError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        WizardStep::ALL
            .into_iter()
            .find(|step| step.number() == value)
            .ok_or_else(|| PlanError::InvalidStep(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_step_identifiers() {
        assert_eq!("2.5".parse::<WizardStep>().ok(), Some(WizardStep::SchedulePreview));
        assert_eq!(" 4 ".parse::<WizardStep>().ok(), Some(WizardStep::ContentSelection));
        assert!(matches!("8".parse::<WizardStep>(), Err(PlanError::InvalidStep(_))));
        assert!(matches!("3.5".parse::<WizardStep>(), Err(PlanError::InvalidStep(_))));
    }

    #[test]
    fn converts_from_numbers() {
        assert_eq!(WizardStep::try_from(2.5).ok(), Some(WizardStep::SchedulePreview));
        assert_eq!(WizardStep::try_from(7.0).ok(), Some(WizardStep::ResultsReview));
        assert!(WizardStep::try_from(0.0).is_err());
        for step in WizardStep::ALL {
            assert_eq!(step.to_string().parse::<WizardStep>().ok(), Some(step));
        }
    }
}
