use studyplan_core::{PlanStatus, ValidationResult};

/// Outgoing edges of the plan lifecycle, excluding the implicit self edge.
pub fn allowed_transitions(from: PlanStatus) -> &'static [PlanStatus] {
    use PlanStatus::*;

    match from {
        Draft => &[Saved, Cancelled],
        Saved => &[Active, Draft, Cancelled],
        Active => &[Paused, Completed, Cancelled],
        Paused => &[Active, Cancelled],
        Completed => &[],
        Cancelled => &[Active],
    }
}

/// Returns true when `from -> to` is allowed. Staying in place always is.
pub fn can_transition(from: PlanStatus, to: PlanStatus) -> bool {
    from == to || allowed_transitions(from).contains(&to)
}

/// Validate a lifecycle transition requested by the plan management workflow.
pub fn validate_status_transition(from: PlanStatus, to: PlanStatus) -> ValidationResult {
    let mut result = ValidationResult::new();
    if !can_transition(from, to) {
        result.push_error(format!(
            "cannot change plan status from '{from}' to '{to}'"
        ));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_is_terminal() {
        for to in PlanStatus::ALL {
            if to == PlanStatus::Completed {
                continue;
            }
            assert!(
                !can_transition(PlanStatus::Completed, to),
                "completed -> {to} must be rejected"
            );
        }
    }

    #[test]
    fn self_transition_is_always_valid() {
        for status in PlanStatus::ALL {
            let result = validate_status_transition(status, status);
            assert!(result.is_valid());
            assert!(result.errors.is_empty() && result.warnings.is_empty());
        }
    }

    #[test]
    fn rejected_transition_names_both_states() {
        let result = validate_status_transition(PlanStatus::Completed, PlanStatus::Active);
        assert!(!result.is_valid());
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("completed"));
        assert!(result.errors[0].contains("active"));
    }

    #[test]
    fn transition_table_matches_lifecycle() {
        use PlanStatus::*;

        let expected = [
            (Draft, vec![Saved, Cancelled]),
            (Saved, vec![Active, Draft, Cancelled]),
            (Active, vec![Paused, Completed, Cancelled]),
            (Paused, vec![Active, Cancelled]),
            (Completed, vec![]),
            (Cancelled, vec![Active]),
        ];

        for (from, targets) in expected {
            for to in PlanStatus::ALL {
                let allowed = from == to || targets.contains(&to);
                assert_eq!(can_transition(from, to), allowed, "{from} -> {to}");
            }
        }

        assert!(validate_status_transition(Paused, Active).is_valid());
        assert!(validate_status_transition(Paused, Active).warnings.is_empty());
    }
}
