use nt_core::goals::GoalFormInput;
use nt_core::{DailyGoals, GoalForm, GoalValidationError};

/// "Calculate" button: parse the form and compute goals. Nothing is stored.
#[derive(Default)]
pub struct CalculateGoals;

impl CalculateGoals {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self, input: &GoalFormInput) -> Result<DailyGoals, GoalValidationError> {
        GoalForm::parse(input)?.goals()
    }
}
