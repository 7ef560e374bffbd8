//! Daily goal calculation.
//!
//! Harris-Benedict (revised) BMR scaled by an activity multiplier, plus a
//! flat 35 ml/kg water goal. Everything here is pure and deterministic.

mod calculator;
mod form;

pub use calculator::{basal_metabolic_rate, compute_goals, DailyGoals, GoalField, GoalValidationError};
pub use form::{GoalForm, GoalFormInput};
