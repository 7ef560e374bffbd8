use serde::{Deserialize, Serialize};

use crate::profile::{ActivityLevel, Sex};

const WATER_ML_PER_KG: f64 = 35.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyGoals {
    pub daily_calories: i64,
    pub daily_water_ml: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalField {
    Weight,
    Height,
    Age,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GoalValidationError {
    #[error("Please enter valid numbers for height, weight, and age. ({0:?} is not a number)")]
    NotANumber(GoalField),
}

fn finite(value: f64, field: GoalField) -> Result<f64, GoalValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(GoalValidationError::NotANumber(field))
    }
}

/// Revised Harris-Benedict BMR in kcal/day.
pub fn basal_metabolic_rate(weight_kg: f64, height_cm: f64, age_years: f64, sex: Sex) -> f64 {
    match sex {
        Sex::Male => 88.362 + 13.397 * weight_kg + 4.799 * height_cm - 5.677 * age_years,
        Sex::Female => 447.593 + 9.247 * weight_kg + 3.098 * height_cm - 4.330 * age_years,
    }
}

/// Compute the daily calorie and water goals.
///
/// Weight, height and age must be finite. An unrecognized activity level is
/// not an error: it leaves the BMR unscaled.
pub fn compute_goals(
    weight_kg: f64,
    height_cm: f64,
    age_years: f64,
    sex: Sex,
    activity: &ActivityLevel,
) -> Result<DailyGoals, GoalValidationError> {
    let weight_kg = finite(weight_kg, GoalField::Weight)?;
    let height_cm = finite(height_cm, GoalField::Height)?;
    let age_years = finite(age_years, GoalField::Age)?;

    let bmr = basal_metabolic_rate(weight_kg, height_cm, age_years, sex);
    let tdee = bmr * activity.multiplier();

    Ok(DailyGoals {
        daily_calories: tdee.round() as i64,
        daily_water_ml: (weight_kg * WATER_ML_PER_KG).round() as i64,
    })
}
