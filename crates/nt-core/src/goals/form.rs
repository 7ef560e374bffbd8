use serde::{Deserialize, Serialize};

use super::calculator::{compute_goals, DailyGoals, GoalField, GoalValidationError};
use crate::profile::{ActivityLevel, Sex};

/// Raw values as typed into the settings form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalFormInput {
    pub height: String,
    pub weight: String,
    pub age: String,
    pub activity: String,
    pub gender: String,
}

/// Parsed calculator inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalForm {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age_years: i32,
    pub sex: Sex,
    pub activity: ActivityLevel,
}

impl GoalForm {
    /// Parse the form the way the inputs are read on screen: weight and
    /// height take the longest leading decimal, age the leading integer.
    /// Trailing junk (`"70kg"`) is ignored; no leading number is an error.
    pub fn parse(input: &GoalFormInput) -> Result<Self, GoalValidationError> {
        let weight_kg = leading_float(&input.weight)
            .filter(|v| v.is_finite())
            .ok_or(GoalValidationError::NotANumber(GoalField::Weight))?;
        let height_cm = leading_float(&input.height)
            .filter(|v| v.is_finite())
            .ok_or(GoalValidationError::NotANumber(GoalField::Height))?;
        let age_years =
            leading_int(&input.age).ok_or(GoalValidationError::NotANumber(GoalField::Age))?;

        Ok(Self {
            weight_kg,
            height_cm,
            age_years,
            sex: Sex::from_form(&input.gender),
            activity: ActivityLevel::from(input.activity.trim()),
        })
    }

    pub fn goals(&self) -> Result<DailyGoals, GoalValidationError> {
        compute_goals(
            self.weight_kg,
            self.height_cm,
            f64::from(self.age_years),
            self.sex,
            &self.activity,
        )
    }
}

fn sign_and_digits(s: &str) -> (usize, usize) {
    let bytes = s.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }
    let start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    (i, i - start)
}

fn leading_int(raw: &str) -> Option<i32> {
    let s = raw.trim_start();
    let (end, digits) = sign_and_digits(s);
    if digits == 0 {
        return None;
    }
    s[..end]
        .parse::<i64>()
        .ok()
        .map(|v| v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
}

fn leading_float(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let (mut end, mut digits) = sign_and_digits(s);

    if end < bytes.len() && bytes[end] == b'.' {
        let mut j = end + 1;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        digits += j - end - 1;
        end = j;
    }
    if digits == 0 {
        return None;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let (exp_end, exp_digits) = sign_and_digits(&s[end + 1..]);
        if exp_digits > 0 {
            end += 1 + exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(weight: &str, height: &str, age: &str) -> GoalFormInput {
        GoalFormInput {
            height: height.to_string(),
            weight: weight.to_string(),
            age: age.to_string(),
            activity: "moderate".to_string(),
            gender: "male".to_string(),
        }
    }

    #[test]
    fn parses_plain_numbers() {
        let form = GoalForm::parse(&input("70", "175", "25")).unwrap();
        assert_eq!(form.weight_kg, 70.0);
        assert_eq!(form.height_cm, 175.0);
        assert_eq!(form.age_years, 25);
        assert_eq!(form.sex, Sex::Male);
        assert_eq!(form.activity, ActivityLevel::Moderate);
        assert_eq!(form.goals().unwrap().daily_calories, 2672);
    }

    #[test]
    fn ignores_trailing_text_and_truncates_age() {
        let form = GoalForm::parse(&input(" 70.5kg", "1.75e2", "25.9")).unwrap();
        assert_eq!(form.weight_kg, 70.5);
        assert_eq!(form.height_cm, 175.0);
        assert_eq!(form.age_years, 25);
    }

    #[test]
    fn leading_dot_decimal_is_accepted() {
        let form = GoalForm::parse(&input(".5", "175", "25")).unwrap();
        assert_eq!(form.weight_kg, 0.5);
    }

    #[test]
    fn empty_or_non_numeric_fields_are_rejected() {
        assert_eq!(
            GoalForm::parse(&input("", "175", "25")),
            Err(GoalValidationError::NotANumber(GoalField::Weight))
        );
        assert_eq!(
            GoalForm::parse(&input("70", "tall", "25")),
            Err(GoalValidationError::NotANumber(GoalField::Height))
        );
        assert_eq!(
            GoalForm::parse(&input("70", "175", "-")),
            Err(GoalValidationError::NotANumber(GoalField::Age))
        );
        assert_eq!(
            GoalForm::parse(&input("70", "175", ".5")),
            Err(GoalValidationError::NotANumber(GoalField::Age))
        );
    }

    #[test]
    fn unknown_activity_is_kept() {
        let mut raw = input("70", "175", "25");
        raw.activity = "extreme".to_string();
        let form = GoalForm::parse(&raw).unwrap();
        assert_eq!(form.activity, ActivityLevel::Other("extreme".to_string()));
    }
}
