use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ActivityLevel, Sex};
use crate::goals::{DailyGoals, GoalForm};
use crate::ids::Uid;

/// Settings document stored under `user_settings/{uid}`.
///
/// Holds the calculator inputs next to the goals they produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub uid: Uid,
    pub height: f64,
    pub weight: f64,
    pub age: i32,
    pub activity: ActivityLevel,
    pub gender: Sex,
    pub daily_calories: i64,
    pub daily_water: i64,
    pub timestamp: DateTime<Utc>,
}

impl UserSettings {
    pub fn from_goals(uid: Uid, form: &GoalForm, goals: DailyGoals, timestamp: DateTime<Utc>) -> Self {
        Self {
            uid,
            height: form.height_cm,
            weight: form.weight_kg,
            age: form.age_years,
            activity: form.activity.clone(),
            gender: form.sex,
            daily_calories: goals.daily_calories,
            daily_water: goals.daily_water_ml,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn settings_document_uses_camel_case_keys() {
        let settings = UserSettings {
            uid: Uid::from("u-1"),
            height: 175.0,
            weight: 70.0,
            age: 25,
            activity: ActivityLevel::Moderate,
            gender: Sex::Male,
            daily_calories: 2672,
            daily_water: 2450,
            timestamp: "2024-05-01T10:00:00Z".parse().unwrap(),
        };

        let value = serde_json::to_value(&settings).unwrap();

        assert_eq!(value["dailyCalories"], json!(2672));
        assert_eq!(value["dailyWater"], json!(2450));
        assert_eq!(value["activity"], json!("moderate"));
        assert_eq!(value["gender"], json!("male"));
    }
}
