use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::Uid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Map the gender selector value. Only the exact option value `"male"`
    /// selects the male coefficients; anything else takes the female ones.
    pub fn from_form(raw: &str) -> Self {
        if raw == "male" {
            Sex::Male
        } else {
            Sex::Female
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

/// Activity level as selected on the settings screen.
///
/// Values outside the three known options are kept verbatim so they
/// round-trip through the settings document; the calculator treats them
/// as a 1.0 multiplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActivityLevel {
    Low,
    Moderate,
    High,
    Other(String),
}

impl ActivityLevel {
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Low => 1.2,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::High => 1.725,
            ActivityLevel::Other(_) => 1.0,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ActivityLevel::Low => "low",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::High => "high",
            ActivityLevel::Other(raw) => raw,
        }
    }
}

impl From<&str> for ActivityLevel {
    fn from(raw: &str) -> Self {
        match raw {
            "low" => ActivityLevel::Low,
            "moderate" => ActivityLevel::Moderate,
            "high" => ActivityLevel::High,
            other => ActivityLevel::Other(other.to_string()),
        }
    }
}

impl From<String> for ActivityLevel {
    fn from(raw: String) -> Self {
        ActivityLevel::from(raw.as_str())
    }
}

impl From<ActivityLevel> for String {
    fn from(level: ActivityLevel) -> Self {
        level.as_str().to_string()
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Profile document stored under `users/{uid}`.
///
/// Registration writes only `uid`, `email` and `created_at`; the setup
/// screen fills in the rest later, so everything but the uid is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub uid: Uid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<ActivityLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl UserProfile {
    /// The partial document written right after account creation.
    pub fn registered(uid: Uid, email: Option<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            uid,
            username: None,
            sex: None,
            height_cm: None,
            weight_kg: None,
            activity_level: None,
            email,
            created_at: Some(created_at),
        }
    }
}

/// Field subset merged into an existing profile document.
///
/// Only `Some` fields are serialized, so the merge touches nothing else.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<ActivityLevel>,
}

impl ProfilePatch {
    pub fn username(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_activity_round_trips_verbatim() {
        let level: ActivityLevel = serde_json::from_value(json!("sedentary")).unwrap();
        assert_eq!(level, ActivityLevel::Other("sedentary".to_string()));
        assert_eq!(serde_json::to_value(&level).unwrap(), json!("sedentary"));
        assert_eq!(level.multiplier(), 1.0);
    }

    #[test]
    fn partial_profile_document_deserializes() {
        let profile: UserProfile = serde_json::from_value(json!({
            "uid": "u-1",
            "email": "a@b.c",
            "createdAt": "2024-05-01T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(profile.uid, Uid::from("u-1"));
        assert_eq!(profile.username, None);
        assert!(profile.created_at.is_some());
    }

    #[test]
    fn patch_serializes_only_present_fields() {
        let patch = ProfilePatch::username("sam");
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({"username": "sam"}));
        assert!(!patch.is_empty());
        assert!(ProfilePatch::default().is_empty());
    }

    #[test]
    fn sex_from_form_defaults_to_female_coefficients() {
        assert_eq!(Sex::from_form("male"), Sex::Male);
        assert_eq!(Sex::from_form(" Male "), Sex::Female);
        assert_eq!(Sex::from_form("Male"), Sex::Female);
        assert_eq!(Sex::from_form("female"), Sex::Female);
        assert_eq!(Sex::from_form(""), Sex::Female);
    }
}
