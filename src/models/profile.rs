//! User profile model
//!
//! Goal-calculation inputs collected at onboarding, persisted under the
//! `userProfile` key in camelCase.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Biological sex used by the BMR formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

/// Activity level for the TDEE multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Active,
    VeryActive,
}

impl ActivityLevel {
    /// TDEE multiplier applied to BMR
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Active => 1.55,
            ActivityLevel::VeryActive => 1.725,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        }
    }

    /// Lenient parse for free-text input; unknown levels fall back to
    /// sedentary, the one sanctioned default.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "light" | "lightly_active" => ActivityLevel::Light,
            "active" | "moderately_active" => ActivityLevel::Active,
            "very_active" | "very active" => ActivityLevel::VeryActive,
            _ => ActivityLevel::Sedentary,
        }
    }
}

/// Direction of the calorie adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalDirection {
    Lose,
    Maintain,
    Gain,
}

impl GoalDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalDirection::Lose => "lose",
            GoalDirection::Maintain => "maintain",
            GoalDirection::Gain => "gain",
        }
    }
}

/// The onboarding profile, persisted as a single record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    pub gender: Sex,
    pub birth_date: NaiveDate,
    /// Height in centimeters
    pub height: f64,
    /// Weight in kilograms
    pub weight: f64,
    pub goal: GoalDirection,
    /// Required when goal is lose or gain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_weight: Option<f64>,
    pub activity_level: ActivityLevel,
    /// Stored calorie goal override; takes precedence over the computed value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_goal: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> UserProfile {
        UserProfile {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            gender: Sex::Female,
            birth_date: NaiveDate::from_ymd_opt(1995, 6, 15).unwrap(),
            height: 168.0,
            weight: 62.0,
            goal: GoalDirection::Maintain,
            target_weight: None,
            activity_level: ActivityLevel::Light,
            daily_goal: None,
        }
    }

    #[test]
    fn test_wire_keys_are_camel_case() {
        let value = serde_json::to_value(sample()).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj["firstName"], "Ada");
        assert_eq!(obj["birthDate"], "1995-06-15");
        assert_eq!(obj["activityLevel"], "light");
        assert_eq!(obj["goal"], "maintain");
        assert!(!obj.contains_key("targetWeight"));
        assert!(!obj.contains_key("dailyGoal"));
    }

    #[test]
    fn test_roundtrip() {
        let mut profile = sample();
        profile.goal = GoalDirection::Lose;
        profile.target_weight = Some(58.0);
        profile.daily_goal = Some(1800);

        let value = serde_json::to_value(&profile).unwrap();
        let back: UserProfile = serde_json::from_value(value).unwrap();
        assert_eq!(back, profile);
    }

    #[test]
    fn test_unknown_activity_level_rejected_on_the_wire() {
        let raw = r#"{
            "gender": "male", "birthDate": "1990-01-01",
            "height": 180, "weight": 80,
            "goal": "maintain", "activityLevel": "heroic"
        }"#;
        assert!(serde_json::from_str::<UserProfile>(raw).is_err());
    }

    #[test]
    fn test_lenient_activity_parse_defaults_to_sedentary() {
        assert_eq!(ActivityLevel::from_str("very_active"), ActivityLevel::VeryActive);
        assert_eq!(ActivityLevel::from_str("LIGHT"), ActivityLevel::Light);
        assert_eq!(ActivityLevel::from_str("couch"), ActivityLevel::Sedentary);
    }

    #[test]
    fn test_multipliers() {
        assert_eq!(ActivityLevel::Sedentary.multiplier(), 1.2);
        assert_eq!(ActivityLevel::Light.multiplier(), 1.375);
        assert_eq!(ActivityLevel::Active.multiplier(), 1.55);
        assert_eq!(ActivityLevel::VeryActive.multiplier(), 1.725);
    }
}
