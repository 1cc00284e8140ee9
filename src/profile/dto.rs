use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::nutrition::targets::{ActivityLevel, Goal, MacroTargets, Sex};
use crate::profile::repo::ProfileRow;

/// Body for PUT /profile. Enum fields reject out-of-vocabulary labels at
/// the edge; the fail-soft conversions only apply to already-stored rows.
#[derive(Debug, Deserialize)]
pub struct PutProfileRequest {
    pub name: String,
    pub age: u32,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub sex: Sex,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
}

/// Body for PUT /profile/targets: a manual macro override.
#[derive(Debug, Deserialize)]
pub struct PutTargetsRequest {
    pub calories: i32,
    pub protein: i32,
    pub carbs: i32,
    pub fat: i32,
}

impl PutTargetsRequest {
    pub fn into_targets(self) -> MacroTargets {
        MacroTargets {
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub name: String,
    pub age: i32,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub sex: String,
    pub activity_level: String,
    pub goal: String,
    pub targets: MacroTargets,
    pub updated_at: OffsetDateTime,
}

impl From<ProfileRow> for ProfileResponse {
    fn from(row: ProfileRow) -> Self {
        let targets = row.targets();
        Self {
            name: row.name,
            age: row.age,
            weight_kg: row.weight_kg,
            height_cm: row.height_cm,
            sex: row.sex,
            activity_level: row.activity_level,
            goal: row.goal,
            targets,
            updated_at: row.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_profile_request_accepts_french_labels() {
        let raw = r#"{
            "name": "Marie", "age": 28, "weight_kg": 61.5, "height_cm": 168,
            "sex": "femme", "activity_level": "légère", "goal": "perte"
        }"#;
        let request: PutProfileRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(request.sex, Sex::Female);
        assert_eq!(request.activity_level, ActivityLevel::Light);
        assert_eq!(request.goal, Goal::Loss);
    }

    #[test]
    fn put_profile_request_rejects_unknown_tier() {
        let raw = r#"{
            "name": "Marie", "age": 28, "weight_kg": 61.5, "height_cm": 168,
            "sex": "femme", "activity_level": "extrême", "goal": "perte"
        }"#;
        assert!(serde_json::from_str::<PutProfileRequest>(raw).is_err());
    }
}
