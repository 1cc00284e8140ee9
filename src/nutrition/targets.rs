//! Daily calorie and macro target computation from a biometric profile.
//!
//! BMR uses the Mifflin-St Jeor equation, scaled by activity tier and goal
//! into a TDEE, then split 30/25/45 into protein/fat/carb grams.

use serde::{Deserialize, Serialize};

// === Constants ===

/// Energy density of protein (kcal per gram).
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
/// Energy density of carbohydrate (kcal per gram).
pub const KCAL_PER_G_CARB: f64 = 4.0;
/// Energy density of fat (kcal per gram).
pub const KCAL_PER_G_FAT: f64 = 9.0;

/// Share of daily calories allotted to protein.
const PROTEIN_SHARE: f64 = 0.30;
/// Share of daily calories allotted to fat. Carbs get the remainder.
const FAT_SHARE: f64 = 0.25;

// === Profile vocabulary ===

/// Biological sex category; selects the BMR formula branch. No other
/// categories are supported by the equation itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "homme")]
    Male,
    #[serde(rename = "femme")]
    Female,
}

impl Sex {
    pub fn label(self) -> &'static str {
        match self {
            Sex::Male => "homme",
            Sex::Female => "femme",
        }
    }

    /// Stored-label conversion. Anything that is not "homme" takes the
    /// female branch, mirroring the two-way formula split.
    pub fn from_label(label: &str) -> Self {
        if label == "homme" {
            Sex::Male
        } else {
            Sex::Female
        }
    }
}

/// Activity tier scaling BMR into maintenance expenditure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityLevel {
    #[serde(rename = "sédentaire")]
    Sedentary,
    #[serde(rename = "légère")]
    Light,
    #[serde(rename = "modérée")]
    Moderate,
    #[serde(rename = "élevée")]
    High,
    #[serde(rename = "très élevée")]
    VeryHigh,
}

impl ActivityLevel {
    pub fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::High => 1.725,
            ActivityLevel::VeryHigh => 1.9,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sédentaire",
            ActivityLevel::Light => "légère",
            ActivityLevel::Moderate => "modérée",
            ActivityLevel::High => "élevée",
            ActivityLevel::VeryHigh => "très élevée",
        }
    }

    /// Stored-label conversion; an unrecognized tier falls back to
    /// sedentary rather than failing.
    pub fn from_label(label: &str) -> Self {
        match label {
            "légère" => ActivityLevel::Light,
            "modérée" => ActivityLevel::Moderate,
            "élevée" => ActivityLevel::High,
            "très élevée" => ActivityLevel::VeryHigh,
            _ => ActivityLevel::Sedentary,
        }
    }
}

/// Weight goal; applies a flat ±5% calorie adjustment on top of the
/// activity-scaled expenditure, not a rate-derived deficit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Goal {
    #[serde(rename = "perte")]
    Loss,
    #[serde(rename = "maintien")]
    Maintenance,
    #[serde(rename = "prise")]
    Gain,
}

impl Goal {
    pub fn multiplier(self) -> f64 {
        match self {
            Goal::Loss => 0.95,
            Goal::Maintenance => 1.0,
            Goal::Gain => 1.05,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Goal::Loss => "perte",
            Goal::Maintenance => "maintien",
            Goal::Gain => "prise",
        }
    }

    /// Stored-label conversion; an unrecognized goal means maintenance.
    pub fn from_label(label: &str) -> Self {
        match label {
            "perte" => Goal::Loss,
            "prise" => Goal::Gain,
            _ => Goal::Maintenance,
        }
    }
}

// === Data structures ===

/// Immutable biometric input to the target computation. Owned by the
/// profile editor; validation happens there, not here.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BiometricProfile {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age: u32,
    pub sex: Sex,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
}

/// Daily calorie and macro targets in kcal and grams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroTargets {
    pub calories: i32,
    pub protein: i32,
    pub carbs: i32,
    pub fat: i32,
}

/// Gram targets for the three macros, without the calorie figure they
/// were derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacroSplit {
    pub protein: i32,
    pub carbs: i32,
    pub fat: i32,
}

// === Computation ===

/// Resting energy expenditure (Mifflin-St Jeor), kcal/day.
pub fn compute_bmr(profile: &BiometricProfile) -> f64 {
    let base =
        10.0 * profile.weight_kg + 6.25 * profile.height_cm - 5.0 * f64::from(profile.age);
    match profile.sex {
        Sex::Male => base + 5.0,
        Sex::Female => base - 161.0,
    }
}

/// Total daily energy expenditure adjusted for goal, rounded to the
/// nearest kcal.
pub fn compute_tdee(profile: &BiometricProfile) -> i32 {
    let tdee =
        compute_bmr(profile) * profile.activity_level.multiplier() * profile.goal.multiplier();
    tdee.round() as i32
}

/// Splits a calorie budget into gram targets: 30% protein, 25% fat,
/// remainder carbs. Each gram value rounds independently, so the grams
/// converted back to kcal can drift a few kcal from the input; the drift
/// is deliberate and displayed values depend on it.
pub fn compute_macro_targets(calories: i32) -> MacroSplit {
    let calories = f64::from(calories);
    let protein_kcal = calories * PROTEIN_SHARE;
    let fat_kcal = calories * FAT_SHARE;
    let carb_kcal = calories - protein_kcal - fat_kcal;
    MacroSplit {
        protein: (protein_kcal / KCAL_PER_G_PROTEIN).round() as i32,
        carbs: (carb_kcal / KCAL_PER_G_CARB).round() as i32,
        fat: (fat_kcal / KCAL_PER_G_FAT).round() as i32,
    }
}

/// Full pipeline: profile to daily targets. Pure and total; degenerate
/// inputs (zero weight, negative height) produce degenerate numbers, not
/// errors.
pub fn compute_daily_targets(profile: &BiometricProfile) -> MacroTargets {
    let calories = compute_tdee(profile);
    let split = compute_macro_targets(calories);
    MacroTargets {
        calories,
        protein: split.protein,
        carbs: split.carbs,
        fat: split.fat,
    }
}

// === Unit Tests ===

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_profile() -> BiometricProfile {
        BiometricProfile {
            weight_kg: 70.0,
            height_cm: 175.0,
            age: 30,
            sex: Sex::Male,
            activity_level: ActivityLevel::Moderate,
            goal: Goal::Maintenance,
        }
    }

    #[test]
    fn bmr_male_reference_value() {
        // 10*70 + 6.25*175 - 5*30 + 5 = 1648.75
        let bmr = compute_bmr(&reference_profile());
        assert!((bmr - 1648.75).abs() < f64::EPSILON);
    }

    #[test]
    fn bmr_female_offset() {
        let mut profile = reference_profile();
        profile.sex = Sex::Female;
        let bmr = compute_bmr(&profile);
        // Same formula shifted by -166 relative to the male branch
        assert!((bmr - (1648.75 - 166.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn tdee_moderate_maintenance() {
        // 1648.75 * 1.55 * 1.0 = 2555.5625, rounds to 2556
        assert_eq!(compute_tdee(&reference_profile()), 2556);
    }

    #[test]
    fn tdee_goal_adjustments() {
        let mut profile = reference_profile();
        profile.goal = Goal::Loss;
        let loss = compute_tdee(&profile);
        profile.goal = Goal::Gain;
        let gain = compute_tdee(&profile);
        let maintenance = compute_tdee(&reference_profile());
        assert!(loss < maintenance);
        assert!(gain > maintenance);
        // ±5% of the maintenance figure, within rounding
        assert!((f64::from(loss) - f64::from(maintenance) * 0.95).abs() <= 1.0);
        assert!((f64::from(gain) - f64::from(maintenance) * 1.05).abs() <= 1.0);
    }

    #[test]
    fn macro_split_of_2000() {
        let split = compute_macro_targets(2000);
        assert_eq!(split.protein, 150); // 2000*0.30/4
        assert_eq!(split.carbs, 225); // 900/4
        assert_eq!(split.fat, 56); // 500/9 rounded up
    }

    #[test]
    fn macro_rounding_drift_stays_small() {
        // Independent rounding means the grams don't re-sum exactly to the
        // calorie budget; the drift must stay within 2%.
        for calories in [1200, 1777, 2000, 2556, 3100] {
            let split = compute_macro_targets(calories);
            let energy = f64::from(split.protein) * KCAL_PER_G_PROTEIN
                + f64::from(split.carbs) * KCAL_PER_G_CARB
                + f64::from(split.fat) * KCAL_PER_G_FAT;
            let drift = (energy - f64::from(calories)).abs() / f64::from(calories);
            assert!(drift <= 0.02, "drift {drift} too large for {calories} kcal");
        }
    }

    #[test]
    fn daily_targets_compose_tdee_and_split() {
        let profile = reference_profile();
        let targets = compute_daily_targets(&profile);
        assert_eq!(targets.calories, compute_tdee(&profile));
        let split = compute_macro_targets(targets.calories);
        assert_eq!(targets.protein, split.protein);
        assert_eq!(targets.carbs, split.carbs);
        assert_eq!(targets.fat, split.fat);
        assert!(targets.protein >= 0 && targets.carbs >= 0 && targets.fat >= 0);
    }

    #[test]
    fn daily_targets_idempotent() {
        let profile = reference_profile();
        assert_eq!(compute_daily_targets(&profile), compute_daily_targets(&profile));
    }

    #[test]
    fn unknown_labels_fall_back() {
        assert_eq!(ActivityLevel::from_label("intense"), ActivityLevel::Sedentary);
        assert_eq!(Goal::from_label("bulk"), Goal::Maintenance);
        assert_eq!(Sex::from_label("autre"), Sex::Female);
    }

    #[test]
    fn labels_round_trip() {
        for level in [
            ActivityLevel::Sedentary,
            ActivityLevel::Light,
            ActivityLevel::Moderate,
            ActivityLevel::High,
            ActivityLevel::VeryHigh,
        ] {
            assert_eq!(ActivityLevel::from_label(level.label()), level);
        }
        for goal in [Goal::Loss, Goal::Maintenance, Goal::Gain] {
            assert_eq!(Goal::from_label(goal.label()), goal);
        }
    }

    #[test]
    fn french_labels_on_the_wire() {
        let json = serde_json::to_string(&ActivityLevel::Moderate).unwrap();
        assert_eq!(json, "\"modérée\"");
        let goal: Goal = serde_json::from_str("\"maintien\"").unwrap();
        assert_eq!(goal, Goal::Maintenance);
    }
}
