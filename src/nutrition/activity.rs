//! Step-count bonus: steps beyond a fixed baseline earn extra calorie
//! allowance, credited to the carb budget on the dashboard.

use super::targets::KCAL_PER_G_CARB;

// === Constants ===

/// Calories credited per step beyond the baseline. A flat rate; the true
/// cost of a step varies with body weight and stride, which this model
/// ignores on purpose.
pub const CALORIES_PER_STEP: f64 = 0.04;

/// Steps considered part of ordinary daily movement; they earn nothing.
pub const STEP_BASELINE: i64 = 4000;

/// Bonus calorie allowance for a day's step count. Counts at or below the
/// baseline (and any negative count a caller might hand over) yield zero.
pub fn steps_to_extra_calories(steps: i64) -> f64 {
    (steps - STEP_BASELINE).max(0) as f64 * CALORIES_PER_STEP
}

/// Converts bonus calories into extra carb grams, treating the whole
/// bonus as carb budget.
pub fn extra_carb_allowance(extra_calories: f64) -> f64 {
    extra_calories / KCAL_PER_G_CARB
}

// === Unit Tests ===
