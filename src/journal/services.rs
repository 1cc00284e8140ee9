//! Dashboard arithmetic for one day: intake vs targets with the step
//! bonus folded in. Pure so it tests without a pool.

use crate::nutrition::activity::{extra_carb_allowance, steps_to_extra_calories};
use crate::nutrition::targets::MacroTargets;

use super::dto::DaySummary;
use super::repo::DailyLogRow;

pub fn day_summary(log: &DailyLogRow, targets: &MacroTargets) -> DaySummary {
    let bonus_calories = steps_to_extra_calories(i64::from(log.steps));
    DaySummary {
        date: log.log_date,
        calories_consumed: log.total_calories,
        calories_target: targets.calories,
        calories_remaining: f64::from(targets.calories) - log.total_calories + bonus_calories,
        steps: log.steps,
        bonus_calories,
        protein_consumed: log.total_protein,
        protein_target: targets.protein,
        carbs_consumed: log.total_carbs,
        // Step-earned calories raise the carb budget, nothing else
        carb_target_adjusted: f64::from(targets.carbs) + extra_carb_allowance(bonus_calories),
        fat_consumed: log.total_fat,
        fat_target: targets.fat,
        water_ml: log.water_ml,
    }
}

// === Unit Tests ===
