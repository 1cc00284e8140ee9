use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::extractor::MealSlot;

use super::repo::{DailyLogRow, FoodEntryRow, NewFoodEntry};

/// Body for POST /journal/:date/entries: a confirmed suggestion or a
/// manually filled food.
#[derive(Debug, Deserialize)]
pub struct AddEntryRequest {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub category: String,
    pub meal: MealSlot,
}

impl AddEntryRequest {
    pub fn into_new_entry(self) -> NewFoodEntry {
        NewFoodEntry {
            name: self.name,
            quantity: self.quantity,
            unit: self.unit,
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
            category: self.category,
            meal: self.meal,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct WaterUpdateRequest {
    /// Signed adjustment in millilitres; the stored level floors at zero.
    pub delta_ml: i32,
}

#[derive(Debug, Deserialize)]
pub struct StepsUpdateRequest {
    pub steps: i32,
}

#[derive(Debug, Serialize)]
pub struct FoodEntryResponse {
    pub id: Uuid,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub category: String,
    pub meal: MealSlot,
    pub created_at: OffsetDateTime,
}

impl From<FoodEntryRow> for FoodEntryResponse {
    fn from(row: FoodEntryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            quantity: row.quantity,
            unit: row.unit,
            calories: row.calories,
            protein: row.protein,
            carbs: row.carbs,
            fat: row.fat,
            category: row.category,
            meal: MealSlot::from_label(&row.meal),
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct JournalResponse {
    pub date: Date,
    pub total_calories: f64,
    pub total_protein: f64,
    pub total_carbs: f64,
    pub total_fat: f64,
    pub water_ml: i32,
    pub steps: i32,
    pub entries: Vec<FoodEntryResponse>,
}

impl JournalResponse {
    pub fn from_parts(log: DailyLogRow, entries: Vec<FoodEntryRow>) -> Self {
        Self {
            date: log.log_date,
            total_calories: log.total_calories,
            total_protein: log.total_protein,
            total_carbs: log.total_carbs,
            total_fat: log.total_fat,
            water_ml: log.water_ml,
            steps: log.steps,
            entries: entries.into_iter().map(FoodEntryResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DaySummary {
    pub date: Date,
    pub calories_consumed: f64,
    pub calories_target: i32,
    pub calories_remaining: f64,
    pub steps: i32,
    pub bonus_calories: f64,
    pub protein_consumed: f64,
    pub protein_target: i32,
    pub carbs_consumed: f64,
    pub carb_target_adjusted: f64,
    pub fat_consumed: f64,
    pub fat_target: i32,
    pub water_ml: i32,
}

#[cfg(test)]
mod tests {
    use time::macros::{date, datetime};

    use super::*;

    #[test]
    fn entry_response_carries_meal_label() {
        let row = FoodEntryRow {
            id: Uuid::new_v4(),
            log_date: date!(2025 - 06 - 01),
            name: "Riz blanc cuit".into(),
            quantity: 150.0,
            unit: "100g".into(),
            calories: 195.0,
            protein: 4.05,
            carbs: 42.0,
            fat: 0.45,
            category: "Féculents".into(),
            meal: "dîner".into(),
            created_at: datetime!(2025-06-01 19:30 UTC),
        };
        let response = FoodEntryResponse::from(row);
        assert_eq!(response.meal, MealSlot::Dinner);
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"dîner\""));
        assert!(json.contains("Riz blanc cuit"));
    }
}
