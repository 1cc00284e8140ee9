use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use thiserror::Error;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::extractor::MealSlot;

#[derive(Debug, Error)]
pub enum JournalError {
    #[error("entry not found")]
    EntryNotFound,
    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

/// One day's accumulator row. Totals carry the invariant
/// `total_x == sum(entry.x)`: writes adjust them by the entry's own
/// delta inside the same transaction, they are never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DailyLogRow {
    pub log_date: Date,
    pub total_calories: f64,
    pub total_protein: f64,
    pub total_carbs: f64,
    pub total_fat: f64,
    pub water_ml: i32,
    pub steps: i32,
}

impl DailyLogRow {
    /// View of a day with no stored row yet. Reads never materialize a
    /// row; only writes do.
    pub fn empty(date: Date) -> Self {
        Self {
            log_date: date,
            total_calories: 0.0,
            total_protein: 0.0,
            total_carbs: 0.0,
            total_fat: 0.0,
            water_ml: 0,
            steps: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FoodEntryRow {
    pub id: Uuid,
    pub log_date: Date,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub category: String,
    pub meal: String,
    pub created_at: OffsetDateTime,
}

/// An accepted suggestion on its way into the journal; identity and
/// timestamp are assigned at the boundary, not here.
#[derive(Debug, Clone)]
pub struct NewFoodEntry {
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

const ENTRY_COLUMNS: &str =
    "id, log_date, name, quantity, unit, calories, protein, carbs, fat, category, meal, created_at";

pub async fn get_log(db: &PgPool, date: Date) -> Result<Option<DailyLogRow>, JournalError> {
    let row = sqlx::query_as::<_, DailyLogRow>(
        r#"
        SELECT log_date, total_calories, total_protein, total_carbs, total_fat,
               water_ml, steps
        FROM daily_logs
        WHERE log_date = $1
        "#,
    )
    .bind(date)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn list_entries(db: &PgPool, date: Date) -> Result<Vec<FoodEntryRow>, JournalError> {
    let rows = sqlx::query_as::<_, FoodEntryRow>(&format!(
        r#"
        SELECT {ENTRY_COLUMNS}
        FROM food_entries
        WHERE log_date = $1
        ORDER BY created_at ASC
        "#
    ))
    .bind(date)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Appends an entry and bumps the day's totals by the entry's macros in
/// one transaction.
pub async fn append_entry(
    db: &PgPool,
    date: Date,
    id: Uuid,
    created_at: OffsetDateTime,
    new: &NewFoodEntry,
) -> Result<FoodEntryRow, JournalError> {
    let mut tx = db.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO daily_logs (log_date)
        VALUES ($1)
        ON CONFLICT (log_date) DO NOTHING
        "#,
    )
    .bind(date)
    .execute(&mut *tx)
    .await?;

    let row = sqlx::query_as::<_, FoodEntryRow>(&format!(
        r#"
        INSERT INTO food_entries ({ENTRY_COLUMNS})
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING {ENTRY_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(date)
    .bind(&new.name)
    .bind(new.quantity)
    .bind(&new.unit)
    .bind(new.calories)
    .bind(new.protein)
    .bind(new.carbs)
    .bind(new.fat)
    .bind(&new.category)
    .bind(new.meal.label())
    .bind(created_at)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        UPDATE daily_logs
        SET total_calories = total_calories + $2,
            total_protein = total_protein + $3,
            total_carbs = total_carbs + $4,
            total_fat = total_fat + $5
        WHERE log_date = $1
        "#,
    )
    .bind(date)
    .bind(new.calories)
    .bind(new.protein)
    .bind(new.carbs)
    .bind(new.fat)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(row)
}

/// Removes an entry and subtracts its macros from the day's totals in one
/// transaction.
pub async fn remove_entry(
    db: &PgPool,
    date: Date,
    id: Uuid,
) -> Result<FoodEntryRow, JournalError> {
    let mut tx = db.begin().await?;

    let entry = sqlx::query_as::<_, FoodEntryRow>(&format!(
        r#"
        DELETE FROM food_entries
        WHERE id = $1 AND log_date = $2
        RETURNING {ENTRY_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(date)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(JournalError::EntryNotFound)?;

    sqlx::query(
        r#"
        UPDATE daily_logs
        SET total_calories = total_calories - $2,
            total_protein = total_protein - $3,
            total_carbs = total_carbs - $4,
            total_fat = total_fat - $5
        WHERE log_date = $1
        "#,
    )
    .bind(date)
    .bind(entry.calories)
    .bind(entry.protein)
    .bind(entry.carbs)
    .bind(entry.fat)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(entry)
}

/// Relative water adjustment, floored at zero, creating the day's row on
/// first use.
pub async fn adjust_water(
    db: &PgPool,
    date: Date,
    delta_ml: i32,
) -> Result<DailyLogRow, JournalError> {
    let row = sqlx::query_as::<_, DailyLogRow>(
        r#"
        INSERT INTO daily_logs (log_date, water_ml)
        VALUES ($1, GREATEST(0, $2))
        ON CONFLICT (log_date) DO UPDATE
        SET water_ml = GREATEST(0, daily_logs.water_ml + $2)
        RETURNING log_date, total_calories, total_protein, total_carbs, total_fat,
                  water_ml, steps
        "#,
    )
    .bind(date)
    .bind(delta_ml)
    .fetch_one(db)
    .await?;
    Ok(row)
}

/// Absolute step count for the day, creating the day's row on first use.
pub async fn set_steps(db: &PgPool, date: Date, steps: i32) -> Result<DailyLogRow, JournalError> {
    let row = sqlx::query_as::<_, DailyLogRow>(
        r#"
        INSERT INTO daily_logs (log_date, steps)
        VALUES ($1, $2)
        ON CONFLICT (log_date) DO UPDATE
        SET steps = EXCLUDED.steps
        RETURNING log_date, total_calories, total_protein, total_carbs, total_fat,
                  water_ml, steps
        "#,
    )
    .bind(date)
    .bind(steps)
    .fetch_one(db)
    .await?;
    Ok(row)
}
