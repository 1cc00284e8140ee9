use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

use crate::nutrition::targets::{ActivityLevel, BiometricProfile, Goal, MacroTargets, Sex};

/// The single stored profile. The SPA is single-user, so the table holds
/// one row (id = 1) and every query addresses it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProfileRow {
    pub name: String,
    pub age: i32,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub sex: String,
    pub activity_level: String,
    pub goal: String,
    pub daily_calories: i32,
    pub daily_protein: i32,
    pub daily_carbs: i32,
    pub daily_fat: i32,
    pub updated_at: OffsetDateTime,
}

impl ProfileRow {
    /// Stored labels go through the fail-soft conversions, so a row
    /// written with an out-of-vocabulary tier still yields usable targets.
    pub fn biometrics(&self) -> BiometricProfile {
        BiometricProfile {
            weight_kg: self.weight_kg,
            height_cm: self.height_cm,
            age: self.age.max(0) as u32,
            sex: Sex::from_label(&self.sex),
            activity_level: ActivityLevel::from_label(&self.activity_level),
            goal: Goal::from_label(&self.goal),
        }
    }

    pub fn targets(&self) -> MacroTargets {
        MacroTargets {
            calories: self.daily_calories,
            protein: self.daily_protein,
            carbs: self.daily_carbs,
            fat: self.daily_fat,
        }
    }

    pub async fn get(db: &PgPool) -> anyhow::Result<Option<ProfileRow>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT name, age, weight_kg, height_cm, sex, activity_level, goal,
                   daily_calories, daily_protein, daily_carbs, daily_fat, updated_at
            FROM profiles
            WHERE id = 1
            "#,
        )
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    pub async fn upsert(
        db: &PgPool,
        name: &str,
        biometrics: &BiometricProfile,
        targets: MacroTargets,
    ) -> anyhow::Result<ProfileRow> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            INSERT INTO profiles (id, name, age, weight_kg, height_cm, sex, activity_level,
                                  goal, daily_calories, daily_protein, daily_carbs, daily_fat,
                                  updated_at)
            VALUES (1, $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, now())
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                age = EXCLUDED.age,
                weight_kg = EXCLUDED.weight_kg,
                height_cm = EXCLUDED.height_cm,
                sex = EXCLUDED.sex,
                activity_level = EXCLUDED.activity_level,
                goal = EXCLUDED.goal,
                daily_calories = EXCLUDED.daily_calories,
                daily_protein = EXCLUDED.daily_protein,
                daily_carbs = EXCLUDED.daily_carbs,
                daily_fat = EXCLUDED.daily_fat,
                updated_at = now()
            RETURNING name, age, weight_kg, height_cm, sex, activity_level, goal,
                      daily_calories, daily_protein, daily_carbs, daily_fat, updated_at
            "#,
        )
        .bind(name)
        .bind(biometrics.age as i32)
        .bind(biometrics.weight_kg)
        .bind(biometrics.height_cm)
        .bind(biometrics.sex.label())
        .bind(biometrics.activity_level.label())
        .bind(biometrics.goal.label())
        .bind(targets.calories)
        .bind(targets.protein)
        .bind(targets.carbs)
        .bind(targets.fat)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    /// Manual target override; sticks until the next biometric change
    /// recomputes the stored values.
    pub async fn set_targets(
        db: &PgPool,
        targets: MacroTargets,
    ) -> anyhow::Result<Option<ProfileRow>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            UPDATE profiles
            SET daily_calories = $1, daily_protein = $2, daily_carbs = $3,
                daily_fat = $4, updated_at = now()
            WHERE id = 1
            RETURNING name, age, weight_kg, height_cm, sex, activity_level, goal,
                      daily_calories, daily_protein, daily_carbs, daily_fat, updated_at
            "#,
        )
        .bind(targets.calories)
        .bind(targets.protein)
        .bind(targets.carbs)
        .bind(targets.fat)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }
}
