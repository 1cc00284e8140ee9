use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WeightRow {
    pub id: Uuid,
    pub measured_on: Date,
    pub weight_kg: f64,
    pub created_at: OffsetDateTime,
}

pub async fn insert(
    db: &PgPool,
    id: Uuid,
    measured_on: Date,
    weight_kg: f64,
) -> anyhow::Result<WeightRow> {
    let row = sqlx::query_as::<_, WeightRow>(
        r#"
        INSERT INTO weights (id, measured_on, weight_kg)
        VALUES ($1, $2, $3)
        RETURNING id, measured_on, weight_kg, created_at
        "#,
    )
    .bind(id)
    .bind(measured_on)
    .bind(weight_kg)
    .fetch_one(db)
    .await?;
    Ok(row)
}

pub async fn list_recent(db: &PgPool, limit: i64) -> anyhow::Result<Vec<WeightRow>> {
    let rows = sqlx::query_as::<_, WeightRow>(
        r#"
        SELECT id, measured_on, weight_kg, created_at
        FROM weights
        ORDER BY measured_on DESC, created_at DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(db)
    .await?;
    Ok(rows)
}
