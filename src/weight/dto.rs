use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use super::repo::WeightRow;

/// Body for POST /weights. `measured_on` defaults to the current UTC day.
#[derive(Debug, Deserialize)]
pub struct RecordWeightRequest {
    pub weight_kg: f64,
    pub measured_on: Option<Date>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
}
fn default_limit() -> i64 {
    30
}

#[derive(Debug, Serialize)]
pub struct WeightResponse {
    pub id: Uuid,
    pub measured_on: Date,
    pub weight_kg: f64,
    pub created_at: OffsetDateTime,
}

impl From<WeightRow> for WeightResponse {
    fn from(row: WeightRow) -> Self {
        Self {
            id: row.id,
            measured_on: row.measured_on,
            weight_kg: row.weight_kg,
            created_at: row.created_at,
        }
    }
}
