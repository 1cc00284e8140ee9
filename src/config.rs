use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct FoodFactsConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    /// Optional path to a food table overriding the embedded one.
    pub food_table_path: Option<String>,
    pub food_facts: FoodFactsConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let food_table_path = std::env::var("FOOD_TABLE_PATH").ok();
        let food_facts = FoodFactsConfig {
            base_url: std::env::var("OFF_BASE_URL")
                .unwrap_or_else(|_| "https://world.openfoodfacts.org".into()),
        };
        Ok(Self {
            database_url,
            food_table_path,
            food_facts,
        })
    }
}
