//! OpenFoodFacts lookup client. Sits behind a trait so handlers can run
//! against a stub in tests; the real implementation speaks the public
//! API over reqwest.

use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const PRODUCT_FIELDS: &str = "product_name,nutriments,code,serving_size";

/// Product record as returned by the API. Nutrient fields are optional on
/// the wire; an absent value means unknown, never an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OffProduct {
    #[serde(default)]
    pub product_name: String,
    pub nutriments: Option<OffNutriments>,
    pub code: String,
    pub serving_size: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OffNutriments {
    #[serde(rename = "energy-kcal_100g")]
    pub energy_kcal_100g: Option<f64>,
    pub proteins_100g: Option<f64>,
    pub carbohydrates_100g: Option<f64>,
    pub fat_100g: Option<f64>,
}

#[async_trait]
pub trait FoodFactsClient: Send + Sync {
    async fn product_by_barcode(&self, barcode: &str) -> anyhow::Result<Option<OffProduct>>;
    async fn search(&self, query: &str) -> anyhow::Result<Vec<OffProduct>>;
}

pub struct HttpFoodFactsClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpFoodFactsClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .context("build food facts http client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct ProductEnvelope {
    product: Option<OffProduct>,
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    products: Vec<OffProduct>,
}

#[async_trait]
impl FoodFactsClient for HttpFoodFactsClient {
    async fn product_by_barcode(&self, barcode: &str) -> anyhow::Result<Option<OffProduct>> {
        let url = format!(
            "{}/api/v2/product/{}?fields={}",
            self.base_url, barcode, PRODUCT_FIELDS
        );
        let res = self
            .http
            .get(&url)
            .send()
            .await
            .context("food facts product request")?;
        // The API answers 404 for unknown barcodes
        if !res.status().is_success() {
            return Ok(None);
        }
        let body: ProductEnvelope = res.json().await.context("food facts product body")?;
        Ok(body.product)
    }

    async fn search(&self, query: &str) -> anyhow::Result<Vec<OffProduct>> {
        let res = self
            .http
            .get(format!("{}/cgi/search.pl", self.base_url))
            .query(&[
                ("search_terms", query),
                ("search_simple", "1"),
                ("action", "process"),
                ("json", "1"),
                ("fields", PRODUCT_FIELDS),
            ])
            .send()
            .await
            .context("food facts search request")?;
        if !res.status().is_success() {
            return Ok(Vec::new());
        }
        let body: SearchEnvelope = res.json().await.context("food facts search body")?;
        Ok(body.products)
    }
}

// === Unit Tests ===
