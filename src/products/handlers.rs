use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{error, instrument, warn};

use crate::state::AppState;

use super::dto::{ProductResponse, SearchQuery};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products/search", get(search_products))
        .route("/products/:barcode", get(get_product))
}

pub(crate) fn is_valid_barcode(barcode: &str) -> bool {
    lazy_static! {
        static ref BARCODE_RE: Regex = Regex::new(r"^\d{8,14}$").unwrap();
    }
    BARCODE_RE.is_match(barcode)
}

#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(barcode): Path<String>,
) -> Result<Json<ProductResponse>, (StatusCode, String)> {
    if !is_valid_barcode(&barcode) {
        warn!(%barcode, "invalid barcode");
        return Err((StatusCode::BAD_REQUEST, "Invalid barcode".into()));
    }

    let product = state
        .food_facts
        .product_by_barcode(&barcode)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::NOT_FOUND, "Product not found".to_string()))?;

    Ok(Json(product.into()))
}

#[instrument(skip(state))]
pub async fn search_products(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<ProductResponse>>, (StatusCode, String)> {
    let q = query.q.trim();
    if q.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "q must be non-empty".into()));
    }

    let products = state.food_facts.search(q).await.map_err(internal)?;
    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    error!(error = %e, "product lookup failure");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::foodfacts::{FoodFactsClient, OffProduct};
    use crate::state::AppState;

    use super::*;

    #[test]
    fn barcode_shapes() {
        assert!(is_valid_barcode("3017620422003"));
        assert!(is_valid_barcode("12345678"));
        assert!(!is_valid_barcode("1234567"));
        assert!(!is_valid_barcode("123456789012345"));
        assert!(!is_valid_barcode("30176abc2003"));
        assert!(!is_valid_barcode(""));
    }

    #[tokio::test]
    async fn malformed_barcode_is_rejected() {
        let state = AppState::fake();
        let (status, _) = get_product(State(state), Path("not-a-code".into()))
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_barcode_is_not_found() {
        // The fake lookup client answers None for every barcode
        let state = AppState::fake();
        let (status, _) = get_product(State(state), Path("3017620422003".into()))
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn nutrient_holes_flatten_to_zero() {
        struct StubClient;
        #[async_trait]
        impl FoodFactsClient for StubClient {
            async fn product_by_barcode(
                &self,
                code: &str,
            ) -> anyhow::Result<Option<OffProduct>> {
                let raw = format!(r#"{{ "product_name": "Eau de source", "code": "{code}" }}"#);
                Ok(Some(serde_json::from_str(&raw).expect("stub product json")))
            }
            async fn search(&self, _q: &str) -> anyhow::Result<Vec<OffProduct>> {
                Ok(Vec::new())
            }
        }

        let base = AppState::fake();
        let state = AppState::from_parts(
            base.db.clone(),
            base.config.clone(),
            base.foods.clone(),
            Arc::new(StubClient),
        );
        let Json(product) = get_product(State(state), Path("12345678".into()))
            .await
            .expect("stubbed lookup should succeed");
        assert_eq!(product.name, "Eau de source");
        assert_eq!(product.calories, 0.0);
        assert_eq!(product.protein, 0.0);
    }
}
