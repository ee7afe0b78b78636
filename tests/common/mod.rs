//! Common test utilities and fixtures
#![allow(dead_code)]

use advanced_trader::common::types::ProductConstraints;
use advanced_trader::config::types::ApiCredentials;
use once_cell::sync::Lazy;
use rust_decimal_macros::dec;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const BTC_PRODUCT_PATH: &str = "/api/v3/brokerage/products/BTC-USDC";
pub const ORDERS_PATH: &str = "/api/v3/brokerage/orders";

/// Trading rules matching the `PRODUCT_BTC` fixture
pub static BTC_CONSTRAINTS: Lazy<ProductConstraints> = Lazy::new(|| {
    ProductConstraints::new(
        "BTC-USDC",
        dec!(0.00000001),
        dec!(0.01),
        dec!(0.00000001),
        dec!(3400),
    )
    .expect("fixture constraints are valid")
});

pub fn test_credentials() -> ApiCredentials {
    ApiCredentials::new("test_api_key".to_string(), "test_api_secret".to_string())
}

/// Serve `body` as JSON for `GET {path}`
pub async fn mount_json_get(server: &MockServer, route: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_raw(body, "application/json"))
        .mount(server)
        .await;
}

/// Serve a Fear and Greed payload with the given score
pub async fn mount_fng(server: &MockServer, score: &str, classification: &str) {
    Mock::given(method("GET"))
        .and(path("/fng/"))
        .and(query_param("limit", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(api_responses::fng(score, classification), "application/json"),
        )
        .mount(server)
        .await;
}

/// Sample API responses for testing
pub mod api_responses {
    /// BTC-USDC product with a 50000 spot price
    pub const PRODUCT_BTC: &str = r#"{
        "product_id": "BTC-USDC",
        "price": "50000",
        "price_percentage_change_24h": "-1.2",
        "volume_24h": "1234.5",
        "base_increment": "0.00000001",
        "quote_increment": "0.01",
        "quote_min_size": "1",
        "quote_max_size": "150000000",
        "base_min_size": "0.00000001",
        "base_max_size": "3400",
        "base_name": "Bitcoin",
        "quote_name": "USD Coin",
        "status": "online",
        "trading_disabled": false,
        "base_currency_id": "BTC",
        "quote_currency_id": "USDC"
    }"#;

    /// Product listing without a price
    pub const PRODUCT_NO_PRICE: &str = r#"{
        "product_id": "BTC-USDC",
        "price": "",
        "base_increment": "0.00000001",
        "quote_increment": "0.01",
        "base_min_size": "0.00000001",
        "base_max_size": "3400"
    }"#;

    pub const NOT_FOUND: &str = r#"{
        "error": "NOT_FOUND",
        "message": "ProductID is invalid"
    }"#;

    pub const ORDER_ACCEPTED: &str = r#"{
        "success": true,
        "failure_reason": "UNKNOWN_FAILURE_REASON",
        "order_id": "11111-00000-000000",
        "success_response": {
            "order_id": "11111-00000-000000",
            "product_id": "BTC-USDC",
            "side": "BUY",
            "client_order_id": "0000-00000-000000"
        }
    }"#;

    pub const ORDER_REJECTED: &str = r#"{
        "success": false,
        "failure_reason": "UNKNOWN_FAILURE_REASON",
        "order_id": "",
        "error_response": {
            "error": "INSUFFICIENT_FUND",
            "message": "Insufficient balance in source account",
            "error_details": "",
            "preview_failure_reason": "PREVIEW_INSUFFICIENT_FUND"
        }
    }"#;

    /// Fear and Greed payload for `score`
    pub fn fng(score: &str, classification: &str) -> String {
        format!(
            r#"{{
                "name": "Fear and Greed Index",
                "data": [{{
                    "value": "{}",
                    "value_classification": "{}",
                    "timestamp": "1700000000",
                    "time_until_update": "3600"
                }}],
                "metadata": {{ "error": null }}
            }}"#,
            score, classification
        )
    }

    pub const FNG_EMPTY: &str = r#"{
        "name": "Fear and Greed Index",
        "data": [],
        "metadata": { "error": null }
    }"#;
}
