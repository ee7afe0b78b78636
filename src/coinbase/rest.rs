//! REST API client for Coinbase Advanced Trade

use reqwest::{Client, Response, StatusCode};
use rust_decimal::Decimal;
use std::time::Duration;
use tracing::{debug, instrument};

use super::auth::{generate_auth_headers, AuthHeaders};
use super::messages::*;
use crate::common::errors::{ClientError, Result};
use crate::common::types::{OrderRequest, OrderType, PriceSnapshot, ProductConstraints};
use crate::config::types::ApiCredentials;

const PRODUCTS_PATH: &str = "/api/v3/brokerage/products";
const ORDERS_PATH: &str = "/api/v3/brokerage/orders";

/// REST API client for Coinbase Advanced Trade
#[derive(Debug, Clone)]
pub struct CoinbaseRestClient {
    /// HTTP client
    client: Client,
    /// Base URL, e.g. `https://api.coinbase.com`
    base_url: String,
    /// Optional API credentials for authenticated endpoints
    credentials: Option<ApiCredentials>,
}

impl CoinbaseRestClient {
    /// Create a new REST client (unauthenticated)
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    /// Create a new REST client with custom timeout
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Internal(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials: None,
        })
    }

    /// Set API credentials for authenticated requests
    pub fn with_credentials(mut self, credentials: ApiCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Generate authentication headers if credentials are set
    fn auth_headers(&self, method: &str, path: &str, body: &str) -> Result<Option<AuthHeaders>> {
        match &self.credentials {
            Some(creds) => {
                let headers =
                    generate_auth_headers(&creds.api_key, &creds.api_secret, method, path, body)?;
                Ok(Some(headers))
            }
            None => Ok(None),
        }
    }

    /// Map non-success statuses onto client errors
    async fn error_for_status(response: Response, context: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                let body = response.text().await.unwrap_or_default();
                Err(ClientError::Authentication(format!(
                    "{} rejected with status {}: {}",
                    context, status, body
                )))
            }
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after_seconds = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|value| value.to_str().ok())
                    .and_then(|value| value.parse().ok());
                Err(ClientError::RateLimit {
                    message: format!("{} throttled", context),
                    retry_after_seconds,
                })
            }
            _ => {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiErrorResponse>(&body)
                    .ok()
                    .and_then(|err| err.message.or(err.error))
                    .unwrap_or(body);
                Err(ClientError::InvalidResponse(format!(
                    "Server returned status {}: {}",
                    status, message
                )))
            }
        }
    }

    // ========================================================================
    // Products
    // ========================================================================

    /// Get product details, including the current price
    #[instrument(skip(self))]
    pub async fn get_product(&self, product_id: &str) -> Result<ProductResponse> {
        let path = format!("{}/{}", PRODUCTS_PATH, product_id);
        let url = format!("{}{}", self.base_url, path);
        debug!("Fetching product from: {}", url);

        let mut request = self.client.get(&url);
        if let Some(headers) = self.auth_headers("GET", &path, "")? {
            request = headers.apply_to_request(request);
        }

        let response = request.send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::ProductNotFound(product_id.to_string()));
        }
        let response = Self::error_for_status(response, product_id).await?;

        let product: ProductResponse = response.json().await?;
        Ok(product)
    }

    /// Get a price snapshot (price and trading rules) for a product
    #[instrument(skip(self))]
    pub async fn get_price_snapshot(&self, product_id: &str) -> Result<PriceSnapshot> {
        let product = self.get_product(product_id).await?;
        convert_product_response(product)
    }

    // ========================================================================
    // Orders (Authentication Required)
    // ========================================================================

    /// Submit an order
    #[instrument(skip(self, order), fields(client_order_id = %order.client_order_id))]
    pub async fn create_order(&self, order: &CreateOrderRequest) -> Result<CreateOrderResponse> {
        let url = format!("{}{}", self.base_url, ORDERS_PATH);
        let body = serde_json::to_string(order)?;

        let headers = self.auth_headers("POST", ORDERS_PATH, &body)?.ok_or_else(|| {
            ClientError::Authentication("API credentials are required to place orders".to_string())
        })?;

        debug!("Placing order: {}", body);
        let request = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body);
        let response = headers.apply_to_request(request).send().await?;
        let response = Self::error_for_status(response, &order.product_id).await?;

        let created: CreateOrderResponse = response.json().await?;
        debug!(success = created.success, "Order response received");
        Ok(created)
    }
}

/// Build the wire request for a sized order
pub fn build_order_request(order: &OrderRequest) -> Result<CreateOrderRequest> {
    let base_size = order.base_size.to_string();
    let order_configuration = match (order.order_type, order.limit_price) {
        (OrderType::Market, _) => OrderConfiguration::MarketMarketIoc { base_size },
        (OrderType::Limit, Some(limit_price)) => OrderConfiguration::LimitLimitGtc {
            base_size,
            limit_price: limit_price.to_string(),
            post_only: false,
        },
        (OrderType::Limit, None) => {
            return Err(ClientError::Internal(format!(
                "limit order {} has no limit price",
                order.client_order_id
            )))
        }
    };

    Ok(CreateOrderRequest {
        client_order_id: order.client_order_id.to_string(),
        product_id: order.pair_id.clone(),
        side: order.side.to_string(),
        order_configuration,
    })
}

/// Convert a product response into a price snapshot
pub fn convert_product_response(product: ProductResponse) -> Result<PriceSnapshot> {
    let price = match product.price.as_deref() {
        Some(price) if !price.is_empty() => parse_decimal("price", price)?,
        _ => {
            return Err(ClientError::InvalidResponse(format!(
                "'price' field missing in response for {}",
                product.product_id
            )))
        }
    };

    let constraints = ProductConstraints::new(
        product.product_id.clone(),
        parse_decimal("base_increment", &product.base_increment)?,
        parse_decimal("quote_increment", &product.quote_increment)?,
        parse_decimal("base_min_size", &product.base_min_size)?,
        parse_decimal("base_max_size", &product.base_max_size)?,
    )
    .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;

    Ok(PriceSnapshot::new(price, constraints))
}

fn parse_decimal(field: &str, value: &str) -> Result<Decimal> {
    value
        .parse()
        .map_err(|e| ClientError::InvalidResponse(format!("Invalid {} '{}': {}", field, value, e)))
}
