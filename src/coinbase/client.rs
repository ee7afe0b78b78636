//! Coinbase client that serves prices and places orders for the trader

use async_trait::async_trait;
use std::time::Duration;
use tracing::{info, instrument, warn};

use super::messages::CreateOrderResponse;
use super::rest::{build_order_request, CoinbaseRestClient};
use crate::common::errors::Result;
use crate::common::traits::{OrderPlacer, PriceSource};
use crate::common::types::{OrderRequest, PlacementResult, PriceSnapshot};
use crate::config::types::{ApiCredentials, CoinbaseConfig};

/// Coinbase Advanced Trade client
#[derive(Debug, Clone)]
pub struct CoinbaseClient {
    rest_client: CoinbaseRestClient,
}

impl CoinbaseClient {
    /// Create a new Coinbase client from configuration
    pub fn new(config: &CoinbaseConfig, timeout: Duration) -> Result<Self> {
        let rest_client = CoinbaseRestClient::with_timeout(&config.rest_url, timeout)?;

        let rest_client = match (&config.api_key, &config.api_secret) {
            (Some(key), Some(secret)) if !key.is_empty() && !secret.is_empty() => {
                rest_client.with_credentials(ApiCredentials::new(key.clone(), secret.clone()))
            }
            _ => {
                warn!("Coinbase credentials not configured; order placement is unavailable");
                rest_client
            }
        };

        Ok(Self { rest_client })
    }

    /// Wrap an already configured REST client
    pub fn from_rest(rest_client: CoinbaseRestClient) -> Self {
        Self { rest_client }
    }

    /// Get a reference to the REST client
    pub fn rest(&self) -> &CoinbaseRestClient {
        &self.rest_client
    }
}

#[async_trait]
impl PriceSource for CoinbaseClient {
    async fn snapshot(&self, pair_id: &str) -> Result<PriceSnapshot> {
        self.rest_client.get_price_snapshot(pair_id).await
    }
}

#[async_trait]
impl OrderPlacer for CoinbaseClient {
    #[instrument(skip(self, request), fields(pair = %request.pair_id, side = %request.side))]
    async fn place_order(&self, request: &OrderRequest) -> Result<PlacementResult> {
        let wire = build_order_request(request)?;
        let response = self.rest_client.create_order(&wire).await?;
        let result = convert_order_response(response);

        if result.success {
            info!(order_id = ?result.order_id, "Order accepted");
        } else {
            warn!(
                reason = ?result.failure_reason,
                preview_reason = ?result.preview_failure_reason,
                "Order rejected"
            );
        }
        Ok(result)
    }
}

/// Flatten the exchange response into a placement result
pub fn convert_order_response(response: CreateOrderResponse) -> PlacementResult {
    if response.success {
        let order_id = response
            .success_response
            .map(|success| success.order_id)
            .or(response.order_id)
            .filter(|id| !id.is_empty());
        return PlacementResult {
            success: true,
            order_id,
            ..PlacementResult::default()
        };
    }

    let (reason, preview_reason) = match response.error_response {
        Some(error) => (
            error.message.or(error.error).or(response.failure_reason),
            error.preview_failure_reason,
        ),
        None => (response.failure_reason, None),
    };

    PlacementResult {
        success: false,
        order_id: None,
        failure_reason: reason,
        preview_failure_reason: preview_reason,
    }
}
