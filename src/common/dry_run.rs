//! Order placer that records instead of trading

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::info;

use super::errors::Result;
use super::traits::OrderPlacer;
use super::types::{OrderRequest, PlacementResult};

/// Logs every order and reports it as accepted without contacting an exchange
#[derive(Debug, Default)]
pub struct DryRunPlacer {
    placed: Mutex<Vec<OrderRequest>>,
}

impl DryRunPlacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Orders received so far, oldest first
    pub fn placed(&self) -> Vec<OrderRequest> {
        self.placed.lock().clone()
    }
}

#[async_trait]
impl OrderPlacer for DryRunPlacer {
    async fn place_order(&self, request: &OrderRequest) -> Result<PlacementResult> {
        info!(
            pair_id = %request.pair_id,
            side = %request.side,
            order_type = %request.order_type,
            base_size = %request.base_size,
            limit_price = ?request.limit_price,
            "Dry run: order not sent"
        );
        self.placed.lock().push(request.clone());
        Ok(PlacementResult::accepted(format!(
            "dry-run-{}",
            request.client_order_id
        )))
    }
}
