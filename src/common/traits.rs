//! Ports to the collaborators the trading core depends on

use async_trait::async_trait;

use super::errors::Result;
use super::types::{OrderRequest, PlacementResult, PriceSnapshot, SentimentReading};

/// Supplies the current spot price and product rules for a pair
///
/// Each call may return a different price. Any caching, and its freshness
/// policy, belongs to the implementation.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch a snapshot for `pair_id`
    async fn snapshot(&self, pair_id: &str) -> Result<PriceSnapshot>;
}

/// Places a sized order with the exchange
#[async_trait]
pub trait OrderPlacer: Send + Sync {
    /// Submit the order
    ///
    /// An exchange-side rejection is reported through
    /// `PlacementResult::success == false`; `Err` is reserved for transport
    /// and protocol failures.
    async fn place_order(&self, request: &OrderRequest) -> Result<PlacementResult>;
}

/// Supplies the current sentiment index score
#[async_trait]
pub trait SentimentSource: Send + Sync {
    async fn current(&self) -> Result<SentimentReading>;

    /// Human readable name of the index
    fn source_name(&self) -> &'static str;
}
