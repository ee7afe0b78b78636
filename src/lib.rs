//! AdvancedTrader Library
//!
//! Fiat-denominated order sizing and sentiment-driven trading against the
//! Coinbase Advanced Trade API.

pub mod coinbase;
pub mod common;
pub mod config;
pub mod sentiment;
pub mod strategy;

// Re-export commonly used types
pub use common::errors::{ClientError, Result, ScheduleError, SizingError, TradeError};
pub use common::traits::{OrderPlacer, PriceSource, SentimentSource};
pub use common::types::{
    ClientOrderId, OrderRequest, OrderSide, OrderType, PlacementResult, PriceSnapshot,
    ProductConstraints, SentimentReading,
};
pub use common::dry_run::DryRunPlacer;
pub use common::price_cache::CachedPriceSource;
pub use config::types::AppConfig;
pub use coinbase::client::CoinbaseClient;
pub use coinbase::rest::CoinbaseRestClient;
pub use sentiment::FearGreedClient;

// Strategy types
pub use strategy::{
    evaluate, size_order, BoxedStrategy, FearAndGreedTrader, PlacedOrder, SchedulePreset,
    ScheduleStore, StrategyDecision, ThresholdRule, ThresholdSchedule, TradeOutcome,
    TradingFees, TradingStrategy,
};
