//! Configuration types

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::common::errors::SizingError;
use crate::common::types::OrderType;
use crate::strategy::{ThresholdSchedule, TradingFees};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Coinbase-specific configuration
    #[serde(default)]
    pub coinbase: CoinbaseConfig,
    /// Sentiment index configuration
    #[serde(default)]
    pub sentiment: SentimentConfig,
    /// Sizing and schedule configuration
    #[serde(default)]
    pub trading: TradingConfig,
    /// General application settings
    #[serde(default)]
    pub settings: AppSettings,
}

/// Coinbase Advanced Trade configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinbaseConfig {
    /// API key for authenticated requests
    #[serde(default)]
    pub api_key: Option<String>,
    /// API secret for signing requests
    #[serde(default)]
    pub api_secret: Option<String>,
    /// Base URL for the REST API
    #[serde(default = "default_coinbase_rest_url")]
    pub rest_url: String,
}

impl Default for CoinbaseConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_secret: None,
            rest_url: default_coinbase_rest_url(),
        }
    }
}

fn default_coinbase_rest_url() -> String {
    "https://api.coinbase.com".to_string()
}

/// Fear and Greed index configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentConfig {
    /// Base URL of the index API
    #[serde(default = "default_sentiment_url")]
    pub url: String,
    /// How long a reading is reused before refetching
    #[serde(default = "default_sentiment_cache_seconds")]
    pub cache_seconds: u64,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            url: default_sentiment_url(),
            cache_seconds: default_sentiment_cache_seconds(),
        }
    }
}

impl SentimentConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_seconds)
    }
}

fn default_sentiment_url() -> String {
    "https://api.alternative.me".to_string()
}

fn default_sentiment_cache_seconds() -> u64 {
    3600
}

/// Trading configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradingConfig {
    #[serde(default = "default_maker_fee_rate")]
    pub maker_fee_rate: Decimal,
    #[serde(default = "default_buy_price_multiplier")]
    pub buy_price_multiplier: Decimal,
    #[serde(default = "default_sell_price_multiplier")]
    pub sell_price_multiplier: Decimal,
    /// Order type used by the sentiment trader
    #[serde(default = "default_order_type")]
    pub order_type: OrderType,
    /// Price snapshot reuse window (0 = always fetch)
    #[serde(default)]
    pub price_cache_seconds: u64,
    /// Custom schedule; the default preset applies when absent
    #[serde(default)]
    pub schedule: Option<ThresholdSchedule>,
}

impl Default for TradingConfig {
    fn default() -> Self {
        Self {
            maker_fee_rate: default_maker_fee_rate(),
            buy_price_multiplier: default_buy_price_multiplier(),
            sell_price_multiplier: default_sell_price_multiplier(),
            order_type: default_order_type(),
            price_cache_seconds: 0,
            schedule: None,
        }
    }
}

impl TradingConfig {
    /// Validated fee parameters
    pub fn fees(&self) -> Result<TradingFees, SizingError> {
        TradingFees::new(
            self.maker_fee_rate,
            self.buy_price_multiplier,
            self.sell_price_multiplier,
        )
    }

    pub fn schedule_or_default(&self) -> ThresholdSchedule {
        self.schedule.clone().unwrap_or_default()
    }

    pub fn price_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.price_cache_seconds)
    }
}

fn default_maker_fee_rate() -> Decimal {
    dec!(0.006)
}

fn default_buy_price_multiplier() -> Decimal {
    dec!(0.9995)
}

fn default_sell_price_multiplier() -> Decimal {
    dec!(1.005)
}

fn default_order_type() -> OrderType {
    OrderType::Limit
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl AppSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

/// API credentials for authenticated requests
#[derive(Clone)]
pub struct ApiCredentials {
    pub api_key: String,
    pub api_secret: String,
}

impl ApiCredentials {
    pub fn new(api_key: String, api_secret: String) -> Self {
        Self {
            api_key,
            api_secret,
        }
    }
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}
