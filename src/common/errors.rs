//! Error types for the application

use rust_decimal::Decimal;
use thiserror::Error;

/// Result type alias using our ClientError
pub type Result<T> = std::result::Result<T, ClientError>;

/// Error type for exchange and data-source client operations
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request errors
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Authentication errors
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Rate limiting errors
    #[error("Rate limit exceeded: {message}, retry after {retry_after_seconds:?} seconds")]
    RateLimit {
        message: String,
        retry_after_seconds: Option<u64>,
    },

    /// Invalid API response
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Rejections produced while turning a fiat amount into an order
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SizingError {
    /// Malformed arguments, never retried
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Order size {size} is below the minimum {min}")]
    BelowMinimumSize { size: Decimal, min: Decimal },

    #[error("Order size {size} is above the maximum {max}")]
    AboveMaximumSize { size: Decimal, max: Decimal },
}

/// Threshold schedule validation failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),
}

/// Failures surfaced by the trading orchestrator
#[derive(Error, Debug)]
pub enum TradeError {
    #[error(transparent)]
    Sizing(#[from] SizingError),

    #[error(transparent)]
    InvalidSchedule(#[from] ScheduleError),

    /// Price data could not be obtained, the caller may retry
    #[error("Price unavailable: {0}")]
    PriceUnavailable(String),

    /// Sentiment score could not be obtained, the caller may retry
    #[error("Sentiment unavailable: {0}")]
    SentimentUnavailable(String),

    /// Rejection reported by the order placement provider, passed through verbatim
    #[error("Order placement failed: {reason} (preview failure reason: {preview_reason:?})")]
    PlacementFailed {
        reason: String,
        preview_reason: Option<String>,
    },

    #[error(transparent)]
    Client(#[from] ClientError),
}

impl TradeError {
    /// Whether retrying the same call later may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            TradeError::PriceUnavailable(_) | TradeError::SentimentUnavailable(_) => true,
            TradeError::Client(ClientError::RateLimit { .. })
            | TradeError::Client(ClientError::HttpRequest(_)) => true,
            _ => false,
        }
    }
}
