//! Shared data contracts between the trading core and its collaborators

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::SizingError;

/// Order side (buy or sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    #[serde(alias = "BUY")]
    Buy,
    #[serde(alias = "SELL")]
    Sell,
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderSide::Buy => write!(f, "BUY"),
            OrderSide::Sell => write!(f, "SELL"),
        }
    }
}

/// Order type (market or limit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Market,
    Limit,
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderType::Market => write!(f, "market"),
            OrderType::Limit => write!(f, "limit"),
        }
    }
}

/// Per-pair trading rules published by the exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductConstraints {
    /// Pair identifier, e.g. `BTC-USDC`
    pub pair_id: String,
    /// Smallest step for base asset quantities
    pub base_increment: Decimal,
    /// Smallest step for prices in the quote asset
    pub quote_increment: Decimal,
    /// Smallest accepted base size
    pub base_min_size: Decimal,
    /// Largest accepted base size
    pub base_max_size: Decimal,
}

impl ProductConstraints {
    /// Build constraints, rejecting non-positive values or an inverted size range
    pub fn new(
        pair_id: impl Into<String>,
        base_increment: Decimal,
        quote_increment: Decimal,
        base_min_size: Decimal,
        base_max_size: Decimal,
    ) -> Result<Self, SizingError> {
        let constraints = Self {
            pair_id: pair_id.into(),
            base_increment,
            quote_increment,
            base_min_size,
            base_max_size,
        };
        constraints.validate()?;
        Ok(constraints)
    }

    /// Check the invariants: every value > 0 and base_min_size <= base_max_size
    pub fn validate(&self) -> Result<(), SizingError> {
        let fields = [
            ("base_increment", self.base_increment),
            ("quote_increment", self.quote_increment),
            ("base_min_size", self.base_min_size),
            ("base_max_size", self.base_max_size),
        ];
        for (name, value) in fields {
            if value <= Decimal::ZERO {
                return Err(SizingError::InvalidInput(format!(
                    "{} for {} must be positive, got {}",
                    name, self.pair_id, value
                )));
            }
        }

        if self.base_min_size > self.base_max_size {
            return Err(SizingError::InvalidInput(format!(
                "base_min_size {} exceeds base_max_size {} for {}",
                self.base_min_size, self.base_max_size, self.pair_id
            )));
        }

        Ok(())
    }
}

/// Spot price together with the product rules, as supplied by a price source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    pub price: Decimal,
    pub constraints: ProductConstraints,
    /// When the source obtained this snapshot
    pub fetched_at: DateTime<Utc>,
}

impl PriceSnapshot {
    pub fn new(price: Decimal, constraints: ProductConstraints) -> Self {
        Self {
            price,
            constraints,
            fetched_at: Utc::now(),
        }
    }

    pub fn pair_id(&self) -> &str {
        &self.constraints.pair_id
    }
}

/// Opaque unique token identifying an order on the client side
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientOrderId(String);

impl ClientOrderId {
    /// Generate a fresh random id
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ClientOrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated order, ready to hand to an order placer
///
/// `base_size` is a multiple of the product's base increment and lies within
/// its size bounds. Limit orders always carry a price quantized to the quote
/// increment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub pair_id: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub base_size: Decimal,
    pub limit_price: Option<Decimal>,
    pub client_order_id: ClientOrderId,
}

impl OrderRequest {
    pub fn is_limit(&self) -> bool {
        self.order_type == OrderType::Limit
    }

    /// Quote value of the order at its limit price
    pub fn notional(&self) -> Option<Decimal> {
        self.limit_price
            .and_then(|price| price.checked_mul(self.base_size))
    }
}

/// Outcome reported by an order placement provider
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlacementResult {
    pub success: bool,
    pub order_id: Option<String>,
    pub failure_reason: Option<String>,
    pub preview_failure_reason: Option<String>,
}

impl PlacementResult {
    pub fn accepted(order_id: impl Into<String>) -> Self {
        Self {
            success: true,
            order_id: Some(order_id.into()),
            ..Default::default()
        }
    }

    pub fn rejected(reason: impl Into<String>, preview_reason: Option<String>) -> Self {
        Self {
            success: false,
            order_id: None,
            failure_reason: Some(reason.into()),
            preview_failure_reason: preview_reason,
        }
    }
}

/// A single reading from a sentiment index (0 = extreme fear, 100 = extreme greed)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentReading {
    pub score: i32,
    pub classification: String,
    pub timestamp: DateTime<Utc>,
}
