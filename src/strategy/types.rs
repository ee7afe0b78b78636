use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::common::errors::SizingError;
use crate::common::types::{OrderRequest, OrderSide};

/// One row of a threshold schedule
///
/// A buy rule fires when the score is at or below `threshold`, a sell rule
/// when it is at or above. `factor` scales the fiat amount of the trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdRule {
    pub threshold: i32,
    pub factor: Decimal,
    pub action: OrderSide,
}

impl ThresholdRule {
    pub fn new(threshold: i32, factor: Decimal, action: OrderSide) -> Self {
        Self {
            threshold,
            factor,
            action,
        }
    }

    pub fn buy(threshold: i32, factor: Decimal) -> Self {
        Self::new(threshold, factor, OrderSide::Buy)
    }

    pub fn sell(threshold: i32, factor: Decimal) -> Self {
        Self::new(threshold, factor, OrderSide::Sell)
    }

    /// Whether `score` satisfies this rule's comparison
    pub fn matches(&self, score: i32) -> bool {
        match self.action {
            OrderSide::Buy => score <= self.threshold,
            OrderSide::Sell => score >= self.threshold,
        }
    }
}

/// Result of evaluating a score against a schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyDecision {
    /// `None` means no rule matched and nothing should be traded
    pub action: Option<OrderSide>,
    /// Fiat amount scaled by the matched rule, zero when no rule matched
    pub adjusted_fiat_amount: Decimal,
    pub matched_rule: Option<ThresholdRule>,
}

impl StrategyDecision {
    pub fn no_action() -> Self {
        Self {
            action: None,
            adjusted_fiat_amount: Decimal::ZERO,
            matched_rule: None,
        }
    }

    /// Decision for `rule`, failing if the scaled amount overflows
    pub fn matched(rule: &ThresholdRule, fiat_amount: Decimal) -> Result<Self, SizingError> {
        let adjusted_fiat_amount = fiat_amount.checked_mul(rule.factor).ok_or_else(|| {
            SizingError::InvalidInput(format!(
                "fiat_amount {} scaled by factor {} overflows",
                fiat_amount, rule.factor
            ))
        })?;
        Ok(Self {
            action: Some(rule.action),
            adjusted_fiat_amount,
            matched_rule: Some(rule.clone()),
        })
    }

    /// Returns true if an order should be placed
    pub fn is_actionable(&self) -> bool {
        self.action.is_some()
    }
}

/// An order accepted by the placement provider
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedOrder {
    pub order_id: String,
    pub request: OrderRequest,
}

/// What a single strategy run did
#[derive(Debug, Clone, PartialEq)]
pub enum TradeOutcome {
    /// The score matched no rule
    NoAction { score: i32 },
    /// An order was placed for the matched rule
    Placed {
        score: i32,
        decision: StrategyDecision,
        order: PlacedOrder,
    },
}

impl TradeOutcome {
    pub fn order(&self) -> Option<&PlacedOrder> {
        match self {
            TradeOutcome::NoAction { .. } => None,
            TradeOutcome::Placed { order, .. } => Some(order),
        }
    }

    pub fn score(&self) -> i32 {
        match self {
            TradeOutcome::NoAction { score } | TradeOutcome::Placed { score, .. } => *score,
        }
    }
}
