use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::common::errors::SizingError;
use crate::common::types::{OrderSide, OrderType};

/// Fee and limit-pricing parameters applied when sizing fiat orders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingFees {
    /// Maker fee as a fraction of notional (0.006 = 0.6%)
    pub maker_fee_rate: Decimal,
    /// Spot multiplier for limit buys, slightly below spot
    pub buy_price_multiplier: Decimal,
    /// Spot multiplier for limit sells, slightly above spot
    pub sell_price_multiplier: Decimal,
}

impl Default for TradingFees {
    fn default() -> Self {
        Self {
            maker_fee_rate: dec!(0.006),
            buy_price_multiplier: dec!(0.9995),
            sell_price_multiplier: dec!(1.005),
        }
    }
}

impl TradingFees {
    pub fn new(
        maker_fee_rate: Decimal,
        buy_price_multiplier: Decimal,
        sell_price_multiplier: Decimal,
    ) -> Result<Self, SizingError> {
        let fees = Self {
            maker_fee_rate,
            buy_price_multiplier,
            sell_price_multiplier,
        };
        fees.validate()?;
        Ok(fees)
    }

    /// Fee rate must lie in [0, 1) and both multipliers must be positive
    pub fn validate(&self) -> Result<(), SizingError> {
        if self.maker_fee_rate < Decimal::ZERO || self.maker_fee_rate >= Decimal::ONE {
            return Err(SizingError::InvalidInput(format!(
                "maker_fee_rate must be in [0, 1), got {}",
                self.maker_fee_rate
            )));
        }
        if self.buy_price_multiplier <= Decimal::ZERO || self.sell_price_multiplier <= Decimal::ZERO {
            return Err(SizingError::InvalidInput(format!(
                "price multipliers must be positive, got buy {} sell {}",
                self.buy_price_multiplier, self.sell_price_multiplier
            )));
        }
        Ok(())
    }

    pub fn price_multiplier(&self, side: OrderSide) -> Decimal {
        match side {
            OrderSide::Buy => self.buy_price_multiplier,
            OrderSide::Sell => self.sell_price_multiplier,
        }
    }

    /// Price an order of `order_type` should be sized against
    ///
    /// Market orders use the spot price. Limit orders use the explicit
    /// `limit_price` when given, otherwise spot scaled by the side's
    /// multiplier. The result is not yet quantized.
    pub fn reference_price(
        &self,
        side: OrderSide,
        order_type: OrderType,
        spot: Decimal,
        limit_price: Option<Decimal>,
    ) -> Decimal {
        match (order_type, limit_price) {
            (OrderType::Market, _) => spot,
            (OrderType::Limit, Some(price)) => price,
            (OrderType::Limit, None) => spot * self.price_multiplier(side),
        }
    }

    /// Fee charged on a fill of `notional` quote currency
    pub fn maker_fee(&self, notional: Decimal) -> Decimal {
        notional * self.maker_fee_rate
    }
}
