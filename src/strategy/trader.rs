//! Fear & greed driven trader
//!
//! Ties the pure core together with its collaborators: reads the sentiment
//! score, evaluates it against the active schedule, sizes the order from a
//! fresh price snapshot and hands it to the order placer.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::common::errors::{ClientError, SizingError, TradeError};
use crate::common::traits::{OrderPlacer, PriceSource, SentimentSource};
use crate::common::types::{OrderSide, OrderType};
use crate::strategy::fees::TradingFees;
use crate::strategy::schedule::ScheduleStore;
use crate::strategy::size_calculator::size_order;
use crate::strategy::traits::TradingStrategy;
use crate::strategy::types::{PlacedOrder, TradeOutcome};

/// Places fiat-denominated orders sized by the fear & greed schedule
pub struct FearAndGreedTrader {
    prices: Arc<dyn PriceSource>,
    placer: Arc<dyn OrderPlacer>,
    sentiment: Arc<dyn SentimentSource>,
    schedule: Arc<ScheduleStore>,
    fees: TradingFees,
    order_type: OrderType,
}

impl FearAndGreedTrader {
    /// Create a trader with the default schedule, default fees and limit orders
    pub fn new(
        prices: Arc<dyn PriceSource>,
        placer: Arc<dyn OrderPlacer>,
        sentiment: Arc<dyn SentimentSource>,
    ) -> Self {
        Self {
            prices,
            placer,
            sentiment,
            schedule: Arc::new(ScheduleStore::default()),
            fees: TradingFees::default(),
            order_type: OrderType::Limit,
        }
    }

    /// Share an existing schedule store
    pub fn with_schedule(mut self, schedule: Arc<ScheduleStore>) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_fees(mut self, fees: TradingFees) -> Self {
        self.fees = fees;
        self
    }

    /// Order type used by strategy runs
    pub fn with_order_type(mut self, order_type: OrderType) -> Self {
        self.order_type = order_type;
        self
    }

    /// The schedule store consulted on every run
    pub fn schedule(&self) -> &Arc<ScheduleStore> {
        &self.schedule
    }

    pub fn fees(&self) -> &TradingFees {
        &self.fees
    }

    /// Size and place a single order worth `fiat_amount` of quote currency
    ///
    /// `limit_price` overrides the multiplier-derived price for limit orders
    /// and is ignored for market orders.
    #[instrument(skip(self), fields(fee_rate = %self.fees.maker_fee_rate))]
    pub async fn place_fiat_order(
        &self,
        pair_id: &str,
        side: OrderSide,
        order_type: OrderType,
        fiat_amount: Decimal,
        limit_price: Option<Decimal>,
    ) -> Result<PlacedOrder, TradeError> {
        let snapshot = self.prices.snapshot(pair_id).await.map_err(|err| {
            warn!(pair_id, error = %err, "Price snapshot unavailable");
            TradeError::PriceUnavailable(format!("{}: {}", pair_id, err))
        })?;

        if snapshot.price <= Decimal::ZERO {
            return Err(TradeError::PriceUnavailable(format!(
                "{}: non-positive spot price {}",
                pair_id, snapshot.price
            )));
        }

        let reference_price = self
            .fees
            .reference_price(side, order_type, snapshot.price, limit_price);
        info!(
            pair_id,
            spot = %snapshot.price,
            %reference_price,
            "Sizing order"
        );

        let request = size_order(
            fiat_amount,
            side,
            order_type,
            reference_price,
            self.fees.maker_fee_rate,
            &snapshot.constraints,
        )?;

        let result = self.placer.place_order(&request).await?;
        if !result.success {
            let reason = result
                .failure_reason
                .unwrap_or_else(|| "Unknown".to_string());
            error!(
                pair_id,
                %side,
                %order_type,
                reason = %reason,
                preview_reason = ?result.preview_failure_reason,
                "Failed to place order"
            );
            return Err(TradeError::PlacementFailed {
                reason,
                preview_reason: result.preview_failure_reason,
            });
        }

        let order_id = result.order_id.ok_or_else(|| {
            ClientError::InvalidResponse("accepted order carries no order id".to_string())
        })?;

        match request.notional() {
            Some(notional) => info!(
                %order_id,
                pair_id,
                %side,
                base_size = %request.base_size,
                limit_price = ?request.limit_price,
                %notional,
                maker_fee = %self.fees.maker_fee(notional),
                "Placed limit order"
            ),
            None => info!(
                %order_id,
                pair_id,
                %side,
                base_size = %request.base_size,
                "Placed market order"
            ),
        }

        Ok(PlacedOrder { order_id, request })
    }
}

#[async_trait]
impl TradingStrategy for FearAndGreedTrader {
    fn name(&self) -> &str {
        "fear_and_greed"
    }

    #[instrument(skip(self))]
    async fn execute_trade(
        &self,
        pair_id: &str,
        fiat_amount: Decimal,
    ) -> Result<TradeOutcome, TradeError> {
        if fiat_amount <= Decimal::ZERO {
            return Err(SizingError::InvalidInput(format!(
                "fiat_amount must be positive, got {}",
                fiat_amount
            ))
            .into());
        }

        let reading = self.sentiment.current().await.map_err(|err| {
            TradeError::SentimentUnavailable(format!("{}: {}", self.sentiment.source_name(), err))
        })?;
        info!(
            source = self.sentiment.source_name(),
            score = reading.score,
            classification = %reading.classification,
            pair_id,
            "Sentiment retrieved"
        );

        let decision = self.schedule.evaluate(reading.score, fiat_amount)?;
        let Some(side) = decision.action else {
            warn!(score = reading.score, "No trading condition met");
            return Ok(TradeOutcome::NoAction {
                score: reading.score,
            });
        };

        let order = self
            .place_fiat_order(
                pair_id,
                side,
                self.order_type,
                decision.adjusted_fiat_amount,
                None,
            )
            .await?;

        Ok(TradeOutcome::Placed {
            score: reading.score,
            decision,
            order,
        })
    }
}
