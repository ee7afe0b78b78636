use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::common::errors::TradeError;
use crate::strategy::types::TradeOutcome;

/// Core strategy trait
///
/// A strategy decides whether to trade a pair right now and, if so, places
/// the order through whatever collaborators it was built with.
///
/// # Implementation Notes
///
/// - Collaborators (price, sentiment, placement) are injected at construction
/// - A run that decides not to trade returns `TradeOutcome::NoAction`, not an error
/// - Every failure is returned as a distinct [`TradeError`] variant
///
/// # Example
///
/// ```ignore
/// struct AlwaysBuy {
///     trader: FearAndGreedTrader,
/// }
///
/// #[async_trait]
/// impl TradingStrategy for AlwaysBuy {
///     fn name(&self) -> &str { "always_buy" }
///
///     async fn execute_trade(&self, pair_id: &str, fiat_amount: Decimal) -> Result<TradeOutcome, TradeError> {
///         let order = self.trader.place_fiat_order(pair_id, OrderSide::Buy, OrderType::Market, fiat_amount, None).await?;
///         Ok(TradeOutcome::Placed { score: 0, decision: StrategyDecision::no_action(), order })
///     }
/// }
/// ```
#[async_trait]
pub trait TradingStrategy: Send + Sync {
    /// Unique identifier for this strategy
    fn name(&self) -> &str;

    /// Run the strategy once for `pair_id` with a base budget of `fiat_amount`
    async fn execute_trade(
        &self,
        pair_id: &str,
        fiat_amount: Decimal,
    ) -> Result<TradeOutcome, TradeError>;
}

/// Boxed strategy for dynamic dispatch
pub type BoxedStrategy = Box<dyn TradingStrategy>;
