//! Strategy module for order sizing and trade decision making
//!
//! This module provides the pure decision core and the trader that drives it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    PURE CORE (sync, no I/O)                 │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ThresholdSchedule / ScheduleStore                          │
//! │    - Validated, ascending rules; atomic replacement         │
//! │  evaluate(score, fiat_amount, schedule)                     │
//! │    - First matching rule wins → StrategyDecision            │
//! │  size_order(fiat, side, type, price, fee, constraints)      │
//! │    - Fee direction, round-half-up quantization, bounds      │
//! └─────────────────────────────────────────────────────────────┘
//!
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    ORCHESTRATION (async)                    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  FearAndGreedTrader                                         │
//! │    SentimentSource → score                                  │
//! │       │                                                     │
//! │       ▼                                                     │
//! │    evaluate → Buy / Sell / None                             │
//! │       │                                                     │
//! │       ▼ (if Buy/Sell)                                       │
//! │    PriceSource → snapshot → size_order → OrderPlacer        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Components
//!
//! - [`size_order`]: Turns a fiat amount into a valid [`OrderRequest`](crate::common::types::OrderRequest)
//! - [`ThresholdSchedule`]: Sorted, validated threshold rules
//! - [`ScheduleStore`]: Shared schedule with all-or-nothing updates
//! - [`evaluate`]: Selects the winning rule for a score
//! - [`TradingFees`]: Maker fee and limit price multipliers
//! - [`FearAndGreedTrader`]: Runs the whole flow against injected collaborators
//!
//! # Example
//!
//! ```ignore
//! use advanced_trader::strategy::{evaluate, ThresholdRule, ThresholdSchedule};
//!
//! let schedule = ThresholdSchedule::new(vec![
//!     ThresholdRule::buy(10, dec!(1.5)),
//!     ThresholdRule::buy(30, dec!(1.2)),
//!     ThresholdRule::sell(70, dec!(0.8)),
//! ])?;
//!
//! let decision = evaluate(25, dec!(10), &schedule)?;
//! assert_eq!(decision.adjusted_fiat_amount, dec!(12.0));
//! ```

mod types;
mod traits;
mod size_calculator;
mod fees;
mod schedule;
mod evaluator;
mod trader;

pub use types::{
    PlacedOrder,
    StrategyDecision,
    ThresholdRule,
    TradeOutcome,
};

pub use traits::{BoxedStrategy, TradingStrategy};

pub use size_calculator::{effective_amount, round_to_increment, size_order};

pub use fees::TradingFees;

pub use schedule::{validate_schedule, SchedulePreset, ScheduleStore, ThresholdSchedule};

pub use evaluator::evaluate;

pub use trader::FearAndGreedTrader;
