//! Threshold schedules and their shared, atomically replaceable storage

use parking_lot::RwLock;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, warn};

use crate::common::errors::{ScheduleError, SizingError};
use crate::common::types::OrderSide;
use crate::strategy::evaluator;
use crate::strategy::types::{StrategyDecision, ThresholdRule};

/// A validated, ascending-by-threshold list of rules
///
/// Every buy threshold is strictly below every sell threshold, so at most
/// one side can match a given score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ThresholdRule>", into = "Vec<ThresholdRule>")]
pub struct ThresholdSchedule {
    rules: Vec<ThresholdRule>,
}

impl ThresholdSchedule {
    /// Validate and sort `rules` into a schedule
    pub fn new(mut rules: Vec<ThresholdRule>) -> Result<Self, ScheduleError> {
        check_rules(&rules)?;
        rules.sort_by_key(|rule| rule.threshold);
        Ok(Self { rules })
    }

    /// Rules in ascending threshold order
    pub fn rules(&self) -> &[ThresholdRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Highest buy threshold and lowest sell threshold, if present
    pub fn partition(&self) -> (Option<i32>, Option<i32>) {
        partition(&self.rules)
    }

    pub fn preset(preset: SchedulePreset) -> Self {
        let rules = match preset {
            SchedulePreset::Default => vec![
                ThresholdRule::buy(10, dec!(1.5)),
                ThresholdRule::buy(20, dec!(1.3)),
                ThresholdRule::buy(30, dec!(1.1)),
                ThresholdRule::buy(40, dec!(1.0)),
                ThresholdRule::buy(50, dec!(0.9)),
                ThresholdRule::buy(60, dec!(0.7)),
                ThresholdRule::sell(70, dec!(1.0)),
                ThresholdRule::sell(80, dec!(1.5)),
                ThresholdRule::sell(90, dec!(2.0)),
            ],
            SchedulePreset::Simple => vec![
                ThresholdRule::buy(20, dec!(1.2)),
                ThresholdRule::sell(80, dec!(0.8)),
            ],
            SchedulePreset::Pro => vec![
                ThresholdRule::buy(10, dec!(1.5)),
                ThresholdRule::buy(20, dec!(1.3)),
                ThresholdRule::buy(30, dec!(1.1)),
                ThresholdRule::sell(70, dec!(0.9)),
                ThresholdRule::sell(80, dec!(0.7)),
                ThresholdRule::sell(90, dec!(0.5)),
            ],
        };
        // Presets are sorted and non-overlapping
        Self { rules }
    }
}

impl Default for ThresholdSchedule {
    fn default() -> Self {
        Self::preset(SchedulePreset::Default)
    }
}

impl TryFrom<Vec<ThresholdRule>> for ThresholdSchedule {
    type Error = ScheduleError;

    fn try_from(rules: Vec<ThresholdRule>) -> Result<Self, Self::Error> {
        Self::new(rules)
    }
}

impl From<ThresholdSchedule> for Vec<ThresholdRule> {
    fn from(schedule: ThresholdSchedule) -> Self {
        schedule.rules
    }
}

/// Built-in schedules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchedulePreset {
    #[default]
    Default,
    Simple,
    Pro,
}

impl FromStr for SchedulePreset {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "simple" => Ok(Self::Simple),
            "pro" => Ok(Self::Pro),
            other => Err(ScheduleError::InvalidSchedule(format!(
                "unknown preset '{}'",
                other
            ))),
        }
    }
}

fn partition(rules: &[ThresholdRule]) -> (Option<i32>, Option<i32>) {
    let max_buy = rules
        .iter()
        .filter(|rule| rule.action == OrderSide::Buy)
        .map(|rule| rule.threshold)
        .max();
    let min_sell = rules
        .iter()
        .filter(|rule| rule.action == OrderSide::Sell)
        .map(|rule| rule.threshold)
        .min();
    (max_buy, min_sell)
}

fn check_rules(rules: &[ThresholdRule]) -> Result<(), ScheduleError> {
    if rules.is_empty() {
        return Err(ScheduleError::InvalidSchedule("schedule is empty".to_string()));
    }

    if let Some(rule) = rules.iter().find(|rule| rule.factor <= Decimal::ZERO) {
        return Err(ScheduleError::InvalidSchedule(format!(
            "factor must be positive, got {} at threshold {}",
            rule.factor, rule.threshold
        )));
    }

    if let (Some(buy), Some(sell)) = partition(rules) {
        if buy >= sell {
            return Err(ScheduleError::InvalidSchedule(format!(
                "buy threshold {} overlaps sell threshold {}",
                buy, sell
            )));
        }
    }

    Ok(())
}

/// Check `rules` without building a schedule
pub fn validate_schedule(rules: &[ThresholdRule]) -> bool {
    match check_rules(rules) {
        Ok(()) => true,
        Err(err) => {
            warn!(error = %err, "Schedule failed validation");
            false
        }
    }
}

/// Holds the active schedule for concurrent readers
///
/// Readers take a reference-counted snapshot, so an evaluation in flight
/// keeps the schedule it started with. Updates swap the whole schedule and
/// only after it validates.
#[derive(Debug)]
pub struct ScheduleStore {
    current: RwLock<Arc<ThresholdSchedule>>,
}

impl ScheduleStore {
    pub fn new(schedule: ThresholdSchedule) -> Self {
        Self {
            current: RwLock::new(Arc::new(schedule)),
        }
    }

    pub fn validate_schedule(&self, rules: &[ThresholdRule]) -> bool {
        validate_schedule(rules)
    }

    /// Replace the active schedule; on error the previous one stays active
    pub fn update_schedule(&self, rules: Vec<ThresholdRule>) -> Result<(), ScheduleError> {
        let schedule = ThresholdSchedule::new(rules).map_err(|err| {
            warn!(error = %err, "Schedule update rejected");
            err
        })?;
        let count = schedule.len();
        *self.current.write() = Arc::new(schedule);
        info!(rules = count, "Schedule updated");
        Ok(())
    }

    /// Copy of the active schedule
    pub fn get_schedule(&self) -> ThresholdSchedule {
        self.snapshot().as_ref().clone()
    }

    /// Shared handle to the active schedule
    pub fn snapshot(&self) -> Arc<ThresholdSchedule> {
        self.current.read().clone()
    }

    /// Evaluate `score` against the schedule active at call time
    pub fn evaluate(
        &self,
        score: i32,
        fiat_amount: Decimal,
    ) -> Result<StrategyDecision, SizingError> {
        let schedule = self.snapshot();
        evaluator::evaluate(score, fiat_amount, &schedule)
    }
}

impl Default for ScheduleStore {
    fn default() -> Self {
        Self::new(ThresholdSchedule::default())
    }
}
