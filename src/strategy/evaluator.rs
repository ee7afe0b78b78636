//! Threshold schedule evaluation

use rust_decimal::Decimal;
use tracing::debug;

use crate::common::errors::SizingError;
use crate::strategy::schedule::ThresholdSchedule;
use crate::strategy::types::StrategyDecision;

/// Pick the first rule, in ascending threshold order, that `score` satisfies
///
/// Buy rules match at or below their threshold and sell rules at or above.
/// No match yields a decision with no action; a scaled amount that overflows
/// is rejected as invalid input. Pure and side-effect free apart
/// from a debug log line.
pub fn evaluate(
    score: i32,
    fiat_amount: Decimal,
    schedule: &ThresholdSchedule,
) -> Result<StrategyDecision, SizingError> {
    match schedule.rules().iter().find(|rule| rule.matches(score)) {
        Some(rule) => {
            let decision = StrategyDecision::matched(rule, fiat_amount)?;
            debug!(
                score,
                threshold = rule.threshold,
                factor = %rule.factor,
                action = %rule.action,
                adjusted = %decision.adjusted_fiat_amount,
                "Schedule rule matched"
            );
            Ok(decision)
        }
        None => {
            debug!(score, "No schedule rule matched");
            Ok(StrategyDecision::no_action())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::types::OrderSide;
    use crate::strategy::schedule::SchedulePreset;
    use crate::strategy::types::ThresholdRule;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn three_band_schedule() -> ThresholdSchedule {
        ThresholdSchedule::new(vec![
            ThresholdRule::buy(10, dec!(1.5)),
            ThresholdRule::buy(30, dec!(1.2)),
            ThresholdRule::sell(70, dec!(0.8)),
        ])
        .unwrap()
    }

    #[test]
    fn test_first_ascending_buy_match_wins() {
        let decision = evaluate(25, dec!(10), &three_band_schedule()).unwrap();

        assert_eq!(decision.action, Some(OrderSide::Buy));
        assert_eq!(decision.adjusted_fiat_amount, dec!(12.00));
        assert_eq!(decision.matched_rule, Some(ThresholdRule::buy(30, dec!(1.2))));
    }

    #[test]
    fn test_lowest_buy_band() {
        let decision = evaluate(5, dec!(10), &three_band_schedule()).unwrap();
        assert_eq!(decision.matched_rule, Some(ThresholdRule::buy(10, dec!(1.5))));
        assert_eq!(decision.adjusted_fiat_amount, dec!(15.0));
    }

    #[test]
    fn test_gap_between_bands_is_no_action() {
        let decision = evaluate(50, dec!(10), &three_band_schedule()).unwrap();

        assert_eq!(decision, StrategyDecision::no_action());
        assert!(!decision.is_actionable());
    }

    #[test]
    fn test_threshold_boundaries_are_inclusive() {
        let schedule = three_band_schedule();

        let at_buy = evaluate(30, dec!(10), &schedule).unwrap();
        assert_eq!(at_buy.action, Some(OrderSide::Buy));

        let at_sell = evaluate(70, dec!(10), &schedule).unwrap();
        assert_eq!(at_sell.action, Some(OrderSide::Sell));
        assert_eq!(at_sell.adjusted_fiat_amount, dec!(8.0));

        assert!(!evaluate(31, dec!(10), &schedule).unwrap().is_actionable());
        assert!(!evaluate(69, dec!(10), &schedule).unwrap().is_actionable());
    }

    #[test]
    fn test_sell_scan_takes_lowest_sell_threshold() {
        // 95 satisfies every sell rule; ascending scan hits 70 first
        let schedule = ThresholdSchedule::preset(SchedulePreset::Default);
        let decision = evaluate(95, dec!(100), &schedule).unwrap();

        assert_eq!(decision.matched_rule, Some(ThresholdRule::sell(70, dec!(1.0))));
        assert_eq!(decision.adjusted_fiat_amount, dec!(100.0));
    }

    #[test]
    fn test_default_schedule_fear_band() {
        let schedule = ThresholdSchedule::default();
        let decision = evaluate(15, dec!(100), &schedule).unwrap();

        assert_eq!(decision.action, Some(OrderSide::Buy));
        assert_eq!(decision.adjusted_fiat_amount, dec!(130.0));
    }

    #[test]
    fn test_simple_schedule_neutral_band_does_nothing() {
        let schedule = ThresholdSchedule::preset(SchedulePreset::Simple);
        assert!(!evaluate(50, dec!(100), &schedule).unwrap().is_actionable());
    }

    #[test]
    fn test_scaled_amount_overflow_is_invalid_input() {
        let schedule = ThresholdSchedule::new(vec![ThresholdRule::buy(50, dec!(1000))]).unwrap();

        assert!(matches!(
            evaluate(10, Decimal::MAX, &schedule),
            Err(SizingError::InvalidInput(_))
        ));
        // No matching rule means nothing is scaled
        assert_eq!(
            evaluate(60, Decimal::MAX, &schedule).unwrap(),
            StrategyDecision::no_action()
        );
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let schedule = ThresholdSchedule::default();
        for score in 0..=100 {
            let first = evaluate(score, dec!(42.5), &schedule).unwrap();
            let second = evaluate(score, dec!(42.5), &schedule).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_only_one_side_can_match() {
        let schedule = ThresholdSchedule::default();
        for score in 0..=100 {
            let buy = schedule
                .rules()
                .iter()
                .any(|rule| rule.action == OrderSide::Buy && rule.matches(score));
            let sell = schedule
                .rules()
                .iter()
                .any(|rule| rule.action == OrderSide::Sell && rule.matches(score));
            assert!(!(buy && sell), "score {} matched both sides", score);
        }
    }
}
