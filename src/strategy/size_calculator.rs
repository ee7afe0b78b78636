//! Conversion of a fiat notional into an exchange-valid order
//!
//! Every quantity is quantized with a single policy: round half up to the
//! nearest increment. The only asymmetry between sides is the direction the
//! fee is applied in.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::common::errors::SizingError;
use crate::common::types::{ClientOrderId, OrderRequest, OrderSide, OrderType, ProductConstraints};

/// Round `value` to the nearest multiple of `increment`, ties away from zero
///
/// The result carries the scale of `increment`, so `0.001992` quantized to
/// `0.00000001` renders as `0.00199200`.
pub fn round_to_increment(value: Decimal, increment: Decimal) -> Result<Decimal, SizingError> {
    if increment <= Decimal::ZERO {
        return Err(SizingError::InvalidInput(format!(
            "increment must be positive, got {}",
            increment
        )));
    }

    quantize(value, increment).ok_or_else(|| {
        SizingError::InvalidInput(format!(
            "{} overflows when quantized to increment {}",
            value, increment
        ))
    })
}

fn quantize(value: Decimal, increment: Decimal) -> Option<Decimal> {
    value
        .checked_div(increment)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .checked_mul(increment)
}

/// Fiat amount that actually converts into base asset once the fee is applied
///
/// Buying spends part of the fiat on the fee. Selling grosses the amount up
/// so the net proceeds equal `fiat_amount`. A fee rate so close to one that
/// the grossed-up amount overflows is rejected as invalid input.
pub fn effective_amount(
    fiat_amount: Decimal,
    side: OrderSide,
    fee_rate: Decimal,
) -> Result<Decimal, SizingError> {
    let net = Decimal::ONE - fee_rate;
    let effective = match side {
        OrderSide::Buy => fiat_amount.checked_mul(net),
        OrderSide::Sell => fiat_amount.checked_div(net),
    };
    effective.ok_or_else(|| {
        SizingError::InvalidInput(format!(
            "fiat_amount {} with fee_rate {} overflows",
            fiat_amount, fee_rate
        ))
    })
}

/// Size an order for `fiat_amount` of quote currency
///
/// For limit orders `reference_price` is the intended limit price; it is
/// quantized to the quote increment before the base size is derived from it.
/// Market orders use `reference_price` as given. Sizes outside the product's
/// bounds are rejected, never clamped.
pub fn size_order(
    fiat_amount: Decimal,
    side: OrderSide,
    order_type: OrderType,
    reference_price: Decimal,
    fee_rate: Decimal,
    constraints: &ProductConstraints,
) -> Result<OrderRequest, SizingError> {
    if fiat_amount <= Decimal::ZERO {
        return Err(SizingError::InvalidInput(format!(
            "fiat_amount must be positive, got {}",
            fiat_amount
        )));
    }
    if reference_price <= Decimal::ZERO {
        return Err(SizingError::InvalidInput(format!(
            "reference_price must be positive, got {}",
            reference_price
        )));
    }
    if fee_rate < Decimal::ZERO || fee_rate >= Decimal::ONE {
        return Err(SizingError::InvalidInput(format!(
            "fee_rate must be in [0, 1), got {}",
            fee_rate
        )));
    }
    constraints.validate()?;

    let (price, limit_price) = match order_type {
        OrderType::Limit => {
            let quantized = round_to_increment(reference_price, constraints.quote_increment)?;
            if quantized.is_zero() {
                return Err(SizingError::InvalidInput(format!(
                    "limit price {} rounds to zero at quote increment {}",
                    reference_price, constraints.quote_increment
                )));
            }
            (quantized, Some(quantized))
        }
        OrderType::Market => (reference_price, None),
    };

    let effective = effective_amount(fiat_amount, side, fee_rate)?;
    let raw_size = effective
        .checked_div(price)
        .ok_or(SizingError::AboveMaximumSize {
            size: Decimal::MAX,
            max: constraints.base_max_size,
        })?;
    let base_size = quantize(raw_size, constraints.base_increment).ok_or(
        SizingError::AboveMaximumSize {
            size: raw_size,
            max: constraints.base_max_size,
        },
    )?;

    debug!(
        pair_id = %constraints.pair_id,
        %side,
        %effective,
        %raw_size,
        %base_size,
        "Sized fiat order"
    );

    if base_size < constraints.base_min_size {
        return Err(SizingError::BelowMinimumSize {
            size: base_size,
            min: constraints.base_min_size,
        });
    }
    if base_size > constraints.base_max_size {
        return Err(SizingError::AboveMaximumSize {
            size: base_size,
            max: constraints.base_max_size,
        });
    }

    Ok(OrderRequest {
        pair_id: constraints.pair_id.clone(),
        side,
        order_type,
        base_size,
        limit_price,
        client_order_id: ClientOrderId::generate(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn btc_usdc() -> ProductConstraints {
        ProductConstraints::new(
            "BTC-USDC",
            dec!(0.00000001),
            dec!(0.01),
            dec!(0.00000001),
            dec!(3400),
        )
        .unwrap()
    }

    fn coarse_product() -> ProductConstraints {
        ProductConstraints::new("DOGE-USD", dec!(0.1), dec!(0.00001), dec!(1), dec!(1000)).unwrap()
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_to_increment(dec!(0.25), dec!(0.1)).unwrap(), dec!(0.3));
        assert_eq!(round_to_increment(dec!(0.24), dec!(0.1)).unwrap(), dec!(0.2));
        assert_eq!(round_to_increment(dec!(12.345), dec!(0.01)).unwrap(), dec!(12.35));
        assert_eq!(round_to_increment(dec!(7), dec!(5)).unwrap(), dec!(5));
        assert_eq!(round_to_increment(dec!(7.5), dec!(5)).unwrap(), dec!(10));
    }

    #[test]
    fn test_round_keeps_increment_scale() {
        let rounded = round_to_increment(dec!(0.001992), dec!(0.00000001)).unwrap();
        assert_eq!(rounded.to_string(), "0.00199200");
    }

    #[test]
    fn test_round_rejects_non_positive_increment() {
        assert!(matches!(
            round_to_increment(dec!(1), Decimal::ZERO),
            Err(SizingError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_buy_applies_fee_to_purchasing_power() {
        // 100 * (1 - 0.004) = 99.6; 99.6 / 50000 = 0.001992
        let order = size_order(
            dec!(100),
            OrderSide::Buy,
            OrderType::Market,
            dec!(50000),
            dec!(0.004),
            &btc_usdc(),
        )
        .unwrap();

        assert_eq!(order.base_size, dec!(0.00199200));
        assert_eq!(order.side, OrderSide::Buy);
        assert_eq!(order.limit_price, None);
        assert_eq!(order.pair_id, "BTC-USDC");
    }

    #[test]
    fn test_sell_grosses_up_for_fee() {
        // 99.6 / (1 - 0.004) = 100; 100 / 50000 = 0.002
        let order = size_order(
            dec!(99.6),
            OrderSide::Sell,
            OrderType::Market,
            dec!(50000),
            dec!(0.004),
            &btc_usdc(),
        )
        .unwrap();

        assert_eq!(order.base_size, dec!(0.002));
    }

    #[test]
    fn test_limit_price_quantized_before_sizing() {
        // 49999.995 -> 50000.00, then 100 / 50000 = 0.002
        let order = size_order(
            dec!(100),
            OrderSide::Buy,
            OrderType::Limit,
            dec!(49999.995),
            Decimal::ZERO,
            &btc_usdc(),
        )
        .unwrap();

        assert_eq!(order.limit_price, Some(dec!(50000.00)));
        assert_eq!(order.base_size, dec!(0.002));
        assert!(order.is_limit());
    }

    #[test]
    fn test_limit_price_rounding_to_zero_is_invalid() {
        let result = size_order(
            dec!(100),
            OrderSide::Buy,
            OrderType::Limit,
            dec!(0.004),
            Decimal::ZERO,
            &btc_usdc(),
        );
        assert!(matches!(result, Err(SizingError::InvalidInput(_))));
    }

    #[test]
    fn test_base_size_is_multiple_of_increment() {
        let product = coarse_product();
        for amount in [dec!(1.37), dec!(13.99), dec!(57.123), dec!(99.5)] {
            let order = size_order(
                amount,
                OrderSide::Buy,
                OrderType::Market,
                dec!(0.12345),
                dec!(0.006),
                &product,
            )
            .unwrap();
            assert_eq!(order.base_size % product.base_increment, Decimal::ZERO);
        }
    }

    #[test]
    fn test_buy_size_is_monotonic_in_fiat_amount() {
        let product = btc_usdc();
        let mut previous = Decimal::ZERO;
        let mut amount = dec!(1);
        while amount <= dec!(200) {
            let order = size_order(
                amount,
                OrderSide::Buy,
                OrderType::Market,
                dec!(43127.19),
                dec!(0.006),
                &product,
            )
            .unwrap();
            assert!(order.base_size >= previous, "size decreased at {}", amount);
            previous = order.base_size;
            amount += dec!(7.31);
        }
    }

    #[test]
    fn test_below_minimum_is_rejected_not_bumped() {
        // 0.55 / 1 = 0.55 -> rounds to 0.6 with increment 0.1, below min 1
        let result = size_order(
            dec!(0.55),
            OrderSide::Buy,
            OrderType::Market,
            dec!(1),
            Decimal::ZERO,
            &coarse_product(),
        );

        assert_eq!(
            result,
            Err(SizingError::BelowMinimumSize {
                size: dec!(0.6),
                min: dec!(1),
            })
        );
    }

    #[test]
    fn test_one_increment_below_minimum() {
        // 0.94 rounds to 0.9, exactly one increment below the minimum
        let result = size_order(
            dec!(0.94),
            OrderSide::Buy,
            OrderType::Market,
            dec!(1),
            Decimal::ZERO,
            &coarse_product(),
        );
        assert!(matches!(result, Err(SizingError::BelowMinimumSize { .. })));
    }

    #[test]
    fn test_above_maximum_is_rejected() {
        let result = size_order(
            dec!(5000),
            OrderSide::Sell,
            OrderType::Market,
            dec!(1),
            Decimal::ZERO,
            &coarse_product(),
        );
        assert_eq!(
            result,
            Err(SizingError::AboveMaximumSize {
                size: dec!(5000.0),
                max: dec!(1000),
            })
        );
    }

    #[test]
    fn test_huge_amount_on_fine_increment_is_above_maximum() {
        let product = ProductConstraints::new(
            "SHIB-USD",
            dec!(0.00000001),
            dec!(0.00000001),
            dec!(0.00000001),
            dec!(1000000000),
        )
        .unwrap();

        let result = size_order(
            dec!(100000000000000000000),
            OrderSide::Buy,
            OrderType::Market,
            dec!(0.00001),
            Decimal::ZERO,
            &product,
        );

        match result {
            Err(SizingError::AboveMaximumSize { max, .. }) => assert_eq!(max, dec!(1000000000)),
            other => panic!("expected AboveMaximumSize, got {:?}", other),
        }
    }

    #[test]
    fn test_sell_fee_near_one_is_invalid_input() {
        let result = size_order(
            dec!(1000),
            OrderSide::Sell,
            OrderType::Market,
            dec!(50000),
            dec!(0.9999999999999999999999999999),
            &btc_usdc(),
        );
        assert!(matches!(result, Err(SizingError::InvalidInput(_))));

        assert!(matches!(
            effective_amount(dec!(1000), OrderSide::Sell, dec!(0.9999999999999999999999999999)),
            Err(SizingError::InvalidInput(_))
        ));
        assert_eq!(
            effective_amount(dec!(100), OrderSide::Buy, dec!(0.004)).unwrap(),
            dec!(99.6)
        );
    }

    #[test]
    fn test_round_overflow_is_invalid_input() {
        assert!(matches!(
            round_to_increment(Decimal::MAX, dec!(0.1)),
            Err(SizingError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_invalid_inputs() {
        let product = btc_usdc();
        let cases = [
            (dec!(0), dec!(50000), dec!(0.004)),
            (dec!(-5), dec!(50000), dec!(0.004)),
            (dec!(100), dec!(0), dec!(0.004)),
            (dec!(100), dec!(50000), dec!(1)),
            (dec!(100), dec!(50000), dec!(-0.1)),
        ];
        for (amount, price, fee) in cases {
            let result = size_order(amount, OrderSide::Buy, OrderType::Market, price, fee, &product);
            assert!(
                matches!(result, Err(SizingError::InvalidInput(_))),
                "expected InvalidInput for {} @ {} fee {}",
                amount,
                price,
                fee
            );
        }
    }

    #[test]
    fn test_invalid_constraints_rejected() {
        let broken = ProductConstraints {
            pair_id: "BTC-USDC".to_string(),
            base_increment: Decimal::ZERO,
            quote_increment: dec!(0.01),
            base_min_size: dec!(0.00000001),
            base_max_size: dec!(3400),
        };
        let result = size_order(
            dec!(100),
            OrderSide::Buy,
            OrderType::Market,
            dec!(50000),
            dec!(0.004),
            &broken,
        );
        assert!(matches!(result, Err(SizingError::InvalidInput(_))));
    }

    #[test]
    fn test_sizing_is_deterministic_apart_from_client_id() {
        let product = btc_usdc();
        let a = size_order(dec!(25), OrderSide::Sell, OrderType::Limit, dec!(61234.567), dec!(0.006), &product)
            .unwrap();
        let b = size_order(dec!(25), OrderSide::Sell, OrderType::Limit, dec!(61234.567), dec!(0.006), &product)
            .unwrap();

        assert_eq!(a.base_size, b.base_size);
        assert_eq!(a.limit_price, b.limit_price);
        assert_ne!(a.client_order_id, b.client_order_id);
    }
}
