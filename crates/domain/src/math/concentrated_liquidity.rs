use crate::error::{PositionError, PositionResult};
use rust_decimal::Decimal;

fn ordered(sqrt_price_a: Decimal, sqrt_price_b: Decimal) -> (Decimal, Decimal) {
    if sqrt_price_a < sqrt_price_b {
        (sqrt_price_a, sqrt_price_b)
    } else {
        (sqrt_price_b, sqrt_price_a)
    }
}

/// `1/sqrt(P_a) - 1/sqrt(P_b)` for `P_a < P_b`.
///
/// Shared by the liquidity and reserve formulas so that converting an amount
/// to liquidity and back goes through the exact same denominator.
pub fn inverse_sqrt_span(sqrt_price_a: Decimal, sqrt_price_b: Decimal) -> PositionResult<Decimal> {
    if sqrt_price_a <= Decimal::ZERO || sqrt_price_b <= Decimal::ZERO {
        return Err(PositionError::DegeneratePosition("sqrt price must be positive"));
    }
    let (lower, upper) = ordered(sqrt_price_a, sqrt_price_b);

    let inv_lower = Decimal::ONE
        .checked_div(lower)
        .ok_or(PositionError::Overflow("inverse of lower sqrt price"))?;
    let inv_upper = Decimal::ONE
        .checked_div(upper)
        .ok_or(PositionError::Overflow("inverse of upper sqrt price"))?;

    Ok(inv_lower - inv_upper)
}

/// Calculates the amount of token0 (x) given liquidity and price range.
/// delta_x = L * (1/sqrt(P_a) - 1/sqrt(P_b))
/// where P_a < P_b
pub fn get_amount0_delta(
    liquidity: Decimal,
    sqrt_price_a: Decimal,
    sqrt_price_b: Decimal,
) -> PositionResult<Decimal> {
    let span = inverse_sqrt_span(sqrt_price_a, sqrt_price_b)?;
    liquidity
        .checked_mul(span)
        .ok_or(PositionError::Overflow("amount0 delta"))
}

/// Calculates the amount of token1 (y) given liquidity and price range.
/// delta_y = L * (sqrt(P_b) - sqrt(P_a))
/// where P_a < P_b
pub fn get_amount1_delta(
    liquidity: Decimal,
    sqrt_price_a: Decimal,
    sqrt_price_b: Decimal,
) -> PositionResult<Decimal> {
    let (lower, upper) = ordered(sqrt_price_a, sqrt_price_b);
    liquidity
        .checked_mul(upper - lower)
        .ok_or(PositionError::Overflow("amount1 delta"))
}

/// Calculates liquidity for a given amount of token0 and price range
/// L = amount0 / (1/sqrt(P_a) - 1/sqrt(P_b))
///
/// A span that rounds to zero or a quotient that overflows means the lower
/// sqrt price sits on top of the upper one, which is reported as a
/// degenerate position.
pub fn get_liquidity_for_amount0(
    amount0: Decimal,
    sqrt_price_a: Decimal,
    sqrt_price_b: Decimal,
) -> PositionResult<Decimal> {
    if amount0 < Decimal::ZERO {
        return Err(PositionError::NegativeAmount(amount0));
    }
    let span = inverse_sqrt_span(sqrt_price_a, sqrt_price_b)?;
    if span.is_zero() {
        return Err(PositionError::DegeneratePosition("range too small"));
    }
    amount0
        .checked_div(span)
        .ok_or(PositionError::DegeneratePosition("liquidity overflow"))
}

/// Sqrt price at which a position of `liquidity` holds exactly `amount0`
/// of token0 below `sqrt_price_upper`.
/// 1/sqrt(P) = amount0 / L + 1/sqrt(P_b)
pub fn get_sqrt_price_for_amount0(
    liquidity: Decimal,
    amount0: Decimal,
    sqrt_price_upper: Decimal,
) -> PositionResult<Decimal> {
    if liquidity <= Decimal::ZERO {
        return Err(PositionError::DegeneratePosition("liquidity must be positive"));
    }
    if amount0 < Decimal::ZERO {
        return Err(PositionError::NegativeAmount(amount0));
    }
    let inv_upper = Decimal::ONE
        .checked_div(sqrt_price_upper)
        .ok_or(PositionError::Overflow("inverse of upper sqrt price"))?;
    let inv_sqrt = amount0
        .checked_div(liquidity)
        .and_then(|per_unit| per_unit.checked_add(inv_upper))
        .ok_or(PositionError::Overflow("inverse sqrt price"))?;

    Decimal::ONE
        .checked_div(inv_sqrt)
        .ok_or(PositionError::Overflow("sqrt price"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_amount_deltas() {
        // Example: Liquidity 1000
        // Price goes from 1 to 4 (sqrt: 1 to 2)
        // delta_y = 1000 * (2 - 1) = 1000
        // delta_x = 1000 * (1/1 - 1/2) = 1000 * 0.5 = 500

        let liquidity = dec!(1000);
        let sqrt_p_a = Decimal::from(1);
        let sqrt_p_b = Decimal::from(2);

        let dy = get_amount1_delta(liquidity, sqrt_p_a, sqrt_p_b).unwrap();
        assert_eq!(dy, dec!(1000));

        let dx = get_amount0_delta(liquidity, sqrt_p_a, sqrt_p_b).unwrap();
        assert_eq!(dx, dec!(500));

        // Argument order does not matter
        let dx_rev = get_amount0_delta(liquidity, sqrt_p_b, sqrt_p_a).unwrap();
        assert_eq!(dx_rev, dx);
    }

    #[test]
    fn test_get_liquidity() {
        let sqrt_p_a = Decimal::from(1);
        let sqrt_p_b = Decimal::from(2);

        // From previous test: if dx = 500, L should be 1000
        let l = get_liquidity_for_amount0(dec!(500), sqrt_p_a, sqrt_p_b).unwrap();
        assert_eq!(l, dec!(1000));
    }

    #[test]
    fn test_get_liquidity_rejects_bad_input() {
        assert_eq!(
            get_liquidity_for_amount0(dec!(-1), dec!(1), dec!(2)),
            Err(PositionError::NegativeAmount(dec!(-1)))
        );
        assert!(matches!(
            get_liquidity_for_amount0(dec!(1), dec!(2), dec!(2)),
            Err(PositionError::DegeneratePosition(_))
        ));
        assert!(matches!(
            get_liquidity_for_amount0(dec!(1), Decimal::ZERO, dec!(2)),
            Err(PositionError::DegeneratePosition(_))
        ));
    }

    #[test]
    fn test_sqrt_price_for_amount0() {
        // L = 1000 over sqrt [1, 2] holds 500 X at sqrt 1 and 0 X at sqrt 2.
        let s = get_sqrt_price_for_amount0(dec!(1000), dec!(500), dec!(2)).unwrap();
        assert_eq!(s, dec!(1));

        let s = get_sqrt_price_for_amount0(dec!(1000), Decimal::ZERO, dec!(2)).unwrap();
        assert_eq!(s, dec!(2));

        // 1/s = 100/1000 + 0.5 = 0.6
        let s = get_sqrt_price_for_amount0(dec!(1000), dec!(100), dec!(2)).unwrap();
        assert!((s - dec!(1.6666666666666666666666666667)).abs() < dec!(0.0000000001));
    }
}
