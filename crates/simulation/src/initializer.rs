//! Position initialization from a one-sided X deposit.
//!
//! The deposit is converted into the liquidity constant of the range; the
//! returned [`Position`] then reports the implied X and Y reserves at its
//! starting price.

use clmm_swap_domain::entities::Position;
use clmm_swap_domain::error::{PositionError, PositionResult};
use clmm_swap_domain::math::concentrated_liquidity::get_liquidity_for_amount0;
use clmm_swap_domain::value_objects::PriceRange;
use rust_decimal::Decimal;
use tracing::debug;

/// Opens a position holding `amount_x` of token X at `start_sqrt_price`.
///
/// L = amount_x / (1/sqrt(P) - 1/sqrt(P_max))
///
/// # Arguments
///
/// * `range` - Validated price range of the position
/// * `start_sqrt_price` - Starting sqrt price, in `[sqrt(p_min), sqrt(p_max))`
/// * `amount_x` - X deposited
///
/// # Errors
///
/// * [`PositionError::PriceOutOfRange`] if the start price is outside the range
/// * [`PositionError::NegativeAmount`] if `amount_x < 0`
/// * [`PositionError::DegeneratePosition`] if the liquidity is zero or
///   overflows, or if the reserves at the start price are not representable
pub fn initialize(
    range: PriceRange,
    start_sqrt_price: Decimal,
    amount_x: Decimal,
) -> PositionResult<Position> {
    let sqrt_lower = range.sqrt_lower()?;
    let sqrt_upper = range.sqrt_upper()?;

    if start_sqrt_price < sqrt_lower || start_sqrt_price >= sqrt_upper {
        return Err(PositionError::PriceOutOfRange {
            sqrt_price: start_sqrt_price,
            sqrt_lower,
            sqrt_upper,
        });
    }
    if amount_x < Decimal::ZERO {
        return Err(PositionError::NegativeAmount(amount_x));
    }

    let liquidity = get_liquidity_for_amount0(amount_x, start_sqrt_price, sqrt_upper)?;
    if liquidity <= Decimal::ZERO {
        return Err(PositionError::DegeneratePosition("zero liquidity"));
    }

    let position = Position::from_parts(range, liquidity, start_sqrt_price)?;
    if position.reserve_x().is_err() || position.reserve_y().is_err() {
        return Err(PositionError::DegeneratePosition("reserves overflow"));
    }
    debug!(
        liquidity = %liquidity,
        sqrt_price = %start_sqrt_price,
        amount_x = %amount_x,
        "Position initialized"
    );
    Ok(position)
}

/// Opens a position at the bottom of its range, where it holds only X.
pub fn initialize_at_lower(range: PriceRange, amount_x: Decimal) -> PositionResult<Position> {
    let start = range.sqrt_lower()?;
    initialize(range, start, amount_x)
}
