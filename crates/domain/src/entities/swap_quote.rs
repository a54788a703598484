use crate::error::{PositionError, PositionResult};
use crate::value_objects::Price;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Outcome of removing X from a position in a single step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapQuote {
    /// X taken out of the position.
    pub x_removed: Decimal,
    /// Y the trader has to pay in.
    pub y_required: Decimal,
    /// Sqrt price before the step.
    pub sqrt_price_before: Decimal,
    /// Sqrt price after the step.
    pub sqrt_price_after: Decimal,
    /// X left in the position after the step.
    pub reserve_x_after: Decimal,
    /// Y held by the position after the step.
    pub reserve_y_after: Decimal,
}

impl SwapQuote {
    /// A quote for a step that moved nothing.
    pub fn zero(sqrt_price: Decimal, reserve_x: Decimal, reserve_y: Decimal) -> Self {
        Self {
            x_removed: Decimal::ZERO,
            y_required: Decimal::ZERO,
            sqrt_price_before: sqrt_price,
            sqrt_price_after: sqrt_price,
            reserve_x_after: reserve_x,
            reserve_y_after: reserve_y,
        }
    }

    pub fn price_before(&self) -> PositionResult<Price> {
        Price::from_sqrt(self.sqrt_price_before)
    }

    pub fn price_after(&self) -> PositionResult<Price> {
        Price::from_sqrt(self.sqrt_price_after)
    }

    /// Relative price move caused by the step, `P_after / P_before - 1`.
    ///
    /// # Errors
    ///
    /// [`PositionError::Overflow`] when the ratio is not representable, which
    /// happens on very wide ranges traded across most of their span.
    pub fn price_impact(&self) -> PositionResult<Decimal> {
        let before = self.price_before()?;
        let after = self.price_after()?;
        if before.value.is_zero() {
            return Ok(Decimal::ZERO);
        }
        after
            .value
            .checked_div(before.value)
            .and_then(|ratio| ratio.checked_sub(Decimal::ONE))
            .ok_or(PositionError::Overflow("price impact"))
    }

    /// Average Y paid per unit of X received.
    pub fn effective_price(&self) -> Option<Price> {
        self.y_required.checked_div(self.x_removed).map(Price::new)
    }
}
