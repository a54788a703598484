use crate::error::{PositionError, PositionResult};
use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};

/// Price of token X quoted in token Y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Price {
    pub value: Decimal,
}

impl Price {
    pub fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Builds a price from its square root.
    pub fn from_sqrt(sqrt_price: Decimal) -> PositionResult<Self> {
        sqrt_price
            .checked_mul(sqrt_price)
            .map(Self::new)
            .ok_or(PositionError::Overflow("price from sqrt price"))
    }

    /// Square root of the price. Only defined for positive prices.
    pub fn sqrt(&self) -> PositionResult<Decimal> {
        if self.value <= Decimal::ZERO {
            return Err(PositionError::InvalidRange {
                lower: self.value,
                upper: self.value,
            });
        }
        self.value
            .sqrt()
            .ok_or(PositionError::Overflow("sqrt price"))
    }

    pub fn invert(&self) -> Self {
        if self.value.is_zero() {
            return Self {
                value: Decimal::ZERO,
            };
        }
        Self {
            value: Decimal::ONE / self.value,
        }
    }
}
