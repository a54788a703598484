//! Live state of a single-sided concentrated liquidity position.
//!
//! A [`Position`] is fully described by its range, its liquidity constant and
//! its current sqrt price. Reserves are never stored: [`Position::reserve_x`]
//! and [`Position::reserve_y`] recompute them from those three values, so a
//! trajectory of positions can never drift away from the curve.

use crate::error::{PositionError, PositionResult};
use crate::math::concentrated_liquidity::{get_amount0_delta, get_amount1_delta};
use crate::value_objects::{Price, PriceRange};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Serialized form of a position. Deserialization re-runs validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PositionParts {
    range: PriceRange,
    liquidity: Decimal,
    sqrt_price: Decimal,
}

/// A single-sided liquidity placement inside a price range.
///
/// Not `Copy`: state transitions consume the position and hand back its
/// successor, so the caller always holds one consistent trajectory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PositionParts", into = "PositionParts")]
pub struct Position {
    range: PriceRange,
    liquidity: Decimal,
    sqrt_price: Decimal,
    sqrt_lower: Decimal,
    sqrt_upper: Decimal,
}

impl Position {
    /// Assembles a position after checking its invariants.
    ///
    /// # Errors
    ///
    /// * [`PositionError::DegeneratePosition`] if `liquidity` is not positive.
    /// * [`PositionError::PriceOutOfRange`] unless
    ///   `sqrt(p_min) <= sqrt_price < sqrt(p_max)`.
    pub fn from_parts(
        range: PriceRange,
        liquidity: Decimal,
        sqrt_price: Decimal,
    ) -> PositionResult<Self> {
        if liquidity <= Decimal::ZERO {
            return Err(PositionError::DegeneratePosition(
                "liquidity must be positive",
            ));
        }

        let sqrt_lower = range.sqrt_lower()?;
        let sqrt_upper = range.sqrt_upper()?;
        if sqrt_price < sqrt_lower || sqrt_price >= sqrt_upper {
            return Err(PositionError::PriceOutOfRange {
                sqrt_price,
                sqrt_lower,
                sqrt_upper,
            });
        }

        Ok(Self {
            range,
            liquidity,
            sqrt_price,
            sqrt_lower,
            sqrt_upper,
        })
    }

    /// Returns a position with the same range and liquidity at a new sqrt
    /// price, validated like [`Position::from_parts`].
    pub fn with_sqrt_price(&self, sqrt_price: Decimal) -> PositionResult<Self> {
        if sqrt_price < self.sqrt_lower || sqrt_price >= self.sqrt_upper {
            return Err(PositionError::PriceOutOfRange {
                sqrt_price,
                sqrt_lower: self.sqrt_lower,
                sqrt_upper: self.sqrt_upper,
            });
        }
        Ok(Self {
            sqrt_price,
            ..self.clone()
        })
    }

    pub fn range(&self) -> &PriceRange {
        &self.range
    }

    pub fn liquidity(&self) -> Decimal {
        self.liquidity
    }

    pub fn sqrt_price(&self) -> Decimal {
        self.sqrt_price
    }

    pub fn sqrt_lower(&self) -> Decimal {
        self.sqrt_lower
    }

    pub fn sqrt_upper(&self) -> Decimal {
        self.sqrt_upper
    }

    /// Current price, `sqrt_price²`.
    pub fn price(&self) -> PositionResult<Price> {
        Price::from_sqrt(self.sqrt_price)
    }

    /// X held between the current price and the upper bound.
    /// reserve_x = L * (1/sqrt(P) - 1/sqrt(P_max))
    pub fn reserve_x(&self) -> PositionResult<Decimal> {
        get_amount0_delta(self.liquidity, self.sqrt_price, self.sqrt_upper)
    }

    /// Y accumulated between the lower bound and the current price.
    /// reserve_y = L * (sqrt(P) - sqrt(P_min))
    ///
    /// # Errors
    ///
    /// [`PositionError::Overflow`] when `L * (sqrt(P) - sqrt(P_min))` is not
    /// representable. Initialization rejects such positions, but a swap can
    /// still raise the price far enough to reach it.
    pub fn reserve_y(&self) -> PositionResult<Decimal> {
        get_amount1_delta(self.liquidity, self.sqrt_lower, self.sqrt_price)
    }
}

impl TryFrom<PositionParts> for Position {
    type Error = PositionError;

    fn try_from(parts: PositionParts) -> Result<Self, Self::Error> {
        Self::from_parts(parts.range, parts.liquidity, parts.sqrt_price)
    }
}

impl From<Position> for PositionParts {
    fn from(position: Position) -> Self {
        Self {
            range: position.range,
            liquidity: position.liquidity,
            sqrt_price: position.sqrt_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn range_1_4() -> PriceRange {
        PriceRange::new(Price::new(dec!(1)), Price::new(dec!(4))).unwrap()
    }

    #[test]
    fn test_reserves_are_derived_from_sqrt_price() {
        let position = Position::from_parts(range_1_4(), dec!(1000), dec!(1)).unwrap();
        assert_eq!(position.reserve_x().unwrap(), dec!(500));
        assert_eq!(position.reserve_y().unwrap(), Decimal::ZERO);

        let moved = position.with_sqrt_price(dec!(1.25)).unwrap();
        // 1000 * (1/1.25 - 1/2) = 1000 * 0.3
        assert_eq!(moved.reserve_x().unwrap(), dec!(300));
        assert_eq!(moved.reserve_y().unwrap(), dec!(250));
        assert_eq!(moved.price().unwrap().value, dec!(1.5625));
        assert_eq!(moved.liquidity(), position.liquidity());
    }

    #[test]
    fn test_rejects_sqrt_price_at_upper_bound() {
        let err = Position::from_parts(range_1_4(), dec!(1000), dec!(2)).unwrap_err();
        assert!(matches!(err, PositionError::PriceOutOfRange { .. }));

        let err = Position::from_parts(range_1_4(), dec!(1000), dec!(0.5)).unwrap_err();
        assert!(matches!(err, PositionError::PriceOutOfRange { .. }));
    }

    #[test]
    fn test_rejects_non_positive_liquidity() {
        let err = Position::from_parts(range_1_4(), Decimal::ZERO, dec!(1)).unwrap_err();
        assert!(matches!(err, PositionError::DegeneratePosition(_)));
    }

    #[test]
    fn test_serde_roundtrip_revalidates() {
        let position = Position::from_parts(range_1_4(), dec!(1000), dec!(1.5)).unwrap();
        let json = serde_json::to_string(&position).unwrap();
        let back: Position = serde_json::from_str(&json).unwrap();
        assert_eq!(back, position);

        let tampered = json.replace("\"1.5\"", "\"3\"");
        assert!(serde_json::from_str::<Position>(&tampered).is_err());
    }
}
