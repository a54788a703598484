use crate::error::{PositionError, PositionResult};
use crate::value_objects::price::Price;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Closed price interval `[lower, upper]` a position is bounded by.
///
/// Both bounds are positive and `lower < upper`. The fields are private so a
/// range can only be obtained through [`PriceRange::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPriceRange")]
pub struct PriceRange {
    lower_price: Price,
    upper_price: Price,
}

#[derive(Deserialize)]
struct RawPriceRange {
    lower_price: Price,
    upper_price: Price,
}

impl TryFrom<RawPriceRange> for PriceRange {
    type Error = PositionError;

    fn try_from(raw: RawPriceRange) -> Result<Self, Self::Error> {
        Self::new(raw.lower_price, raw.upper_price)
    }
}

impl PriceRange {
    /// Creates a validated range.
    ///
    /// # Errors
    ///
    /// Returns [`PositionError::InvalidRange`] when `lower >= upper` or when
    /// `lower` is not positive.
    pub fn new(lower: Price, upper: Price) -> PositionResult<Self> {
        if lower.value <= Decimal::ZERO || lower.value >= upper.value {
            return Err(PositionError::InvalidRange {
                lower: lower.value,
                upper: upper.value,
            });
        }
        Ok(Self {
            lower_price: lower,
            upper_price: upper,
        })
    }

    pub fn lower_price(&self) -> Price {
        self.lower_price
    }

    pub fn upper_price(&self) -> Price {
        self.upper_price
    }

    /// `sqrt(p_min)`.
    pub fn sqrt_lower(&self) -> PositionResult<Decimal> {
        self.lower_price.sqrt()
    }

    /// `sqrt(p_max)`.
    pub fn sqrt_upper(&self) -> PositionResult<Decimal> {
        self.upper_price.sqrt()
    }

    /// Half-open membership test: the upper bound itself is excluded since a
    /// position sitting there holds no X.
    pub fn contains(&self, price: Price) -> bool {
        price.value >= self.lower_price.value && price.value < self.upper_price.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rejects_inverted_range() {
        let err = PriceRange::new(Price::new(dec!(0.06)), Price::new(dec!(0.01))).unwrap_err();
        assert_eq!(
            err,
            PositionError::InvalidRange {
                lower: dec!(0.06),
                upper: dec!(0.01),
            }
        );
        assert!(PriceRange::new(Price::new(dec!(1)), Price::new(dec!(1))).is_err());
        assert!(PriceRange::new(Price::new(dec!(0)), Price::new(dec!(1))).is_err());
    }

    #[test]
    fn test_contains_is_half_open() {
        let range = PriceRange::new(Price::new(dec!(90)), Price::new(dec!(110))).unwrap();

        assert!(range.contains(Price::new(dec!(90))));
        assert!(range.contains(Price::new(dec!(100))));
        assert!(!range.contains(Price::new(dec!(110))));
        assert!(!range.contains(Price::new(dec!(89))));
    }

    #[test]
    fn test_sqrt_bounds() {
        let range = PriceRange::new(Price::new(dec!(4)), Price::new(dec!(16))).unwrap();
        assert_eq!(range.sqrt_lower().unwrap(), dec!(2));
        assert!((range.sqrt_upper().unwrap() - dec!(4)).abs() < dec!(0.000000000001));
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"{"lower_price":{"value":"2"},"upper_price":{"value":"1"}}"#;
        assert!(serde_json::from_str::<PriceRange>(json).is_err());

        let json = r#"{"lower_price":{"value":"1"},"upper_price":{"value":"2"}}"#;
        let range: PriceRange = serde_json::from_str(json).unwrap();
        assert_eq!(range.upper_price().value, dec!(2));
    }
}
