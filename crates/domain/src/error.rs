//! Error types for position and swap math.
//!
//! Every fallible operation in the domain and simulation crates returns
//! [`PositionError`]. All computations are deterministic, so none of these
//! conditions is retryable: repeating a call with the same inputs reproduces
//! the same error.

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

/// Errors raised while building or trading against a position.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum PositionError {
    /// The price bounds are not strictly increasing or not positive.
    #[error("Invalid price range: lower {lower} must be positive and below upper {upper}")]
    InvalidRange {
        /// Requested lower price.
        lower: Decimal,
        /// Requested upper price.
        upper: Decimal,
    },

    /// The starting sqrt price lies outside `[sqrt(p_min), sqrt(p_max))`.
    #[error("Sqrt price {sqrt_price} outside range [{sqrt_lower}, {sqrt_upper})")]
    PriceOutOfRange {
        /// Offending sqrt price.
        sqrt_price: Decimal,
        /// Square root of the lower bound.
        sqrt_lower: Decimal,
        /// Square root of the upper bound.
        sqrt_upper: Decimal,
    },

    /// The derived liquidity is zero, negative, or overflowed.
    #[error("Degenerate position: {0}")]
    DegeneratePosition(&'static str),

    /// The requested X outflow would drain the position.
    #[error("Insufficient reserve: requested {requested}, available {available}")]
    InsufficientReserve {
        /// Amount of X requested.
        requested: Decimal,
        /// X reserve currently held by the position.
        available: Decimal,
    },

    /// A supplied amount is below zero.
    #[error("Amount must not be negative, got {0}")]
    NegativeAmount(Decimal),

    /// A positive X outflow too small to move the price at 28-digit precision.
    #[error("Amount {0} is too small to move the price")]
    AmountTooSmall(Decimal),

    /// An intermediate value could not be represented.
    #[error("Arithmetic overflow in {0}")]
    Overflow(&'static str),
}

/// Convenience alias used across the workspace.
pub type PositionResult<T> = Result<T, PositionError>;
