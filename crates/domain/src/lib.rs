//! Domain model for single-sided concentrated liquidity positions.
//!
//! * [`value_objects`] - [`Price`](value_objects::Price) and the validated
//!   [`PriceRange`](value_objects::PriceRange).
//! * [`entities`] - the [`Position`](entities::Position) state and the
//!   per-step [`SwapQuote`](entities::SwapQuote).
//! * [`math`] - closed-form liquidity and reserve formulas.
//! * [`error`] - [`PositionError`](error::PositionError).

pub mod entities;
pub mod error;
pub mod math;
pub mod value_objects;

pub use error::{PositionError, PositionResult};
