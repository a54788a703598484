//! Closed-form concentrated liquidity math.
pub mod concentrated_liquidity;
