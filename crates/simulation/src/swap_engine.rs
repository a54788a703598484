//! Swap stepping against a single-sided position.
//!
//! Removing X from the position moves its sqrt price up towards the upper
//! bound; the Y the trader pays in is the growth of the Y reserve between the
//! two prices. Each step consumes a [`Position`] and returns its successor.

use clmm_swap_domain::entities::{Position, SwapQuote};
use clmm_swap_domain::error::{PositionError, PositionResult};
use clmm_swap_domain::math::concentrated_liquidity::get_sqrt_price_for_amount0;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Removes `x_removed` of X from `position`.
///
/// Returns the successor position together with the quote for the step.
/// `x_removed == 0` returns the position unchanged with a zero quote.
///
/// # Errors
///
/// * [`PositionError::NegativeAmount`] if `x_removed < 0`
/// * [`PositionError::InsufficientReserve`] if `x_removed` is not strictly
///   below the current X reserve
/// * [`PositionError::AmountTooSmall`] if a positive `x_removed` would leave
///   the price unchanged or require no Y
pub fn apply_swap(position: Position, x_removed: Decimal) -> PositionResult<(Position, SwapQuote)> {
    step(&position, x_removed)
}

fn step(position: &Position, x_removed: Decimal) -> PositionResult<(Position, SwapQuote)> {
    if x_removed < Decimal::ZERO {
        return Err(PositionError::NegativeAmount(x_removed));
    }

    let reserve_x = position.reserve_x()?;
    let reserve_y = position.reserve_y()?;

    if x_removed.is_zero() {
        let quote = SwapQuote::zero(position.sqrt_price(), reserve_x, reserve_y);
        return Ok((position.clone(), quote));
    }

    let insufficient = PositionError::InsufficientReserve {
        requested: x_removed,
        available: reserve_x,
    };
    if x_removed >= reserve_x {
        warn!(requested = %x_removed, available = %reserve_x, "Swap exceeds X reserve");
        return Err(insufficient);
    }

    let x_new = reserve_x - x_removed;
    let sqrt_new = get_sqrt_price_for_amount0(position.liquidity(), x_new, position.sqrt_upper())?;

    // X left the position, so the price must strictly rise.
    if sqrt_new <= position.sqrt_price() {
        warn!(requested = %x_removed, "Swap too small to move the price");
        return Err(PositionError::AmountTooSmall(x_removed));
    }
    // A remainder too small to represent would land on the upper bound.
    if sqrt_new >= position.sqrt_upper() {
        warn!(requested = %x_removed, available = %reserve_x, "Swap would deplete position");
        return Err(insufficient);
    }

    let next = position.with_sqrt_price(sqrt_new)?;
    let reserve_y_after = next.reserve_y()?;
    let y_required = reserve_y_after - reserve_y;
    if y_required <= Decimal::ZERO {
        warn!(requested = %x_removed, "Swap too small to require any Y");
        return Err(PositionError::AmountTooSmall(x_removed));
    }
    let quote = SwapQuote {
        x_removed,
        y_required,
        sqrt_price_before: position.sqrt_price(),
        sqrt_price_after: sqrt_new,
        reserve_x_after: next.reserve_x()?,
        reserve_y_after,
    };

    debug!(
        x_removed = %quote.x_removed,
        y_required = %quote.y_required,
        sqrt_price_before = %quote.sqrt_price_before,
        sqrt_price_after = %quote.sqrt_price_after,
        "Swap applied"
    );
    Ok((next, quote))
}

/// The step at which a sequence stopped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwapFailure {
    /// Zero-based index of the failing request.
    pub index: usize,
    /// Why the step was rejected.
    pub error: PositionError,
}

/// Result of running an ordered list of swap requests.
///
/// Quotes cover only the steps that completed. When `failure` is set, the
/// request at `failure.index` was rejected and no later request was tried;
/// `final_position` is the state after the last completed step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwapSequence {
    /// Position before the first request.
    pub initial_position: Position,
    /// Position after the last completed request.
    pub final_position: Position,
    /// One quote per completed request, in order.
    pub quotes: Vec<SwapQuote>,
    /// Sum of `y_required` over the completed requests.
    pub total_y_required: Decimal,
    /// First rejected request, if any.
    pub failure: Option<SwapFailure>,
}

impl SwapSequence {
    /// True when every request was applied.
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }

    pub fn completed_steps(&self) -> usize {
        self.quotes.len()
    }

    /// Total X removed over the completed requests.
    pub fn total_x_removed(&self) -> Decimal {
        self.quotes.iter().map(|q| q.x_removed).sum()
    }

    /// Sqrt price before the first step followed by the price after each
    /// completed step.
    pub fn sqrt_price_path(&self) -> Vec<Decimal> {
        std::iter::once(self.initial_position.sqrt_price())
            .chain(self.quotes.iter().map(|q| q.sqrt_price_after))
            .collect()
    }

    /// Turns a partially failed sequence into an error carrying the
    /// completed prefix.
    pub fn into_result(self) -> Result<Self, SequenceError> {
        match self.failure.clone() {
            None => Ok(self),
            Some(failure) => Err(SequenceError {
                index: failure.index,
                source: failure.error,
                completed: Box::new(self),
            }),
        }
    }
}

/// A swap sequence that stopped before its last request.
#[derive(Debug, Error)]
#[error("Swap step {index} failed: {source}")]
pub struct SequenceError {
    /// Zero-based index of the failing request.
    pub index: usize,
    /// Why the step was rejected.
    #[source]
    pub source: PositionError,
    /// Everything computed before the failing step.
    pub completed: Box<SwapSequence>,
}

/// Applies `amounts` in order, threading each successor position into the
/// next step.
///
/// Stops at the first rejected request and reports it in
/// [`SwapSequence::failure`]; steps before it stay valid.
pub fn apply_swaps(position: Position, amounts: &[Decimal]) -> SwapSequence {
    let mut current = position.clone();
    let mut quotes = Vec::with_capacity(amounts.len());
    let mut total_y_required = Decimal::ZERO;
    let mut failure = None;

    for (index, &x_removed) in amounts.iter().enumerate() {
        match step(&current, x_removed) {
            Ok((next, quote)) => match total_y_required.checked_add(quote.y_required) {
                Some(total) => {
                    total_y_required = total;
                    quotes.push(quote);
                    current = next;
                }
                None => {
                    let error = PositionError::Overflow("total Y required");
                    warn!(step = index, error = %error, "Swap sequence stopped");
                    failure = Some(SwapFailure { index, error });
                    break;
                }
            },
            Err(error) => {
                warn!(step = index, error = %error, "Swap sequence stopped");
                failure = Some(SwapFailure { index, error });
                break;
            }
        }
    }

    SwapSequence {
        initial_position: position,
        final_position: current,
        quotes,
        total_y_required,
        failure,
    }
}
