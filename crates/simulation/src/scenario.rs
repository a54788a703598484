//! High-level scenario runner.
//!
//! A scenario opens a position from a deposit and replays an ordered list of
//! swap requests against it, collecting the resulting sequence and an event
//! log in one call.

use crate::event::{EventLog, SimulationEvent};
use crate::initializer::initialize;
use crate::swap_engine::{SwapSequence, apply_swaps};
use clmm_swap_domain::error::PositionResult;
use clmm_swap_domain::value_objects::{Price, PriceRange};
use rust_decimal::Decimal;
use serde::Serialize;

/// Inputs of a scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioConfig {
    /// Position range.
    pub range: PriceRange,
    /// Starting sqrt price. `None` opens at the lower bound.
    pub start_sqrt_price: Option<Decimal>,
    /// X deposited.
    pub amount_x: Decimal,
    /// Ordered X removals.
    pub swaps: Vec<Decimal>,
}

impl ScenarioConfig {
    /// Creates a scenario opening at the lower bound with no swaps.
    #[must_use]
    pub fn new(range: PriceRange, amount_x: Decimal) -> Self {
        Self {
            range,
            start_sqrt_price: None,
            amount_x,
            swaps: Vec::new(),
        }
    }

    /// Sets the starting sqrt price.
    #[must_use]
    pub fn with_start_sqrt_price(mut self, sqrt_price: Decimal) -> Self {
        self.start_sqrt_price = Some(sqrt_price);
        self
    }

    /// Sets the starting price.
    pub fn with_start_price(self, price: Price) -> PositionResult<Self> {
        let sqrt_price = price.sqrt()?;
        Ok(self.with_start_sqrt_price(sqrt_price))
    }

    /// Replaces the swap list.
    #[must_use]
    pub fn with_swaps(mut self, swaps: Vec<Decimal>) -> Self {
        self.swaps = swaps;
        self
    }

    /// Appends one swap request.
    #[must_use]
    pub fn with_swap(mut self, x_removed: Decimal) -> Self {
        self.swaps.push(x_removed);
        self
    }
}

/// Result of a scenario run.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    /// X deposited at opening.
    pub amount_x: Decimal,
    /// Swap sequence, including any early stop.
    pub sequence: SwapSequence,
    /// Events in the order they happened.
    pub events: EventLog,
}

/// Runs a scenario.
///
/// # Errors
///
/// Fails only if the position cannot be opened. A rejected swap request does
/// not fail the run; it is reported in the returned sequence and event log.
pub fn simulate_scenario(config: &ScenarioConfig) -> PositionResult<ScenarioResult> {
    let start = match config.start_sqrt_price {
        Some(sqrt_price) => sqrt_price,
        None => config.range.sqrt_lower()?,
    };
    let position = initialize(config.range.clone(), start, config.amount_x)?;

    let mut events = EventLog::new();
    events.record(SimulationEvent::position_opened(
        position.sqrt_price(),
        config.amount_x,
        position.liquidity(),
        config.range.clone(),
    ));

    let sequence = apply_swaps(position, &config.swaps);

    for (i, quote) in sequence.quotes.iter().enumerate() {
        events.record(SimulationEvent::swap(i as u64 + 1, quote));
    }
    if let Some(failure) = &sequence.failure {
        let requested = config.swaps[failure.index];
        events.record(SimulationEvent::swap_rejected(
            failure.index as u64 + 1,
            sequence.final_position.sqrt_price(),
            requested,
            failure.error.to_string(),
        ));
    }

    Ok(ScenarioResult {
        amount_x: config.amount_x,
        sequence,
        events,
    })
}
