//! Events recorded while replaying a swap scenario.
//!
//! This module defines the event types emitted along a position's
//! trajectory: opening, each applied swap, and the rejection that ends a
//! sequence early.

use clmm_swap_domain::entities::SwapQuote;
use clmm_swap_domain::value_objects::PriceRange;
use rust_decimal::Decimal;
use serde::Serialize;

/// Types of events that can occur during a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SimulationEventType {
    /// Position was opened.
    PositionOpened,
    /// X was removed from the position.
    Swap,
    /// A swap request was rejected.
    SwapRejected,
}

/// A scenario event with full context.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationEvent {
    /// Step number when event occurred. Opening is step 0, the n-th swap
    /// request is step n.
    pub step: u64,
    /// Type of event.
    pub event_type: SimulationEventType,
    /// Sqrt price after the event.
    pub sqrt_price: Decimal,
    /// Additional event-specific data.
    pub data: EventData,
}

/// Event-specific data payload.
#[derive(Debug, Clone, Serialize)]
pub enum EventData {
    /// Position opened data.
    PositionOpened {
        /// X deposited.
        amount_x: Decimal,
        /// Liquidity derived from the deposit.
        liquidity: Decimal,
        /// Position range.
        range: PriceRange,
    },
    /// Swap event data.
    Swap {
        /// X removed.
        x_removed: Decimal,
        /// Y paid in.
        y_required: Decimal,
        /// Relative price move of the step, `None` when not representable.
        price_impact: Option<Decimal>,
    },
    /// Rejected swap data.
    SwapRejected {
        /// X requested.
        requested: Decimal,
        /// Rejection reason.
        reason: String,
    },
}

impl SimulationEvent {
    /// Creates a new position opened event.
    #[must_use]
    pub fn position_opened(
        sqrt_price: Decimal,
        amount_x: Decimal,
        liquidity: Decimal,
        range: PriceRange,
    ) -> Self {
        Self {
            step: 0,
            event_type: SimulationEventType::PositionOpened,
            sqrt_price,
            data: EventData::PositionOpened {
                amount_x,
                liquidity,
                range,
            },
        }
    }

    /// Creates a swap event from its quote.
    #[must_use]
    pub fn swap(step: u64, quote: &SwapQuote) -> Self {
        Self {
            step,
            event_type: SimulationEventType::Swap,
            sqrt_price: quote.sqrt_price_after,
            data: EventData::Swap {
                x_removed: quote.x_removed,
                y_required: quote.y_required,
                price_impact: quote.price_impact().ok(),
            },
        }
    }

    /// Creates a rejected swap event. The price is the unchanged price of
    /// the position the request was tried against.
    #[must_use]
    pub fn swap_rejected(step: u64, sqrt_price: Decimal, requested: Decimal, reason: String) -> Self {
        Self {
            step,
            event_type: SimulationEventType::SwapRejected,
            sqrt_price,
            data: EventData::SwapRejected { requested, reason },
        }
    }
}

/// Event log for collecting all events of a scenario.
#[derive(Debug, Default, Clone, Serialize)]
pub struct EventLog {
    events: Vec<SimulationEvent>,
}

impl EventLog {
    /// Creates a new empty event log.
    #[must_use]
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Records an event.
    pub fn record(&mut self, event: SimulationEvent) {
        self.events.push(event);
    }

    /// Returns all events.
    #[must_use]
    pub fn events(&self) -> &[SimulationEvent] {
        &self.events
    }

    /// Returns events of a specific type.
    #[must_use]
    pub fn events_of_type(&self, event_type: SimulationEventType) -> Vec<&SimulationEvent> {
        self.events
            .iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Returns the count of events by type.
    #[must_use]
    pub fn count_by_type(&self, event_type: SimulationEventType) -> usize {
        self.events
            .iter()
            .filter(|e| e.event_type == event_type)
            .count()
    }

    /// Returns the number of applied swaps.
    #[must_use]
    pub fn swap_count(&self) -> usize {
        self.count_by_type(SimulationEventType::Swap)
    }
}
