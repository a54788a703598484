//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use clmm_swap_simulation::prelude::*;
//! ```

// Events
pub use crate::event::{EventData, EventLog, SimulationEvent, SimulationEventType};

// Initialization
pub use crate::initializer::{initialize, initialize_at_lower};

// Scenarios
pub use crate::scenario::{ScenarioConfig, ScenarioResult, simulate_scenario};

// Swaps
pub use crate::swap_engine::{SequenceError, SwapFailure, SwapSequence, apply_swap, apply_swaps};

// Domain
pub use clmm_swap_domain::entities::{Position, SwapQuote};
pub use clmm_swap_domain::error::{PositionError, PositionResult};
pub use clmm_swap_domain::value_objects::{Price, PriceRange};
