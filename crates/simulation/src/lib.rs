//! Position initialization and swap simulation for single-sided
//! concentrated liquidity positions.
//!
//! [`initializer`] turns an X deposit into a [`Position`](clmm_swap_domain::entities::Position);
//! [`swap_engine`] steps that position through X removals; [`scenario`]
//! wires both together with an [`event`] log.

pub mod event;
pub mod initializer;
pub mod prelude;
pub mod scenario;
pub mod swap_engine;
