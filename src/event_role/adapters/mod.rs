//! Adapter implementations for event-role ports.

pub mod memory;
pub mod postgres;
