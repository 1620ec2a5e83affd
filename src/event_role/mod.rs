//! Event roles: bind a guild role to an event announcement.
//!
//! Members who react to a bound announcement with the attending marker are
//! granted the bound role, and lose it when they remove the reaction. The
//! bindings are managed through the `event-role` chat command. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
