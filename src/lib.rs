//! Nexus bot: event roles for chat communities.
//!
//! Organisers bind a freshly created guild role to an event announcement.
//! Members opt in by reacting to the announcement and are granted the role,
//! which then serves as a mention target and a participant list.
//!
//! # Architecture
//!
//! The bot follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, chat platform)
//!
//! # Modules
//!
//! - [`event_role`]: Bindings, the `event-role` command, and reaction routing
//! - [`config`]: TOML configuration
//! - [`telemetry`]: Log subscriber setup

pub mod config;
pub mod event_role;
pub mod telemetry;
