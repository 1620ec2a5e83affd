//! Port contracts for event-role bindings.
//!
//! Ports define infrastructure-agnostic interfaces used by the event-role
//! services: persistence of bindings and the chat platform client.

pub mod platform;
pub mod repository;

pub use platform::{
    Channel, ChatMessage, ChatPlatform, ChatPlatformError, ChatPlatformResult, Guild, GuildMember,
    PlatformRole,
};
pub use repository::{BindingRepository, BindingRepositoryError, BindingRepositoryResult};

#[cfg(test)]
pub use platform::MockChatPlatform;
#[cfg(test)]
pub use repository::MockBindingRepository;
