//! In-memory adapters for event-role persistence and the chat platform.

mod binding_store;
mod platform;

pub use binding_store::InMemoryBindingRepository;
pub use platform::{AuditEntry, FailingOperation, InMemoryChatPlatform, PostedMessage};
