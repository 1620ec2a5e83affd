//! Application services for event-role commands and reactions.

mod bot;
mod cache;
mod confirmation;
mod create;
mod delete;
mod dispatcher;
mod error;
mod lookup;
mod participants;
mod reactions;
pub mod replies;

pub use bot::{EventRoleBot, MessageOutcome};
pub use cache::{BindingCache, BindingKey, CacheRefreshPolicy, CacheSnapshot};
pub use confirmation::{ConfirmationOutcome, ConfirmationTimers};
pub use create::{CreateHandler, CreatedBinding, PostedConfirmation};
pub use delete::DeleteHandler;
pub use dispatcher::{CommandDispatcher, DispatchOutcome};
pub use error::{CommandStep, EventRoleCommandError};
pub use participants::{ParticipantList, ParticipantsHandler};
pub use reactions::{ReactionOutcome, ReactionRouter};
