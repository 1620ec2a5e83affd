//! Domain model for event-role bindings.
//!
//! The domain covers bindings between announcement messages and guild roles,
//! the typed `event-role` command grammar, and the inbound events the bot
//! reacts to. Nothing here performs I/O.

mod binding;
mod command;
mod emoji;
mod error;
mod ids;
mod inbound;
mod reference;

pub use binding::{EventBinding, PersistedBindingData};
pub use command::{BindingTarget, EventRoleCommand, Subcommand};
pub use emoji::{DISMISS_EMOJI, StatusEmoji};
pub use error::{CommandParseError, MessageReferenceError};
pub use ids::{BindingId, ChannelId, GuildId, MessageId, RoleId, UserId};
pub use inbound::{InboundMessage, MessageAuthor, ReactionEvent, ReactionKind};
pub use reference::{MessageLocation, MessageReference};
