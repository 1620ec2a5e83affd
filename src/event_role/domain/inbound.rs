//! Inbound chat platform events consumed by the bot.

use super::{ChannelId, GuildId, MessageId, UserId};

/// Author of an inbound chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageAuthor {
    /// Platform user identifier.
    pub id: UserId,
    /// Name shown in the guild, used in audit reasons.
    pub display_name: String,
    /// Whether the author is an automated account.
    pub bot: bool,
}

impl MessageAuthor {
    /// Creates a human author.
    #[must_use]
    pub fn new(id: impl Into<UserId>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            bot: false,
        }
    }
}

/// A chat message delivered to the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// Message identifier.
    pub id: MessageId,
    /// Channel the message was posted in.
    pub channel_id: ChannelId,
    /// Guild the channel belongs to, or `None` for private conversations.
    pub guild_id: Option<GuildId>,
    /// Message author.
    pub author: MessageAuthor,
    /// Raw message text.
    pub content: String,
}

/// Whether a reaction was added or removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionKind {
    /// A user added the reaction.
    Added,
    /// A user removed the reaction.
    Removed,
}

/// A reaction lifecycle event delivered to the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionEvent {
    /// Added or removed.
    pub kind: ReactionKind,
    /// Channel of the reacted message.
    pub channel_id: ChannelId,
    /// Reacted message.
    pub message_id: MessageId,
    /// User who reacted.
    pub user_id: UserId,
    /// Emoji name.
    pub emoji: String,
}
