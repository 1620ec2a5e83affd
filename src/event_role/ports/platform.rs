//! Chat platform port.
//!
//! The bot never talks to a chat network directly. Everything it needs from
//! the platform (resolving guilds, channels, messages and members, reacting,
//! managing roles, posting replies) goes through [`ChatPlatform`].

use crate::event_role::domain::{ChannelId, GuildId, MessageId, RoleId, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for chat platform operations.
pub type ChatPlatformResult<T> = Result<T, ChatPlatformError>;

/// A guild visible to the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guild {
    /// Guild identifier.
    pub id: GuildId,
    /// Guild name.
    pub name: String,
}

/// A channel visible to the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    /// Channel identifier.
    pub id: ChannelId,
    /// Owning guild, `None` for private conversations.
    pub guild_id: Option<GuildId>,
}

/// A message the bot could read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Message identifier.
    pub id: MessageId,
    /// Channel containing the message.
    pub channel_id: ChannelId,
}

/// A guild role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformRole {
    /// Role identifier.
    pub id: RoleId,
    /// Role name.
    pub name: String,
}

impl PlatformRole {
    /// Returns the mention markup for this role.
    #[must_use]
    pub fn mention(&self) -> String {
        format!("<@&{}>", self.id)
    }
}

/// A member of a guild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildMember {
    /// Underlying user.
    pub user_id: UserId,
    /// Name shown in the guild.
    pub display_name: String,
}

/// Client contract for the chat platform.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Resolves a guild. `Ok(None)` means the bot is not a member.
    async fn fetch_guild(&self, guild_id: &GuildId) -> ChatPlatformResult<Option<Guild>>;

    /// Resolves a channel. `Ok(None)` means it is absent or unreadable.
    async fn fetch_channel(&self, channel_id: &ChannelId) -> ChatPlatformResult<Option<Channel>>;

    /// Resolves a message inside a channel.
    async fn fetch_message(
        &self,
        channel_id: &ChannelId,
        message_id: &MessageId,
    ) -> ChatPlatformResult<Option<ChatMessage>>;

    /// Adds a reaction from the bot to a message.
    async fn add_reaction(
        &self,
        channel_id: &ChannelId,
        message_id: &MessageId,
        emoji: &str,
    ) -> ChatPlatformResult<()>;

    /// Creates a role in a guild.
    async fn create_role(
        &self,
        guild_id: &GuildId,
        name: &str,
        reason: &str,
    ) -> ChatPlatformResult<PlatformRole>;

    /// Resolves a role in a guild.
    async fn fetch_role(
        &self,
        guild_id: &GuildId,
        role_id: &RoleId,
    ) -> ChatPlatformResult<Option<PlatformRole>>;

    /// Deletes a role. Deleting a role that no longer exists is an error.
    async fn delete_role(
        &self,
        guild_id: &GuildId,
        role_id: &RoleId,
        reason: &str,
    ) -> ChatPlatformResult<()>;

    /// Lists the members currently holding a role.
    async fn role_members(
        &self,
        guild_id: &GuildId,
        role_id: &RoleId,
    ) -> ChatPlatformResult<Vec<GuildMember>>;

    /// Resolves a guild member.
    async fn fetch_member(
        &self,
        guild_id: &GuildId,
        user_id: &UserId,
    ) -> ChatPlatformResult<Option<GuildMember>>;

    /// Grants a role to a member, recording an audit reason.
    async fn grant_role(
        &self,
        guild_id: &GuildId,
        user_id: &UserId,
        role_id: &RoleId,
        reason: &str,
    ) -> ChatPlatformResult<()>;

    /// Revokes a role from a member, recording an audit reason.
    async fn revoke_role(
        &self,
        guild_id: &GuildId,
        user_id: &UserId,
        role_id: &RoleId,
        reason: &str,
    ) -> ChatPlatformResult<()>;

    /// Posts a message to a channel and returns its identifier.
    async fn send_message(
        &self,
        channel_id: &ChannelId,
        content: &str,
    ) -> ChatPlatformResult<MessageId>;

    /// Posts a reply to an existing message and returns its identifier.
    async fn reply(
        &self,
        channel_id: &ChannelId,
        message_id: &MessageId,
        content: &str,
    ) -> ChatPlatformResult<MessageId>;

    /// Deletes a message.
    async fn delete_message(
        &self,
        channel_id: &ChannelId,
        message_id: &MessageId,
    ) -> ChatPlatformResult<()>;
}

/// Errors returned by chat platform adapters.
#[derive(Debug, Clone, Error)]
pub enum ChatPlatformError {
    /// The target entity does not exist.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Kind of entity (`guild`, `role`, ...).
        entity: &'static str,
        /// Identifier that was looked up.
        id: String,
    },

    /// The bot lacks permission for the operation.
    #[error("missing permission: {0}")]
    Forbidden(String),

    /// Transport or API failure.
    #[error("chat platform request failed: {0}")]
    Request(Arc<dyn std::error::Error + Send + Sync>),
}

impl ChatPlatformError {
    /// Builds a not-found error.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Wraps a transport or API error.
    pub fn request(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Request(Arc::new(err))
    }
}
