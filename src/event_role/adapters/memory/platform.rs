//! In-memory chat platform adapter.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::event_role::{
    domain::{ChannelId, GuildId, MessageId, RoleId, UserId},
    ports::{
        Channel, ChatMessage, ChatPlatform, ChatPlatformError, ChatPlatformResult, Guild,
        GuildMember, PlatformRole,
    },
};

const FIRST_GENERATED_ID: u64 = 900_000_000_000_000_000;

/// Platform operations that can be forced to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailingOperation {
    /// [`ChatPlatform::add_reaction`] for every emoji.
    AddReaction,
    /// [`ChatPlatform::create_role`].
    CreateRole,
    /// [`ChatPlatform::delete_role`].
    DeleteRole,
    /// [`ChatPlatform::role_members`].
    RoleMembers,
    /// [`ChatPlatform::grant_role`].
    GrantRole,
    /// [`ChatPlatform::revoke_role`].
    RevokeRole,
    /// [`ChatPlatform::send_message`] and [`ChatPlatform::reply`].
    SendMessage,
}

/// A message posted by the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedMessage {
    /// Generated message identifier.
    pub id: MessageId,
    /// Destination channel.
    pub channel_id: ChannelId,
    /// Message replied to, if any.
    pub reply_to: Option<MessageId>,
    /// Message text.
    pub content: String,
}

/// A privileged action recorded with its audit reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    /// Action name (`create_role`, `grant_role`, ...).
    pub action: &'static str,
    /// Audit reason supplied by the caller.
    pub reason: String,
}

/// In-memory chat platform.
///
/// Models guilds, channels, messages, reactions, roles and role holders
/// without a network connection. Intended for tests and local runs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryChatPlatform {
    state: Arc<RwLock<PlatformState>>,
}

#[derive(Debug, Default)]
struct PlatformState {
    guilds: HashMap<GuildId, Guild>,
    channels: HashMap<ChannelId, Channel>,
    messages: HashSet<(ChannelId, MessageId)>,
    reactions: Vec<(ChannelId, MessageId, String)>,
    roles: HashMap<RoleId, (GuildId, PlatformRole)>,
    members: HashMap<(GuildId, UserId), GuildMember>,
    role_holders: HashSet<(GuildId, UserId, RoleId)>,
    posted: Vec<PostedMessage>,
    deleted: Vec<MessageId>,
    audit_log: Vec<AuditEntry>,
    failing: HashSet<FailingOperation>,
    failing_emojis: HashSet<String>,
    generated_ids: u64,
}

impl PlatformState {
    fn next_id(&mut self) -> String {
        let id = FIRST_GENERATED_ID.saturating_add(self.generated_ids);
        self.generated_ids = self.generated_ids.saturating_add(1);
        id.to_string()
    }

    fn check(&self, operation: FailingOperation) -> ChatPlatformResult<()> {
        if self.failing.contains(&operation) {
            return Err(ChatPlatformError::Forbidden(format!("{operation:?}")));
        }
        Ok(())
    }

    fn post(
        &mut self,
        channel_id: &ChannelId,
        reply_to: Option<&MessageId>,
        content: &str,
    ) -> ChatPlatformResult<MessageId> {
        self.check(FailingOperation::SendMessage)?;
        if !self.channels.contains_key(channel_id) {
            return Err(ChatPlatformError::not_found("channel", channel_id));
        }
        let id = MessageId::new(self.next_id());
        self.messages.insert((channel_id.clone(), id.clone()));
        self.posted.push(PostedMessage {
            id: id.clone(),
            channel_id: channel_id.clone(),
            reply_to: reply_to.cloned(),
            content: content.to_owned(),
        });
        Ok(id)
    }
}

fn lock_error(err: impl ToString) -> ChatPlatformError {
    ChatPlatformError::request(std::io::Error::other(err.to_string()))
}

impl InMemoryChatPlatform {
    /// Creates an empty platform.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> ChatPlatformResult<RwLockReadGuard<'_, PlatformState>> {
        self.state.read().map_err(lock_error)
    }

    fn write(&self) -> ChatPlatformResult<RwLockWriteGuard<'_, PlatformState>> {
        self.state.write().map_err(lock_error)
    }

    /// Adds a guild.
    ///
    /// # Errors
    ///
    /// Returns request errors when lock acquisition fails.
    pub fn add_guild(&self, guild_id: &GuildId, name: &str) -> ChatPlatformResult<()> {
        self.write()?.guilds.insert(
            guild_id.clone(),
            Guild {
                id: guild_id.clone(),
                name: name.to_owned(),
            },
        );
        Ok(())
    }

    /// Adds a channel, inside `guild_id` or as a private conversation.
    ///
    /// # Errors
    ///
    /// Returns request errors when lock acquisition fails.
    pub fn add_channel(
        &self,
        channel_id: &ChannelId,
        guild_id: Option<&GuildId>,
    ) -> ChatPlatformResult<()> {
        self.write()?.channels.insert(
            channel_id.clone(),
            Channel {
                id: channel_id.clone(),
                guild_id: guild_id.cloned(),
            },
        );
        Ok(())
    }

    /// Adds an existing message to a channel.
    ///
    /// # Errors
    ///
    /// Returns request errors when lock acquisition fails.
    pub fn add_message(
        &self,
        channel_id: &ChannelId,
        message_id: &MessageId,
    ) -> ChatPlatformResult<()> {
        self.write()?
            .messages
            .insert((channel_id.clone(), message_id.clone()));
        Ok(())
    }

    /// Adds a guild member.
    ///
    /// # Errors
    ///
    /// Returns request errors when lock acquisition fails.
    pub fn add_member(
        &self,
        guild_id: &GuildId,
        user_id: &UserId,
        display_name: &str,
    ) -> ChatPlatformResult<()> {
        self.write()?.members.insert(
            (guild_id.clone(), user_id.clone()),
            GuildMember {
                user_id: user_id.clone(),
                display_name: display_name.to_owned(),
            },
        );
        Ok(())
    }

    /// Adds a pre-existing role.
    ///
    /// # Errors
    ///
    /// Returns request errors when lock acquisition fails.
    pub fn add_role(
        &self,
        guild_id: &GuildId,
        role_id: &RoleId,
        name: &str,
    ) -> ChatPlatformResult<()> {
        self.write()?.roles.insert(
            role_id.clone(),
            (
                guild_id.clone(),
                PlatformRole {
                    id: role_id.clone(),
                    name: name.to_owned(),
                },
            ),
        );
        Ok(())
    }

    /// Forces an operation to fail with a permission error.
    ///
    /// # Errors
    ///
    /// Returns request errors when lock acquisition fails.
    pub fn fail(&self, operation: FailingOperation) -> ChatPlatformResult<()> {
        self.write()?.failing.insert(operation);
        Ok(())
    }

    /// Forces reactions with one specific emoji to fail.
    ///
    /// # Errors
    ///
    /// Returns request errors when lock acquisition fails.
    pub fn fail_reaction(&self, emoji: &str) -> ChatPlatformResult<()> {
        self.write()?.failing_emojis.insert(emoji.to_owned());
        Ok(())
    }

    /// Returns the emojis the bot added to a message, in order.
    ///
    /// # Errors
    ///
    /// Returns request errors when lock acquisition fails.
    pub fn reactions_on(&self, message_id: &MessageId) -> ChatPlatformResult<Vec<String>> {
        Ok(self
            .read()?
            .reactions
            .iter()
            .filter(|(_, reacted, _)| reacted == message_id)
            .map(|(_, _, emoji)| emoji.clone())
            .collect())
    }

    /// Finds a role by name in a guild.
    ///
    /// # Errors
    ///
    /// Returns request errors when lock acquisition fails.
    pub fn role_named(
        &self,
        guild_id: &GuildId,
        name: &str,
    ) -> ChatPlatformResult<Option<PlatformRole>> {
        Ok(self
            .read()?
            .roles
            .values()
            .find(|(owner, role)| owner == guild_id && role.name == name)
            .map(|(_, role)| role.clone()))
    }

    /// Returns `true` when the role still exists.
    ///
    /// # Errors
    ///
    /// Returns request errors when lock acquisition fails.
    pub fn role_exists(&self, role_id: &RoleId) -> ChatPlatformResult<bool> {
        Ok(self.read()?.roles.contains_key(role_id))
    }

    /// Returns `true` when the member currently holds the role.
    ///
    /// # Errors
    ///
    /// Returns request errors when lock acquisition fails.
    pub fn has_role(
        &self,
        guild_id: &GuildId,
        user_id: &UserId,
        role_id: &RoleId,
    ) -> ChatPlatformResult<bool> {
        Ok(self
            .read()?
            .role_holders
            .contains(&(guild_id.clone(), user_id.clone(), role_id.clone())))
    }

    /// Returns every message posted by the bot, in order.
    ///
    /// # Errors
    ///
    /// Returns request errors when lock acquisition fails.
    pub fn posted_messages(&self) -> ChatPlatformResult<Vec<PostedMessage>> {
        Ok(self.read()?.posted.clone())
    }

    /// Returns identifiers of messages deleted by the bot.
    ///
    /// # Errors
    ///
    /// Returns request errors when lock acquisition fails.
    pub fn deleted_messages(&self) -> ChatPlatformResult<Vec<MessageId>> {
        Ok(self.read()?.deleted.clone())
    }

    /// Returns the audit log of privileged actions.
    ///
    /// # Errors
    ///
    /// Returns request errors when lock acquisition fails.
    pub fn audit_log(&self) -> ChatPlatformResult<Vec<AuditEntry>> {
        Ok(self.read()?.audit_log.clone())
    }
}

#[async_trait]
impl ChatPlatform for InMemoryChatPlatform {
    async fn fetch_guild(&self, guild_id: &GuildId) -> ChatPlatformResult<Option<Guild>> {
        Ok(self.read()?.guilds.get(guild_id).cloned())
    }

    async fn fetch_channel(&self, channel_id: &ChannelId) -> ChatPlatformResult<Option<Channel>> {
        Ok(self.read()?.channels.get(channel_id).cloned())
    }

    async fn fetch_message(
        &self,
        channel_id: &ChannelId,
        message_id: &MessageId,
    ) -> ChatPlatformResult<Option<ChatMessage>> {
        let state = self.read()?;
        let known = state
            .messages
            .contains(&(channel_id.clone(), message_id.clone()));
        Ok(known.then(|| ChatMessage {
            id: message_id.clone(),
            channel_id: channel_id.clone(),
        }))
    }

    async fn add_reaction(
        &self,
        channel_id: &ChannelId,
        message_id: &MessageId,
        emoji: &str,
    ) -> ChatPlatformResult<()> {
        let mut state = self.write()?;
        state.check(FailingOperation::AddReaction)?;
        if state.failing_emojis.contains(emoji) {
            return Err(ChatPlatformError::Forbidden(format!("react with {emoji}")));
        }
        if !state
            .messages
            .contains(&(channel_id.clone(), message_id.clone()))
        {
            return Err(ChatPlatformError::not_found("message", message_id));
        }
        state
            .reactions
            .push((channel_id.clone(), message_id.clone(), emoji.to_owned()));
        Ok(())
    }

    async fn create_role(
        &self,
        guild_id: &GuildId,
        name: &str,
        reason: &str,
    ) -> ChatPlatformResult<PlatformRole> {
        let mut state = self.write()?;
        state.check(FailingOperation::CreateRole)?;
        if !state.guilds.contains_key(guild_id) {
            return Err(ChatPlatformError::not_found("guild", guild_id));
        }
        let role = PlatformRole {
            id: RoleId::new(state.next_id()),
            name: name.to_owned(),
        };
        state
            .roles
            .insert(role.id.clone(), (guild_id.clone(), role.clone()));
        state.audit_log.push(AuditEntry {
            action: "create_role",
            reason: reason.to_owned(),
        });
        Ok(role)
    }

    async fn fetch_role(
        &self,
        guild_id: &GuildId,
        role_id: &RoleId,
    ) -> ChatPlatformResult<Option<PlatformRole>> {
        Ok(self
            .read()?
            .roles
            .get(role_id)
            .filter(|(owner, _)| owner == guild_id)
            .map(|(_, role)| role.clone()))
    }

    async fn delete_role(
        &self,
        guild_id: &GuildId,
        role_id: &RoleId,
        reason: &str,
    ) -> ChatPlatformResult<()> {
        let mut state = self.write()?;
        state.check(FailingOperation::DeleteRole)?;
        let owned = state
            .roles
            .get(role_id)
            .is_some_and(|(owner, _)| owner == guild_id);
        if !owned {
            return Err(ChatPlatformError::not_found("role", role_id));
        }
        state.roles.remove(role_id);
        state.role_holders.retain(|(_, _, held)| held != role_id);
        state.audit_log.push(AuditEntry {
            action: "delete_role",
            reason: reason.to_owned(),
        });
        Ok(())
    }

    async fn role_members(
        &self,
        guild_id: &GuildId,
        role_id: &RoleId,
    ) -> ChatPlatformResult<Vec<GuildMember>> {
        let state = self.read()?;
        state.check(FailingOperation::RoleMembers)?;
        let mut members: Vec<GuildMember> = state
            .role_holders
            .iter()
            .filter(|(guild, _, held)| guild == guild_id && held == role_id)
            .filter_map(|(guild, user, _)| state.members.get(&(guild.clone(), user.clone())))
            .cloned()
            .collect();
        members.sort_by(|left, right| left.display_name.cmp(&right.display_name));
        Ok(members)
    }

    async fn fetch_member(
        &self,
        guild_id: &GuildId,
        user_id: &UserId,
    ) -> ChatPlatformResult<Option<GuildMember>> {
        Ok(self
            .read()?
            .members
            .get(&(guild_id.clone(), user_id.clone()))
            .cloned())
    }

    async fn grant_role(
        &self,
        guild_id: &GuildId,
        user_id: &UserId,
        role_id: &RoleId,
        reason: &str,
    ) -> ChatPlatformResult<()> {
        let mut state = self.write()?;
        state.check(FailingOperation::GrantRole)?;
        if !state.roles.contains_key(role_id) {
            return Err(ChatPlatformError::not_found("role", role_id));
        }
        state
            .role_holders
            .insert((guild_id.clone(), user_id.clone(), role_id.clone()));
        state.audit_log.push(AuditEntry {
            action: "grant_role",
            reason: reason.to_owned(),
        });
        Ok(())
    }

    async fn revoke_role(
        &self,
        guild_id: &GuildId,
        user_id: &UserId,
        role_id: &RoleId,
        reason: &str,
    ) -> ChatPlatformResult<()> {
        let mut state = self.write()?;
        state.check(FailingOperation::RevokeRole)?;
        state
            .role_holders
            .remove(&(guild_id.clone(), user_id.clone(), role_id.clone()));
        state.audit_log.push(AuditEntry {
            action: "revoke_role",
            reason: reason.to_owned(),
        });
        Ok(())
    }

    async fn send_message(
        &self,
        channel_id: &ChannelId,
        content: &str,
    ) -> ChatPlatformResult<MessageId> {
        self.write()?.post(channel_id, None, content)
    }

    async fn reply(
        &self,
        channel_id: &ChannelId,
        message_id: &MessageId,
        content: &str,
    ) -> ChatPlatformResult<MessageId> {
        self.write()?.post(channel_id, Some(message_id), content)
    }

    async fn delete_message(
        &self,
        channel_id: &ChannelId,
        message_id: &MessageId,
    ) -> ChatPlatformResult<()> {
        let mut state = self.write()?;
        if !state
            .messages
            .remove(&(channel_id.clone(), message_id.clone()))
        {
            return Err(ChatPlatformError::not_found("message", message_id));
        }
        state.deleted.push(message_id.clone());
        Ok(())
    }
}
