//! Event binding aggregate: one announcement message bound to one role.

use super::{BindingId, ChannelId, GuildId, MessageId, MessageLocation, RoleId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Association between an announcement message and the role granted to its
/// participants.
///
/// The message and role identifiers never change after creation. A binding
/// is only ever destroyed by explicit deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventBinding {
    id: BindingId,
    guild_id: GuildId,
    channel_id: ChannelId,
    message_id: MessageId,
    role_id: RoleId,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedBindingData {
    /// Persisted binding identifier.
    pub id: BindingId,
    /// Guild of the announcement.
    pub guild_id: GuildId,
    /// Channel of the announcement.
    pub channel_id: ChannelId,
    /// Announcement message.
    pub message_id: MessageId,
    /// Bound role.
    pub role_id: RoleId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl EventBinding {
    /// Creates a binding for an announcement located at `location`.
    #[must_use]
    pub fn new(location: MessageLocation, role_id: RoleId, clock: &impl Clock) -> Self {
        let MessageLocation {
            guild_id,
            channel_id,
            message_id,
        } = location;
        Self {
            id: BindingId::new(),
            guild_id,
            channel_id,
            message_id,
            role_id,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a binding from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedBindingData) -> Self {
        Self {
            id: data.id,
            guild_id: data.guild_id,
            channel_id: data.channel_id,
            message_id: data.message_id,
            role_id: data.role_id,
            created_at: data.created_at,
        }
    }

    /// Returns the binding identifier.
    #[must_use]
    pub const fn id(&self) -> BindingId {
        self.id
    }

    /// Returns the guild of the announcement.
    #[must_use]
    pub const fn guild_id(&self) -> &GuildId {
        &self.guild_id
    }

    /// Returns the channel of the announcement.
    #[must_use]
    pub const fn channel_id(&self) -> &ChannelId {
        &self.channel_id
    }

    /// Returns the announcement message.
    #[must_use]
    pub const fn message_id(&self) -> &MessageId {
        &self.message_id
    }

    /// Returns the bound role.
    #[must_use]
    pub const fn role_id(&self) -> &RoleId {
        &self.role_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
