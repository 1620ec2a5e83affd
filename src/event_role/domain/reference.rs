//! Message reference grammar: bare message ids and deep links.

use super::{ChannelId, GuildId, InboundMessage, MessageId, MessageReferenceError};

const CHANNELS_MARKER: &str = "/channels";
const CHANNELS_SEGMENT: &str = "/channels/";
const PRIVATE_GUILD: &str = "@me";

/// Fully resolved position of a chat message.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageLocation {
    /// Guild containing the message.
    pub guild_id: GuildId,
    /// Channel containing the message.
    pub channel_id: ChannelId,
    /// The message itself.
    pub message_id: MessageId,
}

/// A reference to an announcement message as typed by a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageReference {
    /// A bare message id, resolved against the invoking channel.
    BareId(MessageId),
    /// A deep link encoding guild, channel and message ids.
    DeepLink(MessageLocation),
}

impl MessageReference {
    /// Parses a bare id or a `https://host/channels/<guild>/<channel>/<message>` link.
    ///
    /// # Errors
    ///
    /// Returns [`MessageReferenceError::InvalidLinkFormat`] when a link does not
    /// carry exactly three segments after `/channels/`,
    /// [`MessageReferenceError::PrivateContext`] when the link targets a
    /// private conversation, and [`MessageReferenceError::MissingIdentifier`]
    /// when any identifier is empty.
    pub fn parse(raw: &str) -> Result<Self, MessageReferenceError> {
        if !raw.contains(CHANNELS_MARKER) {
            if raw.is_empty() {
                return Err(MessageReferenceError::MissingIdentifier);
            }
            return Ok(Self::BareId(MessageId::new(raw)));
        }

        let (_, descriptor) = raw
            .split_once(CHANNELS_SEGMENT)
            .ok_or(MessageReferenceError::InvalidLinkFormat)?;
        let segments: Vec<&str> = descriptor.split('/').collect();
        let [guild, channel, message] = segments.as_slice() else {
            return Err(MessageReferenceError::InvalidLinkFormat);
        };

        if guild.eq_ignore_ascii_case(PRIVATE_GUILD) {
            return Err(MessageReferenceError::PrivateContext);
        }
        if guild.is_empty() || channel.is_empty() || message.is_empty() {
            return Err(MessageReferenceError::MissingIdentifier);
        }

        Ok(Self::DeepLink(MessageLocation {
            guild_id: GuildId::new(*guild),
            channel_id: ChannelId::new(*channel),
            message_id: MessageId::new(*message),
        }))
    }

    /// Returns the referenced message id.
    #[must_use]
    pub const fn message_id(&self) -> &MessageId {
        match self {
            Self::BareId(id) => id,
            Self::DeepLink(location) => &location.message_id,
        }
    }

    /// Resolves the reference against the message that invoked the command.
    ///
    /// # Errors
    ///
    /// Returns [`MessageReferenceError::BareIdOutsideGuild`] when a bare id is
    /// used from a private conversation.
    pub fn locate(
        &self,
        invocation: &InboundMessage,
    ) -> Result<MessageLocation, MessageReferenceError> {
        match self {
            Self::DeepLink(location) => Ok(location.clone()),
            Self::BareId(message_id) => {
                let guild_id = invocation
                    .guild_id
                    .clone()
                    .ok_or(MessageReferenceError::BareIdOutsideGuild)?;
                Ok(MessageLocation {
                    guild_id,
                    channel_id: invocation.channel_id.clone(),
                    message_id: message_id.clone(),
                })
            }
        }
    }
}
