//! Service-level errors for `event-role` commands.

use super::replies;
use crate::event_role::{
    domain::{
        ChannelId, CommandParseError, GuildId, MessageId, MessageReferenceError, RoleId,
        Subcommand,
    },
    ports::{BindingRepositoryError, ChatPlatformError},
};
use std::fmt;
use thiserror::Error;

/// Named steps of the command flows, used in logs and platform errors.
///
/// The create flow runs the steps from [`CommandStep::ResolveGuild`] to
/// [`CommandStep::PostConfirmation`] in order. A failing step stops the flow
/// and leaves the effects of earlier steps in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandStep {
    /// Resolve the announcement's guild.
    ResolveGuild,
    /// Resolve the announcement's channel.
    ResolveChannel,
    /// Resolve the announcement message.
    ResolveMessage,
    /// Attach the three status reactions.
    AttachReactions,
    /// Create the event role.
    CreateRole,
    /// Persist the binding.
    PersistBinding,
    /// Post the confirmation notice.
    PostConfirmation,
    /// Resolve the bound role.
    FetchRole,
    /// Delete the bound role.
    DeleteRole,
    /// List holders of the bound role.
    ListParticipants,
    /// Post a reply to the invoking message.
    Reply,
}

impl CommandStep {
    /// Returns the step name used in structured logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ResolveGuild => "resolve_guild",
            Self::ResolveChannel => "resolve_channel",
            Self::ResolveMessage => "resolve_message",
            Self::AttachReactions => "attach_reactions",
            Self::CreateRole => "create_role",
            Self::PersistBinding => "persist_binding",
            Self::PostConfirmation => "post_confirmation",
            Self::FetchRole => "fetch_role",
            Self::DeleteRole => "delete_role",
            Self::ListParticipants => "list_participants",
            Self::Reply => "reply",
        }
    }
}

impl fmt::Display for CommandStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that end an `event-role` command invocation.
///
/// Every variant maps to a distinct reply through
/// [`EventRoleCommandError::user_message`].
#[derive(Debug, Error)]
pub enum EventRoleCommandError {
    /// Arguments were malformed.
    #[error(transparent)]
    Parse(#[from] CommandParseError),

    /// The announcement already has a binding.
    #[error("message {0} is already bound to an event role")]
    AlreadyBound(MessageId),

    /// The announcement's guild could not be resolved.
    #[error("guild {0} is unavailable")]
    GuildUnavailable(GuildId),

    /// The announcement's channel could not be resolved.
    #[error("channel {0} is unavailable")]
    ChannelUnavailable(ChannelId),

    /// The announcement message could not be resolved.
    #[error("message {0} is unavailable")]
    MessageUnavailable(MessageId),

    /// No binding exists for the role.
    #[error("role {0} is not bound to an event")]
    RoleNotBound(RoleId),

    /// No binding exists for the message.
    #[error("message {0} is not bound to an event")]
    MessageNotBound(MessageId),

    /// The binding's role no longer exists on the platform.
    #[error("bound role {0} no longer exists")]
    BoundRoleMissing(RoleId),

    /// A platform call failed.
    #[error("{step} failed: {source}")]
    Platform {
        /// Step that failed.
        step: CommandStep,
        /// Platform error.
        #[source]
        source: ChatPlatformError,
    },

    /// The binding repository failed.
    #[error(transparent)]
    Repository(#[from] BindingRepositoryError),

    /// A reply template failed to render.
    #[error(transparent)]
    Render(#[from] replies::ReplyRenderError),
}

impl EventRoleCommandError {
    /// Wraps a platform error raised at `step`.
    #[must_use]
    pub const fn platform(step: CommandStep, source: ChatPlatformError) -> Self {
        Self::Platform { step, source }
    }

    /// Returns `true` for failures of the bot or its collaborators rather
    /// than of the user's input.
    #[must_use]
    pub const fn is_operational(&self) -> bool {
        matches!(
            self,
            Self::Platform { .. } | Self::Repository(_) | Self::Render(_)
        )
    }

    /// Returns the reply shown to the invoking user.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Parse(error) => parse_message(error),
            Self::AlreadyBound(_) => replies::ALREADY_BOUND,
            Self::GuildUnavailable(_) => replies::GUILD_UNAVAILABLE,
            Self::ChannelUnavailable(_) => replies::CHANNEL_UNAVAILABLE,
            Self::MessageUnavailable(_) => replies::MESSAGE_UNAVAILABLE,
            Self::RoleNotBound(_) => replies::ROLE_NOT_BOUND,
            Self::MessageNotBound(_) => replies::MESSAGE_NOT_BOUND,
            Self::BoundRoleMissing(_) => replies::BOUND_ROLE_MISSING,
            Self::Platform { step, .. } => match step {
                CommandStep::ResolveGuild => replies::GUILD_UNAVAILABLE,
                CommandStep::ResolveChannel => replies::CHANNEL_UNAVAILABLE,
                CommandStep::ResolveMessage => replies::MESSAGE_UNAVAILABLE,
                CommandStep::AttachReactions => replies::REACTIONS_FAILED,
                CommandStep::CreateRole => replies::ROLE_CREATION_FAILED,
                CommandStep::DeleteRole => replies::ROLE_DELETION_FAILED,
                CommandStep::ListParticipants => replies::PARTICIPANTS_FAILED,
                CommandStep::PersistBinding
                | CommandStep::PostConfirmation
                | CommandStep::FetchRole
                | CommandStep::Reply => replies::PLATFORM_FAILED,
            },
            Self::Repository(_) => replies::STORE_FAILED,
            Self::Render(_) => replies::PLATFORM_FAILED,
        }
    }
}

const fn parse_message(error: &CommandParseError) -> &'static str {
    match error {
        CommandParseError::UnterminatedQuote { .. } => replies::UNTERMINATED_QUOTE,
        CommandParseError::MissingMessageReference => replies::MISSING_MESSAGE_REFERENCE,
        CommandParseError::MissingRoleName => replies::MISSING_ROLE_NAME,
        CommandParseError::Usage { subcommand } => match subcommand {
            Subcommand::Create => replies::CREATE_USAGE,
            Subcommand::Delete => replies::DELETE_USAGE,
            Subcommand::Participants => replies::PARTICIPANTS_USAGE,
        },
        CommandParseError::InvalidRoleMention(_) => replies::INVALID_ROLE_MENTION,
        CommandParseError::Reference { subcommand, source } => {
            reference_message(*subcommand, *source)
        }
    }
}

/// Reference errors read differently depending on the subcommand: `create`
/// needs a full location, the others only need the message id.
pub(crate) const fn reference_message(
    subcommand: Subcommand,
    error: MessageReferenceError,
) -> &'static str {
    match (subcommand, error) {
        (_, MessageReferenceError::InvalidLinkFormat) => replies::LINK_FORMAT,
        (_, MessageReferenceError::PrivateContext)
        | (Subcommand::Create, MessageReferenceError::BareIdOutsideGuild) => {
            replies::PRIVATE_CONTEXT
        }
        (_, MessageReferenceError::BareIdOutsideGuild) => replies::BARE_ID_OUTSIDE_GUILD,
        (Subcommand::Create, MessageReferenceError::MissingIdentifier) => {
            replies::UNRESOLVED_MESSAGE
        }
        (_, MessageReferenceError::MissingIdentifier) => replies::MISSING_MESSAGE_ID,
    }
}
