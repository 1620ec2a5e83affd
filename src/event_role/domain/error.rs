//! Error types for event-role command parsing.

use super::Subcommand;
use thiserror::Error;

/// Errors returned while parsing a message reference.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum MessageReferenceError {
    /// A deep link did not split into `guild/channel/message`.
    #[error("message link must have the form <prefix>/channels/<guild>/<channel>/<message>")]
    InvalidLinkFormat,

    /// The reference points at a private conversation rather than a guild.
    #[error("message reference points at a private conversation")]
    PrivateContext,

    /// A bare message identifier was used outside a guild channel.
    #[error("a bare message id is only valid inside the announcement's guild channel")]
    BareIdOutsideGuild,

    /// The guild, channel, or message identifier is empty.
    #[error("message reference is missing an identifier")]
    MissingIdentifier,
}

/// Errors returned while parsing an `event-role` command line.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandParseError {
    /// A quoted argument was never closed.
    #[error("unterminated quoted argument in '{subcommand}' command")]
    UnterminatedQuote {
        /// Subcommand being parsed.
        subcommand: Subcommand,
    },

    /// `create` was invoked without a message reference.
    #[error("missing event message reference")]
    MissingMessageReference,

    /// `create` was invoked without a role name.
    #[error("missing role name")]
    MissingRoleName,

    /// The argument count does not match the subcommand's usage.
    #[error("unexpected arguments for '{subcommand}' command")]
    Usage {
        /// Subcommand being parsed.
        subcommand: Subcommand,
    },

    /// A role mention did not match `<@&digits>`.
    #[error("invalid role mention '{0}'")]
    InvalidRoleMention(String),

    /// The message reference could not be parsed.
    #[error("invalid message reference in '{subcommand}' command: {source}")]
    Reference {
        /// Subcommand being parsed.
        subcommand: Subcommand,
        /// Underlying reference error.
        #[source]
        source: MessageReferenceError,
    },
}

impl CommandParseError {
    /// Returns the subcommand the error was raised for, when it is known.
    ///
    /// A malformed role mention can come from `delete` or `participants`, so
    /// it carries none.
    #[must_use]
    pub const fn subcommand(&self) -> Option<Subcommand> {
        match self {
            Self::UnterminatedQuote { subcommand }
            | Self::Usage { subcommand }
            | Self::Reference { subcommand, .. } => Some(*subcommand),
            Self::MissingMessageReference | Self::MissingRoleName => Some(Subcommand::Create),
            Self::InvalidRoleMention(_) => None,
        }
    }
}
