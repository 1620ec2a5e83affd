//! Typed grammar for `event-role` commands.

use super::{CommandParseError, MessageReference, RoleId};
use std::fmt;

const ROLE_MENTION_MARKER: &str = "@&";

/// Recognised `event-role` subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subcommand {
    /// Bind a new role to an announcement.
    Create,
    /// Remove a binding and its role.
    Delete,
    /// List the holders of a bound role.
    Participants,
}

impl Subcommand {
    /// Returns the keyword users type for this subcommand.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Delete => "delete",
            Self::Participants => "participants",
        }
    }

    fn from_keyword(keyword: &str) -> Option<Self> {
        [Self::Create, Self::Delete, Self::Participants]
            .into_iter()
            .find(|candidate| keyword.eq_ignore_ascii_case(candidate.as_str()))
    }
}

impl fmt::Display for Subcommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a `delete` or `participants` command points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingTarget {
    /// A role mention, `<@&id>`.
    Role(RoleId),
    /// An announcement message reference.
    Message(MessageReference),
}

impl BindingTarget {
    fn parse(subcommand: Subcommand, token: &str) -> Result<Self, CommandParseError> {
        if token.contains(ROLE_MENTION_MARKER) {
            return parse_role_mention(token).map(Self::Role);
        }
        MessageReference::parse(token)
            .map(Self::Message)
            .map_err(|source| CommandParseError::Reference { subcommand, source })
    }
}

/// A parsed `event-role` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventRoleCommand {
    /// `create <role> <message>`.
    Create {
        /// Name of the role to create.
        role_name: String,
        /// Announcement to bind.
        reference: MessageReference,
    },
    /// `delete <role|message>`.
    Delete {
        /// Binding to remove.
        target: BindingTarget,
    },
    /// `participants <role|message>`.
    Participants {
        /// Binding to inspect.
        target: BindingTarget,
    },
    /// Any other keyword; handled as a silent no-op.
    Unknown(String),
}

impl EventRoleCommand {
    /// Parses the text following the `event-role` keyword.
    ///
    /// The first whitespace-delimited word selects the subcommand
    /// case-insensitively. The remainder is tokenised on whitespace, with
    /// single or double quotes grouping words into one argument.
    ///
    /// # Errors
    ///
    /// Returns [`CommandParseError`] when a recognised subcommand's arguments
    /// are malformed. Unrecognised keywords are not errors; they produce
    /// [`EventRoleCommand::Unknown`].
    pub fn parse(input: &str) -> Result<Self, CommandParseError> {
        let trimmed = input.trim();
        let (keyword, remainder) = trimmed
            .split_once(char::is_whitespace)
            .unwrap_or((trimmed, ""));

        let Some(subcommand) = Subcommand::from_keyword(keyword) else {
            return Ok(Self::Unknown(keyword.to_owned()));
        };

        let arguments = tokenize(remainder)
            .ok_or(CommandParseError::UnterminatedQuote { subcommand })?;

        match subcommand {
            Subcommand::Create => parse_create(&arguments),
            Subcommand::Delete => {
                single_argument(subcommand, &arguments).map(|target| Self::Delete { target })
            }
            Subcommand::Participants => single_argument(subcommand, &arguments)
                .map(|target| Self::Participants { target }),
        }
    }

    /// Returns the subcommand, or `None` for unknown keywords.
    #[must_use]
    pub const fn subcommand(&self) -> Option<Subcommand> {
        match self {
            Self::Create { .. } => Some(Subcommand::Create),
            Self::Delete { .. } => Some(Subcommand::Delete),
            Self::Participants { .. } => Some(Subcommand::Participants),
            Self::Unknown(_) => None,
        }
    }
}

fn parse_create(arguments: &[String]) -> Result<EventRoleCommand, CommandParseError> {
    let (role_name, raw_reference) = match arguments {
        [] | [_] => return Err(CommandParseError::MissingMessageReference),
        [role_name, raw_reference] => (role_name, raw_reference),
        _ => {
            return Err(CommandParseError::Usage {
                subcommand: Subcommand::Create,
            });
        }
    };

    if raw_reference.is_empty() {
        return Err(CommandParseError::MissingMessageReference);
    }
    if role_name.trim().is_empty() {
        return Err(CommandParseError::MissingRoleName);
    }

    let reference =
        MessageReference::parse(raw_reference).map_err(|source| CommandParseError::Reference {
            subcommand: Subcommand::Create,
            source,
        })?;

    Ok(EventRoleCommand::Create {
        role_name: role_name.trim().to_owned(),
        reference,
    })
}

fn single_argument(
    subcommand: Subcommand,
    arguments: &[String],
) -> Result<BindingTarget, CommandParseError> {
    let [token] = arguments else {
        return Err(CommandParseError::Usage { subcommand });
    };
    BindingTarget::parse(subcommand, token)
}

fn parse_role_mention(token: &str) -> Result<RoleId, CommandParseError> {
    token
        .strip_prefix("<@&")
        .and_then(|rest| rest.strip_suffix('>'))
        .filter(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
        .map(RoleId::new)
        .ok_or_else(|| CommandParseError::InvalidRoleMention(token.to_owned()))
}

/// Splits on whitespace, grouping quoted runs. Returns `None` when a quote is
/// left open.
fn tokenize(input: &str) -> Option<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes: Option<char> = None;
    let mut quoted = false;
    let mut escaped = false;

    for character in input.chars() {
        if let Some(quote_char) = in_quotes {
            if escaped {
                current.push(character);
                escaped = false;
                continue;
            }

            match character {
                '\\' => escaped = true,
                _ if character == quote_char => in_quotes = None,
                _ => current.push(character),
            }
            continue;
        }

        match character {
            '"' | '\'' => {
                in_quotes = Some(character);
                quoted = true;
            }
            _ if character.is_whitespace() => {
                if !current.is_empty() || quoted {
                    tokens.push(std::mem::take(&mut current));
                    quoted = false;
                }
            }
            _ => current.push(character),
        }
    }

    if in_quotes.is_some() || escaped {
        return None;
    }
    if !current.is_empty() || quoted {
        tokens.push(current);
    }

    Some(tokens)
}
