//! User-facing reply texts.

use crate::event_role::domain::{DISMISS_EMOJI, StatusEmoji};
use minijinja::{Environment, context};
use thiserror::Error;

pub(crate) const MISSING_MESSAGE_REFERENCE: &str = "I couldn't find the event message. Check the command format: `event-role create <role> <message>`.";
pub(crate) const MISSING_ROLE_NAME: &str = "I couldn't find the name of the role to create. Check the command format: `event-role create <role> <message>`.";
pub(crate) const CREATE_USAGE: &str = "To create an event role, use `event-role create <role> <message>`. Put the role name in quotes if it contains spaces.";
pub(crate) const DELETE_USAGE: &str = "To delete an event role, use `event-role delete <message|role>`, with a link to the announcement or the associated role.";
pub(crate) const PARTICIPANTS_USAGE: &str = "To list the participants of an event, use `event-role participants <message|role>`, with a link to the announcement or the associated role.";
pub(crate) const UNTERMINATED_QUOTE: &str =
    "A quoted argument in your command is never closed. Check the quotes and try again.";
pub(crate) const INVALID_ROLE_MENTION: &str = "I couldn't identify a role in your command.";
pub(crate) const LINK_FORMAT: &str = "I didn't recognise the message link. A message link looks like `https://discord.com/channels/<guildId>/<channelId>/<messageId>`.\n\n:bulb: If you run this command in the same channel as the event message, you can use the message ID instead of the link.";
pub(crate) const PRIVATE_CONTEXT: &str =
    "I can't manage events created in private groups, only servers are supported.";
pub(crate) const BARE_ID_OUTSIDE_GUILD: &str = "When only the message ID is given, the command must be run in the same channel as the event announcement.\n\n:bulb: To run the command from anywhere, use the message link instead.";
pub(crate) const UNRESOLVED_MESSAGE: &str = "I couldn't find the message. Check that the link is correct or that the ID is in the right place in the command.";
pub(crate) const MISSING_MESSAGE_ID: &str = "I couldn't recognise a message ID in the command argument. Give the link to the message or its ID.";
pub(crate) const ALREADY_BOUND: &str =
    "This message is already registered as an event announcement.";
pub(crate) const GUILD_UNAVAILABLE: &str = "I couldn't find the server where the event message was posted. Maybe I'm not a member of that server.";
pub(crate) const CHANNEL_UNAVAILABLE: &str = "I couldn't find the channel where the event message was posted. Maybe I'm not allowed to read that channel.";
pub(crate) const MESSAGE_UNAVAILABLE: &str = "I couldn't find the event message. Maybe I'm not allowed to read that channel or its history.";
pub(crate) const REACTIONS_FAILED: &str = "I couldn't add reactions to the event message. Maybe I'm not allowed to react to messages in that channel.";
pub(crate) const ROLE_CREATION_FAILED: &str = "I couldn't create the role for this event. Maybe I'm not allowed to view or create roles on that server.";
pub(crate) const ROLE_DELETION_FAILED: &str = "I couldn't delete the event role. Maybe I'm not allowed to manage roles on that server, or the role no longer exists.";
pub(crate) const PARTICIPANTS_FAILED: &str =
    "I couldn't list the holders of the event role. Maybe I'm not allowed to view members.";
pub(crate) const PLATFORM_FAILED: &str =
    "Something went wrong on the chat platform. I may be missing permissions.";
pub(crate) const STORE_FAILED: &str =
    "I couldn't read or update the registered events. Try again later.";
pub(crate) const ROLE_NOT_BOUND: &str =
    "The specified role is not associated with a registered event.";
pub(crate) const MESSAGE_NOT_BOUND: &str =
    "The specified message is not registered as an event announcement.";
pub(crate) const BOUND_ROLE_MISSING: &str = "The role bound to this event no longer exists.";
pub(crate) const ROLE_DELETED: &str = "OK! I deleted the event role.";
pub(crate) const NO_INVITE_LINK: &str = "Sorry, nobody has configured an invite link for me yet.";

const CONFIRMATION_TEMPLATE: &str = "OK! I added three reactions to the message, meaning respectively:
{{ attending }} Attending.
{{ tentative }} Unavailable, another date?
{{ declined }} Not interested.

:bulb: It may be worth editing the announcement so that it shows this legend!

From now on, anyone reacting with {{ attending }} is given the new role {{ role }}.
When the role is no longer needed, delete it either from the server settings or with `event-role delete <message>`, using the link to the announcement.

{{ dismiss }} You can safely delete this message by reacting with {{ dismiss }} (it stays in place after {{ timeout_secs }} seconds otherwise).";

const PARTICIPANTS_TEMPLATE: &str =
    "Participants in the event bound to role {{ role }}: {{ names | join(\", \") }}.";

const INVITE_TEMPLATE: &str = "Hey! For now, only my creator and a few authorised people can invite me. If you are one of them, use this link: {{ link }}.";

/// A reply template failed to render.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("reply template '{template}' failed to render: {reason}")]
pub struct ReplyRenderError {
    /// Template name.
    pub template: &'static str,
    /// Rendering failure reason.
    pub reason: String,
}

fn render(
    template_name: &'static str,
    template: &str,
    ctx: minijinja::Value,
) -> Result<String, ReplyRenderError> {
    Environment::new()
        .render_str(template, ctx)
        .map_err(|error| ReplyRenderError {
            template: template_name,
            reason: error.to_string(),
        })
}

/// Renders the notice posted after a binding is created.
///
/// # Errors
///
/// Returns [`ReplyRenderError`] when rendering fails.
pub fn confirmation_notice(
    role_mention: &str,
    timeout_secs: u64,
) -> Result<String, ReplyRenderError> {
    render(
        "confirmation",
        CONFIRMATION_TEMPLATE,
        context! {
            attending => StatusEmoji::Attending.as_str(),
            tentative => StatusEmoji::Tentative.as_str(),
            declined => StatusEmoji::Declined.as_str(),
            dismiss => DISMISS_EMOJI,
            role => role_mention,
            timeout_secs => timeout_secs,
        },
    )
}

/// Renders the participant list of a bound role.
///
/// # Errors
///
/// Returns [`ReplyRenderError`] when rendering fails.
pub fn participants_list(role_mention: &str, names: &[String]) -> Result<String, ReplyRenderError> {
    render(
        "participants",
        PARTICIPANTS_TEMPLATE,
        context! { role => role_mention, names => names },
    )
}

/// Renders the reply to the `invite` command.
///
/// # Errors
///
/// Returns [`ReplyRenderError`] when rendering fails.
pub fn invite(link: &str) -> Result<String, ReplyRenderError> {
    render("invite", INVITE_TEMPLATE, context! { link => link })
}
