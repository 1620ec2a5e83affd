//! Binding resolution shared by `delete` and `participants`.

use super::{BindingCache, EventRoleCommandError};
use crate::event_role::{
    domain::{
        BindingTarget, CommandParseError, EventBinding, InboundMessage, MessageReference,
        MessageReferenceError, Subcommand,
    },
    ports::BindingRepository,
};
use mockable::Clock;

/// Resolves the binding a role mention or message reference points at.
///
/// A bare message id is only accepted from inside a guild; deep links work
/// from anywhere.
pub(crate) async fn find_binding<R, C>(
    cache: &BindingCache<R, C>,
    subcommand: Subcommand,
    invocation: &InboundMessage,
    target: &BindingTarget,
) -> Result<EventBinding, EventRoleCommandError>
where
    R: BindingRepository,
    C: Clock + Send + Sync,
{
    match target {
        BindingTarget::Role(role_id) => cache
            .get_by_role_id(role_id)
            .await?
            .ok_or_else(|| EventRoleCommandError::RoleNotBound(role_id.clone())),
        BindingTarget::Message(reference) => {
            if matches!(reference, MessageReference::BareId(_)) && invocation.guild_id.is_none() {
                return Err(CommandParseError::Reference {
                    subcommand,
                    source: MessageReferenceError::BareIdOutsideGuild,
                }
                .into());
            }
            let message_id = reference.message_id();
            cache
                .get_by_message_id(message_id)
                .await?
                .ok_or_else(|| EventRoleCommandError::MessageNotBound(message_id.clone()))
        }
    }
}
