//! `event-role participants`: list the holders of a bound role.

use super::{BindingCache, CommandStep, EventRoleCommandError, lookup::find_binding, replies};
use crate::event_role::{
    domain::{BindingTarget, EventBinding, InboundMessage, Subcommand},
    ports::{BindingRepository, ChatPlatform},
};
use mockable::Clock;
use std::sync::Arc;

/// Result of a successful `participants`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantList {
    /// The inspected binding.
    pub binding: EventBinding,
    /// Display names of the current role holders.
    pub names: Vec<String>,
}

/// Handler for `event-role participants <role|message>`.
pub struct ParticipantsHandler<R, P, C>
where
    R: BindingRepository,
    P: ChatPlatform,
    C: Clock + Send + Sync,
{
    platform: Arc<P>,
    cache: Arc<BindingCache<R, C>>,
}

impl<R, P, C> ParticipantsHandler<R, P, C>
where
    R: BindingRepository,
    P: ChatPlatform,
    C: Clock + Send + Sync,
{
    /// Creates a handler.
    #[must_use]
    pub const fn new(platform: Arc<P>, cache: Arc<BindingCache<R, C>>) -> Self {
        Self { platform, cache }
    }

    /// Posts the display names of everyone holding the bound role.
    ///
    /// The list is not paginated.
    ///
    /// # Errors
    ///
    /// Returns [`EventRoleCommandError`] when the binding or role cannot be
    /// resolved, or when listing or posting fails.
    pub async fn handle(
        &self,
        invocation: &InboundMessage,
        target: &BindingTarget,
    ) -> Result<ParticipantList, EventRoleCommandError> {
        let binding =
            find_binding(&self.cache, Subcommand::Participants, invocation, target).await?;

        let role = self
            .platform
            .fetch_role(binding.guild_id(), binding.role_id())
            .await
            .map_err(|source| EventRoleCommandError::platform(CommandStep::FetchRole, source))?
            .ok_or_else(|| EventRoleCommandError::BoundRoleMissing(binding.role_id().clone()))?;

        let names: Vec<String> = self
            .platform
            .role_members(binding.guild_id(), binding.role_id())
            .await
            .map_err(|source| {
                EventRoleCommandError::platform(CommandStep::ListParticipants, source)
            })?
            .into_iter()
            .map(|member| member.display_name)
            .collect();

        let text = replies::participants_list(&role.mention(), &names)?;
        self.platform
            .send_message(&invocation.channel_id, &text)
            .await
            .map_err(|source| EventRoleCommandError::platform(CommandStep::Reply, source))?;

        Ok(ParticipantList { binding, names })
    }
}
