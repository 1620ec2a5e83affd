//! `event-role delete`: remove a binding and its role.

use super::{BindingCache, CommandStep, EventRoleCommandError, lookup::find_binding, replies};
use crate::event_role::{
    domain::{BindingTarget, EventBinding, InboundMessage, Subcommand},
    ports::{BindingRepository, ChatPlatform},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::{info, warn};

const COMMAND: &str = "event-role delete";

/// Handler for `event-role delete <role|message>`.
pub struct DeleteHandler<R, P, C>
where
    R: BindingRepository,
    P: ChatPlatform,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    platform: Arc<P>,
    cache: Arc<BindingCache<R, C>>,
}

impl<R, P, C> DeleteHandler<R, P, C>
where
    R: BindingRepository,
    P: ChatPlatform,
    C: Clock + Send + Sync,
{
    /// Creates a handler.
    #[must_use]
    pub const fn new(
        repository: Arc<R>,
        platform: Arc<P>,
        cache: Arc<BindingCache<R, C>>,
    ) -> Self {
        Self {
            repository,
            platform,
            cache,
        }
    }

    /// Deletes the bound role, then the binding, then confirms to the user.
    ///
    /// The role is deleted without checking that it still exists; a missing
    /// role fails the command and leaves the binding in place.
    ///
    /// # Errors
    ///
    /// Returns [`EventRoleCommandError`] when the binding cannot be resolved
    /// or any step fails.
    pub async fn handle(
        &self,
        invocation: &InboundMessage,
        target: &BindingTarget,
    ) -> Result<EventBinding, EventRoleCommandError> {
        let binding = find_binding(&self.cache, Subcommand::Delete, invocation, target).await?;

        let reason = format!(
            "Event role deletion requested by {}.",
            invocation.author.display_name
        );
        self.platform
            .delete_role(binding.guild_id(), binding.role_id(), &reason)
            .await
            .map_err(|source| {
                warn!(
                    command = COMMAND,
                    step = %CommandStep::DeleteRole,
                    guild_id = %binding.guild_id(),
                    message_id = %binding.message_id(),
                    role_id = %binding.role_id(),
                    error = %source,
                    "platform request failed"
                );
                EventRoleCommandError::platform(CommandStep::DeleteRole, source)
            })?;

        self.repository.delete_by_role_id(binding.role_id()).await?;
        self.cache.refresh_or_invalidate().await;

        info!(
            command = COMMAND,
            guild_id = %binding.guild_id(),
            message_id = %binding.message_id(),
            role_id = %binding.role_id(),
            "event role deleted"
        );

        self.platform
            .reply(&invocation.channel_id, &invocation.id, replies::ROLE_DELETED)
            .await
            .map_err(|source| EventRoleCommandError::platform(CommandStep::Reply, source))?;
        Ok(binding)
    }
}
