//! `event-role create`: bind a new role to an announcement.

use super::{
    BindingCache, CommandStep, ConfirmationOutcome, ConfirmationTimers, EventRoleCommandError,
    replies,
};
use crate::event_role::{
    domain::{
        CommandParseError, DISMISS_EMOJI, EventBinding, InboundMessage, MessageId,
        MessageLocation, MessageReference, StatusEmoji, Subcommand,
    },
    ports::{BindingRepository, ChatPlatform, ChatPlatformError, PlatformRole},
};
use mockable::Clock;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

const COMMAND: &str = "event-role create";

/// Result of a successful `create`.
#[derive(Debug)]
pub struct CreatedBinding {
    /// The persisted binding.
    pub binding: EventBinding,
    /// The role created for the event.
    pub role: PlatformRole,
    /// The confirmation notice, when it could be posted.
    pub confirmation: Option<PostedConfirmation>,
}

/// A posted confirmation notice and its dismissal timer.
#[derive(Debug)]
pub struct PostedConfirmation {
    /// Notice message identifier.
    pub message_id: MessageId,
    /// Resolves when the notice is dismissed or its wait expires.
    pub timer: JoinHandle<ConfirmationOutcome>,
}

/// Handler for `event-role create <role> <message>`.
pub struct CreateHandler<R, P, C>
where
    R: BindingRepository,
    P: ChatPlatform + 'static,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    platform: Arc<P>,
    cache: Arc<BindingCache<R, C>>,
    confirmations: Arc<ConfirmationTimers<P>>,
    clock: Arc<C>,
}

impl<R, P, C> CreateHandler<R, P, C>
where
    R: BindingRepository,
    P: ChatPlatform + 'static,
    C: Clock + Send + Sync,
{
    /// Creates a handler.
    #[must_use]
    pub const fn new(
        repository: Arc<R>,
        platform: Arc<P>,
        cache: Arc<BindingCache<R, C>>,
        confirmations: Arc<ConfirmationTimers<P>>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            repository,
            platform,
            cache,
            confirmations,
            clock,
        }
    }

    /// Runs the creation flow.
    ///
    /// Steps run in order and the first failure ends the flow. Reactions
    /// attached before a failure stay on the message, and a role created
    /// before a persistence failure stays in the guild.
    ///
    /// # Errors
    ///
    /// Returns [`EventRoleCommandError`] describing the step that failed.
    pub async fn handle(
        &self,
        invocation: &InboundMessage,
        role_name: &str,
        reference: &MessageReference,
    ) -> Result<CreatedBinding, EventRoleCommandError> {
        let location = reference
            .locate(invocation)
            .map_err(|source| CommandParseError::Reference {
                subcommand: Subcommand::Create,
                source,
            })?;

        if self
            .cache
            .get_by_message_id(&location.message_id)
            .await?
            .is_some()
        {
            return Err(EventRoleCommandError::AlreadyBound(location.message_id));
        }

        self.resolve_announcement(&location).await?;
        self.attach_status_reactions(&location).await?;

        let reason = format!(
            "Event role creation requested by {}.",
            invocation.author.display_name
        );
        let role = self
            .platform
            .create_role(&location.guild_id, role_name, &reason)
            .await
            .map_err(|source| step_failed(CommandStep::CreateRole, &location, source))?;

        let binding = EventBinding::new(location, role.id.clone(), &*self.clock);
        self.repository.insert(&binding).await.inspect_err(|error| {
            warn!(
                command = COMMAND,
                step = %CommandStep::PersistBinding,
                role_id = %role.id,
                message_id = %binding.message_id(),
                error = %error,
                "role created but binding could not be persisted"
            );
        })?;
        self.cache.refresh_or_invalidate().await;

        info!(
            command = COMMAND,
            guild_id = %binding.guild_id(),
            channel_id = %binding.channel_id(),
            message_id = %binding.message_id(),
            role_id = %binding.role_id(),
            "event role created"
        );

        let confirmation = self.post_confirmation(invocation, &role).await;
        Ok(CreatedBinding {
            binding,
            role,
            confirmation,
        })
    }

    async fn resolve_announcement(
        &self,
        location: &MessageLocation,
    ) -> Result<(), EventRoleCommandError> {
        self.platform
            .fetch_guild(&location.guild_id)
            .await
            .map_err(|source| step_failed(CommandStep::ResolveGuild, location, source))?
            .ok_or_else(|| EventRoleCommandError::GuildUnavailable(location.guild_id.clone()))?;

        let channel = self
            .platform
            .fetch_channel(&location.channel_id)
            .await
            .map_err(|source| step_failed(CommandStep::ResolveChannel, location, source))?
            .ok_or_else(|| {
                EventRoleCommandError::ChannelUnavailable(location.channel_id.clone())
            })?;
        if channel.guild_id.as_ref() != Some(&location.guild_id) {
            return Err(EventRoleCommandError::ChannelUnavailable(
                location.channel_id.clone(),
            ));
        }

        self.platform
            .fetch_message(&location.channel_id, &location.message_id)
            .await
            .map_err(|source| step_failed(CommandStep::ResolveMessage, location, source))?
            .ok_or_else(|| {
                EventRoleCommandError::MessageUnavailable(location.message_id.clone())
            })?;
        Ok(())
    }

    async fn attach_status_reactions(
        &self,
        location: &MessageLocation,
    ) -> Result<(), EventRoleCommandError> {
        for status in StatusEmoji::ALL {
            self.platform
                .add_reaction(&location.channel_id, &location.message_id, status.as_str())
                .await
                .map_err(|source| step_failed(CommandStep::AttachReactions, location, source))?;
        }
        Ok(())
    }

    async fn post_confirmation(
        &self,
        invocation: &InboundMessage,
        role: &PlatformRole,
    ) -> Option<PostedConfirmation> {
        let timeout_secs = self.confirmations.timeout().as_secs();
        let notice = match replies::confirmation_notice(&role.mention(), timeout_secs) {
            Ok(notice) => notice,
            Err(error) => {
                warn!(command = COMMAND, error = %error, "confirmation notice did not render");
                return None;
            }
        };

        let message_id = match self
            .platform
            .send_message(&invocation.channel_id, &notice)
            .await
        {
            Ok(message_id) => message_id,
            Err(error) => {
                warn!(
                    command = COMMAND,
                    step = %CommandStep::PostConfirmation,
                    channel_id = %invocation.channel_id,
                    error = %error,
                    "failed to post confirmation notice"
                );
                return None;
            }
        };

        if let Err(error) = self
            .platform
            .add_reaction(&invocation.channel_id, &message_id, DISMISS_EMOJI)
            .await
        {
            warn!(
                command = COMMAND,
                step = %CommandStep::PostConfirmation,
                message_id = %message_id,
                error = %error,
                "failed to add dismissal reaction to confirmation notice"
            );
        }

        let timer = self.confirmations.schedule(
            invocation.channel_id.clone(),
            message_id.clone(),
            invocation.author.id.clone(),
        );
        Some(PostedConfirmation { message_id, timer })
    }
}

/// Logs a failed platform call with the announcement's location and wraps it.
fn step_failed(
    step: CommandStep,
    location: &MessageLocation,
    source: ChatPlatformError,
) -> EventRoleCommandError {
    warn!(
        command = COMMAND,
        step = %step,
        guild_id = %location.guild_id,
        channel_id = %location.channel_id,
        message_id = %location.message_id,
        error = %source,
        "platform request failed"
    );
    EventRoleCommandError::platform(step, source)
}
