//! Routes `event-role` subcommands to their handlers.

use super::{
    CreateHandler, CreatedBinding, DeleteHandler, EventRoleCommandError, ParticipantList,
    ParticipantsHandler,
};
use crate::event_role::{
    domain::{EventBinding, EventRoleCommand, InboundMessage, Subcommand},
    ports::{BindingRepository, ChatPlatform, ChatPlatformError},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result of dispatching one `event-role` invocation.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// The subcommand keyword was not recognised; nothing was done.
    Ignored,
    /// `create` succeeded.
    Created(CreatedBinding),
    /// `delete` succeeded.
    Deleted(EventBinding),
    /// `participants` succeeded.
    Listed(ParticipantList),
    /// The command failed and the user was told why.
    Rejected(EventRoleCommandError),
}

/// Parses the text after the `event-role` keyword and runs the matching
/// handler.
pub struct CommandDispatcher<R, P, C>
where
    R: BindingRepository,
    P: ChatPlatform + 'static,
    C: Clock + Send + Sync,
{
    platform: Arc<P>,
    create: CreateHandler<R, P, C>,
    delete: DeleteHandler<R, P, C>,
    participants: ParticipantsHandler<R, P, C>,
}

impl<R, P, C> CommandDispatcher<R, P, C>
where
    R: BindingRepository,
    P: ChatPlatform + 'static,
    C: Clock + Send + Sync,
{
    /// Creates a dispatcher over the three subcommand handlers.
    #[must_use]
    pub const fn new(
        platform: Arc<P>,
        create: CreateHandler<R, P, C>,
        delete: DeleteHandler<R, P, C>,
        participants: ParticipantsHandler<R, P, C>,
    ) -> Self {
        Self {
            platform,
            create,
            delete,
            participants,
        }
    }

    /// Runs `input` on behalf of `invocation`.
    ///
    /// Command failures are logged and answered with the error's reply; they
    /// are reported as [`DispatchOutcome::Rejected`].
    ///
    /// # Errors
    ///
    /// Returns [`ChatPlatformError`] only when the failure reply itself could
    /// not be posted.
    pub async fn dispatch(
        &self,
        invocation: &InboundMessage,
        input: &str,
    ) -> Result<DispatchOutcome, ChatPlatformError> {
        let command = match EventRoleCommand::parse(input) {
            Ok(command) => command,
            Err(error) => {
                return self
                    .reject(invocation, error.subcommand(), error.into())
                    .await;
            }
        };

        let (subcommand, result) = match command {
            EventRoleCommand::Unknown(keyword) => {
                debug!(keyword = %keyword, "ignoring unknown event-role subcommand");
                return Ok(DispatchOutcome::Ignored);
            }
            EventRoleCommand::Create {
                role_name,
                reference,
            } => (
                Subcommand::Create,
                self.create
                    .handle(invocation, &role_name, &reference)
                    .await
                    .map(DispatchOutcome::Created),
            ),
            EventRoleCommand::Delete { target } => (
                Subcommand::Delete,
                self.delete
                    .handle(invocation, &target)
                    .await
                    .map(DispatchOutcome::Deleted),
            ),
            EventRoleCommand::Participants { target } => (
                Subcommand::Participants,
                self.participants
                    .handle(invocation, &target)
                    .await
                    .map(DispatchOutcome::Listed),
            ),
        };

        match result {
            Ok(outcome) => Ok(outcome),
            Err(error) => self.reject(invocation, Some(subcommand), error).await,
        }
    }

    async fn reject(
        &self,
        invocation: &InboundMessage,
        subcommand: Option<Subcommand>,
        error: EventRoleCommandError,
    ) -> Result<DispatchOutcome, ChatPlatformError> {
        let command = subcommand.map_or_else(
            || "event-role".to_owned(),
            |name| format!("event-role {name}"),
        );
        if error.is_operational() {
            warn!(
                command = %command,
                original_message = %invocation.content,
                channel_id = %invocation.channel_id,
                error = %error,
                "event-role command failed"
            );
        } else {
            info!(
                command = %command,
                original_message = %invocation.content,
                error = %error,
                "event-role command rejected"
            );
        }
        self.platform
            .reply(&invocation.channel_id, &invocation.id, error.user_message())
            .await?;
        Ok(DispatchOutcome::Rejected(error))
    }
}
