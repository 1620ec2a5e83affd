//! Entry point for inbound chat platform events.

use super::{
    BindingCache, CommandDispatcher, ConfirmationTimers, CreateHandler, DeleteHandler,
    DispatchOutcome, ParticipantsHandler, ReactionOutcome, ReactionRouter, replies,
};
use crate::config::BotConfig;
use crate::event_role::{
    domain::{DISMISS_EMOJI, InboundMessage, ReactionEvent, ReactionKind},
    ports::{BindingRepository, ChatPlatform, ChatPlatformError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

const INVITE_KEYWORD: &str = "invite";
const EVENT_ROLE_KEYWORD: &str = "event-role";

/// What the bot did with an inbound message.
#[derive(Debug)]
pub enum MessageOutcome {
    /// The message was not addressed to the bot.
    Ignored,
    /// The invite reply was posted.
    Invited,
    /// The message was an `event-role` command.
    EventRole(DispatchOutcome),
    /// Handling failed; the failure was logged.
    Failed,
}

#[derive(Debug, Error)]
enum MessageHandlingError {
    #[error(transparent)]
    Platform(#[from] ChatPlatformError),
    #[error(transparent)]
    Render(#[from] replies::ReplyRenderError),
}

/// Wires the event-role services together and receives platform events.
pub struct EventRoleBot<R, P, C>
where
    R: BindingRepository,
    P: ChatPlatform + 'static,
    C: Clock + Send + Sync,
{
    prefix: String,
    invite_link: Option<String>,
    platform: Arc<P>,
    cache: Arc<BindingCache<R, C>>,
    confirmations: Arc<ConfirmationTimers<P>>,
    dispatcher: CommandDispatcher<R, P, C>,
    reactions: ReactionRouter<R, P, C>,
}

impl<R, P, C> EventRoleBot<R, P, C>
where
    R: BindingRepository,
    P: ChatPlatform + 'static,
    C: Clock + Send + Sync,
{
    /// Builds the bot from configuration and its collaborators.
    #[must_use]
    pub fn new(config: &BotConfig, repository: Arc<R>, platform: Arc<P>, clock: Arc<C>) -> Self {
        let cache = Arc::new(BindingCache::new(
            Arc::clone(&repository),
            Arc::clone(&clock),
            config.event_role.cache_refresh,
        ));
        let confirmations = Arc::new(ConfirmationTimers::new(
            Arc::clone(&platform),
            config.event_role.confirmation_timeout(),
        ));

        let dispatcher = CommandDispatcher::new(
            Arc::clone(&platform),
            CreateHandler::new(
                Arc::clone(&repository),
                Arc::clone(&platform),
                Arc::clone(&cache),
                Arc::clone(&confirmations),
                clock,
            ),
            DeleteHandler::new(repository, Arc::clone(&platform), Arc::clone(&cache)),
            ParticipantsHandler::new(Arc::clone(&platform), Arc::clone(&cache)),
        );
        let reactions = ReactionRouter::new(Arc::clone(&platform), Arc::clone(&cache));

        Self {
            prefix: config.prefix.clone(),
            invite_link: config.invite_link.clone(),
            platform,
            cache,
            confirmations,
            dispatcher,
            reactions,
        }
    }

    /// Returns the shared binding cache.
    #[must_use]
    pub const fn cache(&self) -> &Arc<BindingCache<R, C>> {
        &self.cache
    }

    /// Returns the pending confirmation registry.
    #[must_use]
    pub const fn confirmations(&self) -> &Arc<ConfirmationTimers<P>> {
        &self.confirmations
    }

    /// Handles an inbound chat message.
    ///
    /// Messages from bots and messages without the trigger prefix are
    /// ignored. The text is split on single spaces into
    /// `<prefix> <keyword> <rest...>`; `invite` and `event-role` are the only
    /// keywords acted on.
    pub async fn handle_message(&self, message: &InboundMessage) -> MessageOutcome {
        if message.author.bot || !message.content.starts_with(&self.prefix) {
            return MessageOutcome::Ignored;
        }

        let mut words = message.content.split(' ').skip(1);
        let Some(keyword) = words.next() else {
            return MessageOutcome::Ignored;
        };
        let rest = words.collect::<Vec<_>>().join(" ");

        let handled = if keyword.eq_ignore_ascii_case(INVITE_KEYWORD) {
            self.reply_invite(message).await.map(|()| MessageOutcome::Invited)
        } else if keyword.eq_ignore_ascii_case(EVENT_ROLE_KEYWORD) {
            self.dispatcher
                .dispatch(message, &rest)
                .await
                .map(MessageOutcome::EventRole)
                .map_err(MessageHandlingError::from)
        } else {
            Ok(MessageOutcome::Ignored)
        };

        handled.unwrap_or_else(|error| {
            warn!(
                code = "MESSAGE_HANDLING_FAILED",
                original_message = %message.content,
                channel_id = %message.channel_id,
                error = %error,
                "failed to handle message"
            );
            MessageOutcome::Failed
        })
    }

    /// Handles a reaction added to or removed from any message.
    ///
    /// A dismissal reaction from the author of a pending confirmation notice
    /// deletes that notice. The event is then passed to the reaction router.
    pub async fn handle_reaction(&self, event: &ReactionEvent) -> ReactionOutcome {
        if event.kind == ReactionKind::Added
            && event.emoji == DISMISS_EMOJI
            && self.confirmations.dismiss(&event.message_id, &event.user_id)
        {
            debug!(message_id = %event.message_id, "confirmation notice dismissal requested");
        }
        self.reactions.handle(event).await
    }

    async fn reply_invite(&self, message: &InboundMessage) -> Result<(), MessageHandlingError> {
        let text = match &self.invite_link {
            Some(link) => replies::invite(link)?,
            None => replies::NO_INVITE_LINK.to_owned(),
        };
        self.platform
            .reply(&message.channel_id, &message.id, &text)
            .await?;
        Ok(())
    }
}
