//! Grants and revokes event roles from announcement reactions.

use super::BindingCache;
use crate::event_role::{
    domain::{EventBinding, ReactionEvent, ReactionKind, StatusEmoji},
    ports::{BindingRepository, BindingRepositoryError, ChatPlatform, ChatPlatformError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

const GRANT_REASON: &str = "The member reacted to the event.";
const REVOKE_REASON: &str = "The member removed their reaction to the event.";

/// What the router did with a reaction event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionOutcome {
    /// The emoji is not the attending marker.
    Ignored,
    /// The reacted message is not a bound announcement.
    Unbound,
    /// The bound role was granted.
    Granted,
    /// The bound role was revoked.
    Revoked,
    /// A lookup or role change failed; the failure was logged.
    Failed,
}

#[derive(Debug, Error)]
enum RouteError {
    #[error(transparent)]
    Repository(#[from] BindingRepositoryError),
    #[error(transparent)]
    Platform(#[from] ChatPlatformError),
    #[error("member is not part of the event's guild")]
    MemberMissing,
}

/// Routes attending reactions on bound announcements to role changes.
pub struct ReactionRouter<R, P, C>
where
    R: BindingRepository,
    P: ChatPlatform,
    C: Clock + Send + Sync,
{
    platform: Arc<P>,
    cache: Arc<BindingCache<R, C>>,
}

impl<R, P, C> ReactionRouter<R, P, C>
where
    R: BindingRepository,
    P: ChatPlatform,
    C: Clock + Send + Sync,
{
    /// Creates a router.
    #[must_use]
    pub const fn new(platform: Arc<P>, cache: Arc<BindingCache<R, C>>) -> Self {
        Self { platform, cache }
    }

    /// Applies a reaction event. Failures are logged and never returned.
    pub async fn handle(&self, event: &ReactionEvent) -> ReactionOutcome {
        if !StatusEmoji::is_attending(&event.emoji) {
            return ReactionOutcome::Ignored;
        }
        match self.route(event).await {
            Ok(Some(outcome)) => outcome,
            Ok(None) => ReactionOutcome::Unbound,
            Err(error) => {
                let event_name = match event.kind {
                    ReactionKind::Added => "reaction_add",
                    ReactionKind::Removed => "reaction_remove",
                };
                warn!(
                    event = event_name,
                    message_id = %event.message_id,
                    user_id = %event.user_id,
                    error = %error,
                    "failed to apply event reaction"
                );
                ReactionOutcome::Failed
            }
        }
    }

    async fn route(&self, event: &ReactionEvent) -> Result<Option<ReactionOutcome>, RouteError> {
        let Some(binding) = self.cache.get_by_message_id(&event.message_id).await? else {
            return Ok(None);
        };
        self.platform
            .fetch_member(binding.guild_id(), &event.user_id)
            .await?
            .ok_or(RouteError::MemberMissing)?;

        let outcome = self.apply(&binding, event).await?;
        debug!(
            role_id = %binding.role_id(),
            user_id = %event.user_id,
            outcome = ?outcome,
            "event reaction applied"
        );
        Ok(Some(outcome))
    }

    async fn apply(
        &self,
        binding: &EventBinding,
        event: &ReactionEvent,
    ) -> Result<ReactionOutcome, RouteError> {
        match event.kind {
            ReactionKind::Added => {
                self.platform
                    .grant_role(binding.guild_id(), &event.user_id, binding.role_id(), GRANT_REASON)
                    .await?;
                Ok(ReactionOutcome::Granted)
            }
            ReactionKind::Removed => {
                self.platform
                    .revoke_role(
                        binding.guild_id(),
                        &event.user_id,
                        binding.role_id(),
                        REVOKE_REASON,
                    )
                    .await?;
                Ok(ReactionOutcome::Revoked)
            }
        }
    }
}
