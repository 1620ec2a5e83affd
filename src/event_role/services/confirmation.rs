//! Self-destructing confirmation notices.
//!
//! After a binding is created the bot posts a notice and waits for the
//! command author to react with [`DISMISS_EMOJI`]. Each pending notice owns a
//! timer task; a dismissal cancels the timer and deletes the notice, expiry
//! leaves the notice in place.
//!
//! [`DISMISS_EMOJI`]: crate::event_role::domain::DISMISS_EMOJI

use crate::event_role::{
    domain::{ChannelId, MessageId, UserId},
    ports::ChatPlatform,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// How a pending confirmation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationOutcome {
    /// The author dismissed it and the notice was deleted.
    Dismissed,
    /// The author dismissed it but deleting the notice failed.
    DeleteFailed,
    /// The wait elapsed; the notice stays.
    Expired,
}

struct PendingConfirmation {
    author_id: UserId,
    dismiss: oneshot::Sender<()>,
}

type PendingMap = Arc<Mutex<HashMap<MessageId, PendingConfirmation>>>;

/// Registry of confirmation notices awaiting dismissal.
pub struct ConfirmationTimers<P>
where
    P: ChatPlatform + 'static,
{
    platform: Arc<P>,
    timeout: Duration,
    pending: PendingMap,
}

impl<P> ConfirmationTimers<P>
where
    P: ChatPlatform + 'static,
{
    /// Creates a registry whose notices wait `timeout` for dismissal.
    #[must_use]
    pub fn new(platform: Arc<P>, timeout: Duration) -> Self {
        Self {
            platform,
            timeout,
            pending: Arc::default(),
        }
    }

    /// Returns the dismissal wait.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the number of notices still waiting.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Starts the timer for a notice only `author_id` may dismiss.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn schedule(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        author_id: UserId,
    ) -> JoinHandle<ConfirmationOutcome> {
        let (dismiss, dismissed) = oneshot::channel();
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(message_id.clone(), PendingConfirmation { author_id, dismiss });

        let platform = Arc::clone(&self.platform);
        let pending = Arc::clone(&self.pending);
        let timeout = self.timeout;

        tokio::spawn(async move {
            tokio::select! {
                Ok(()) = dismissed => {
                    match platform.delete_message(&channel_id, &message_id).await {
                        Ok(()) => {
                            debug!(message_id = %message_id, "confirmation notice dismissed");
                            ConfirmationOutcome::Dismissed
                        }
                        Err(error) => {
                            warn!(
                                message_id = %message_id,
                                channel_id = %channel_id,
                                error = %error,
                                "failed to delete dismissed confirmation notice"
                            );
                            ConfirmationOutcome::DeleteFailed
                        }
                    }
                }
                () = tokio::time::sleep(timeout) => {
                    pending
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .remove(&message_id);
                    debug!(message_id = %message_id, "confirmation notice expired");
                    ConfirmationOutcome::Expired
                }
            }
        })
    }

    /// Cancels the timer of `message_id` when `user_id` is its author.
    ///
    /// Returns `true` when a pending notice was dismissed.
    pub fn dismiss(&self, message_id: &MessageId, user_id: &UserId) -> bool {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        let is_author = pending
            .get(message_id)
            .is_some_and(|entry| &entry.author_id == user_id);
        if !is_author {
            return false;
        }
        pending
            .remove(message_id)
            .is_some_and(|entry| entry.dismiss.send(()).is_ok())
    }
}
