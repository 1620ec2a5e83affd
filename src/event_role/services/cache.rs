//! In-process projection of the binding repository.
//!
//! The cache holds either nothing or one full snapshot of the repository. It
//! never updates incrementally: handlers that mutate the repository call
//! [`BindingCache::refresh`] right after the mutation commits, and readers
//! observe whatever snapshot was current when they looked. Concurrent
//! refreshes are not serialised; the last one to finish wins.

use crate::event_role::{
    domain::{EventBinding, MessageId, RoleId},
    ports::{BindingRepository, BindingRepositoryResult},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Deserialize;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, warn};

/// When lookups reload the snapshot from the repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheRefreshPolicy {
    /// Reload on every lookup.
    Always,
    /// Reload only when no snapshot is held.
    #[default]
    WhenEmpty,
}

/// Key used to look a binding up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingKey {
    /// Look up by announcement message.
    Message(MessageId),
    /// Look up by bound role.
    Role(RoleId),
}

impl BindingKey {
    fn matches(&self, binding: &EventBinding) -> bool {
        match self {
            Self::Message(id) => binding.message_id() == id,
            Self::Role(id) => binding.role_id() == id,
        }
    }
}

/// One full copy of the repository contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSnapshot {
    bindings: Vec<EventBinding>,
    last_refreshed_at: DateTime<Utc>,
}

impl CacheSnapshot {
    /// Returns the cached bindings.
    #[must_use]
    pub fn bindings(&self) -> &[EventBinding] {
        &self.bindings
    }

    /// Returns when the snapshot was loaded.
    #[must_use]
    pub const fn last_refreshed_at(&self) -> DateTime<Utc> {
        self.last_refreshed_at
    }

    fn find(&self, key: &BindingKey) -> Option<&EventBinding> {
        self.bindings.iter().find(|binding| key.matches(binding))
    }
}

/// Binding lookup cache backed by a [`BindingRepository`].
pub struct BindingCache<R, C>
where
    R: BindingRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    policy: CacheRefreshPolicy,
    snapshot: RwLock<Option<Arc<CacheSnapshot>>>,
}

impl<R, C> BindingCache<R, C>
where
    R: BindingRepository,
    C: Clock + Send + Sync,
{
    /// Creates an empty cache.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>, policy: CacheRefreshPolicy) -> Self {
        Self {
            repository,
            clock,
            policy,
            snapshot: RwLock::new(None),
        }
    }

    /// Returns the configured refresh policy.
    #[must_use]
    pub const fn policy(&self) -> CacheRefreshPolicy {
        self.policy
    }

    /// Returns the current snapshot without loading one.
    #[must_use]
    pub fn snapshot(&self) -> Option<Arc<CacheSnapshot>> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Discards the current snapshot; the next lookup reloads.
    pub fn invalidate(&self) {
        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Reloads the full binding set and stamps the refresh time.
    ///
    /// # Errors
    ///
    /// Returns repository errors; the previous snapshot is left untouched.
    pub async fn refresh(&self) -> BindingRepositoryResult<Arc<CacheSnapshot>> {
        let bindings = self.repository.list_all().await?;
        let snapshot = Arc::new(CacheSnapshot {
            bindings,
            last_refreshed_at: self.clock.utc(),
        });
        debug!(
            bindings = snapshot.bindings.len(),
            refreshed_at = %snapshot.last_refreshed_at,
            "binding cache refreshed"
        );
        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) =
            Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    /// Reloads after a repository mutation. When the reload fails the
    /// snapshot is discarded so that the next lookup retries it.
    pub async fn refresh_or_invalidate(&self) {
        if let Err(error) = self.refresh().await {
            warn!(error = %error, "binding cache refresh failed; invalidating");
            self.invalidate();
        }
    }

    /// Returns the binding matching `key`, loading a snapshot when the
    /// refresh policy requires one.
    ///
    /// # Errors
    ///
    /// Returns repository errors raised while loading.
    pub async fn get_or_load(
        &self,
        key: &BindingKey,
    ) -> BindingRepositoryResult<Option<EventBinding>> {
        let current = match self.policy {
            CacheRefreshPolicy::Always => None,
            CacheRefreshPolicy::WhenEmpty => self.snapshot(),
        };
        let snapshot = match current {
            Some(snapshot) => snapshot,
            None => self.refresh().await?,
        };
        Ok(snapshot.find(key).cloned())
    }

    /// Returns the binding for an announcement message.
    ///
    /// # Errors
    ///
    /// Returns repository errors raised while loading.
    pub async fn get_by_message_id(
        &self,
        message_id: &MessageId,
    ) -> BindingRepositoryResult<Option<EventBinding>> {
        self.get_or_load(&BindingKey::Message(message_id.clone())).await
    }

    /// Returns the binding for a role.
    ///
    /// # Errors
    ///
    /// Returns repository errors raised while loading.
    pub async fn get_by_role_id(
        &self,
        role_id: &RoleId,
    ) -> BindingRepositoryResult<Option<EventBinding>> {
        self.get_or_load(&BindingKey::Role(role_id.clone())).await
    }
}
