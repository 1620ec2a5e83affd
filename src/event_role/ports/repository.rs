//! Repository port for event binding persistence.

use crate::event_role::domain::{EventBinding, MessageId, RoleId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for binding repository operations.
pub type BindingRepositoryResult<T> = Result<T, BindingRepositoryError>;

/// Event binding persistence contract.
///
/// The repository is the source of truth for bindings. Callers that mutate
/// it are responsible for refreshing any cache built on top of it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BindingRepository: Send + Sync {
    /// Stores a new binding.
    ///
    /// # Errors
    ///
    /// Returns [`BindingRepositoryError::DuplicateMessage`] or
    /// [`BindingRepositoryError::DuplicateRole`] when an adapter enforces
    /// uniqueness and the binding collides, or
    /// [`BindingRepositoryError::Persistence`] when storage is unavailable.
    async fn insert(&self, binding: &EventBinding) -> BindingRepositoryResult<()>;

    /// Removes the binding for `role_id`. Absent bindings are not an error.
    async fn delete_by_role_id(&self, role_id: &RoleId) -> BindingRepositoryResult<()>;

    /// Returns every binding, in no particular order.
    async fn list_all(&self) -> BindingRepositoryResult<Vec<EventBinding>>;
}

/// Errors returned by binding repository implementations.
#[derive(Debug, Clone, Error)]
pub enum BindingRepositoryError {
    /// The announcement message already has a binding.
    #[error("message {0} is already bound to an event role")]
    DuplicateMessage(MessageId),

    /// The role is already bound to an announcement.
    #[error("role {0} is already bound to an event")]
    DuplicateRole(RoleId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl BindingRepositoryError {
    /// Wraps a data-quality error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
