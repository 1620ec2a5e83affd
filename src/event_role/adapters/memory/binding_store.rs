//! In-memory binding repository.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::event_role::{
    domain::{EventBinding, RoleId},
    ports::{BindingRepository, BindingRepositoryError, BindingRepositoryResult},
};

/// Thread-safe in-memory binding repository.
///
/// Enforces the same uniqueness rules as the `PostgreSQL` schema: one binding
/// per message and one binding per role.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBindingRepository {
    bindings: Arc<RwLock<Vec<EventBinding>>>,
}

impl InMemoryBindingRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> BindingRepositoryError {
    BindingRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl BindingRepository for InMemoryBindingRepository {
    async fn insert(&self, binding: &EventBinding) -> BindingRepositoryResult<()> {
        let mut bindings = self.bindings.write().map_err(lock_error)?;

        if bindings
            .iter()
            .any(|existing| existing.message_id() == binding.message_id())
        {
            return Err(BindingRepositoryError::DuplicateMessage(
                binding.message_id().clone(),
            ));
        }
        if bindings
            .iter()
            .any(|existing| existing.role_id() == binding.role_id())
        {
            return Err(BindingRepositoryError::DuplicateRole(
                binding.role_id().clone(),
            ));
        }

        bindings.push(binding.clone());
        Ok(())
    }

    async fn delete_by_role_id(&self, role_id: &RoleId) -> BindingRepositoryResult<()> {
        let mut bindings = self.bindings.write().map_err(lock_error)?;
        bindings.retain(|binding| binding.role_id() != role_id);
        Ok(())
    }

    async fn list_all(&self) -> BindingRepositoryResult<Vec<EventBinding>> {
        let bindings = self.bindings.read().map_err(lock_error)?;
        Ok(bindings.clone())
    }
}
