//! `PostgreSQL` repository implementation for event bindings.

use super::{
    models::{EventBindingRow, NewEventBindingRow},
    schema::event_role_bindings,
};
use crate::config::DatabaseConfig;
use crate::event_role::{
    domain::{
        BindingId, ChannelId, EventBinding, GuildId, MessageId, PersistedBindingData, RoleId,
    },
    ports::{BindingRepository, BindingRepositoryError, BindingRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

/// `PostgreSQL` connection pool type used by the binding repository.
pub type BindingPgPool = Pool<ConnectionManager<PgConnection>>;

const MESSAGE_UNIQUE_INDEX: &str = "idx_event_role_bindings_message_id";
const ROLE_UNIQUE_INDEX: &str = "idx_event_role_bindings_role_id";

/// Builds a connection pool from database configuration.
///
/// # Errors
///
/// Returns [`BindingRepositoryError::Persistence`] when the pool cannot
/// establish its initial connections.
pub fn connect_pool(config: &DatabaseConfig) -> BindingRepositoryResult<BindingPgPool> {
    Pool::builder()
        .max_size(config.max_connections)
        .build(ConnectionManager::<PgConnection>::new(config.url.as_str()))
        .map_err(BindingRepositoryError::persistence)
}

/// `PostgreSQL`-backed binding repository.
#[derive(Debug, Clone)]
pub struct PostgresBindingRepository {
    pool: BindingPgPool,
}

impl PostgresBindingRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: BindingPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> BindingRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> BindingRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(BindingRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(BindingRepositoryError::persistence)?
    }
}

#[async_trait]
impl BindingRepository for PostgresBindingRepository {
    async fn insert(&self, binding: &EventBinding) -> BindingRepositoryResult<()> {
        let message_id = binding.message_id().clone();
        let role_id = binding.role_id().clone();
        let new_row = to_new_row(binding);

        self.run_blocking(move |connection| {
            diesel::insert_into(event_role_bindings::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if violates(info.as_ref(), MESSAGE_UNIQUE_INDEX) =>
                    {
                        BindingRepositoryError::DuplicateMessage(message_id.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if violates(info.as_ref(), ROLE_UNIQUE_INDEX) =>
                    {
                        BindingRepositoryError::DuplicateRole(role_id.clone())
                    }
                    _ => BindingRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn delete_by_role_id(&self, role_id: &RoleId) -> BindingRepositoryResult<()> {
        let role = role_id.as_str().to_owned();
        self.run_blocking(move |connection| {
            diesel::delete(
                event_role_bindings::table.filter(event_role_bindings::role_id.eq(&role)),
            )
            .execute(connection)
            .map_err(BindingRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn list_all(&self) -> BindingRepositoryResult<Vec<EventBinding>> {
        self.run_blocking(move |connection| {
            let rows = event_role_bindings::table
                .select(EventBindingRow::as_select())
                .load::<EventBindingRow>(connection)
                .map_err(BindingRepositoryError::persistence)?;
            rows.into_iter().map(row_to_binding).collect()
        })
        .await
    }
}

/// A required identifier column held an empty string.
#[derive(Debug, Error)]
#[error("column '{0}' is empty")]
struct EmptyColumn(&'static str);

fn to_new_row(binding: &EventBinding) -> NewEventBindingRow {
    NewEventBindingRow {
        id: binding.id().into_inner(),
        guild_id: binding.guild_id().as_str().to_owned(),
        channel_id: binding.channel_id().as_str().to_owned(),
        message_id: binding.message_id().as_str().to_owned(),
        role_id: binding.role_id().as_str().to_owned(),
        created_at: binding.created_at(),
    }
}

fn row_to_binding(row: EventBindingRow) -> BindingRepositoryResult<EventBinding> {
    let EventBindingRow {
        id,
        guild_id,
        channel_id,
        message_id,
        role_id,
        created_at,
    } = row;

    for (column, value) in [
        ("guild_id", &guild_id),
        ("channel_id", &channel_id),
        ("message_id", &message_id),
        ("role_id", &role_id),
    ] {
        if value.is_empty() {
            return Err(BindingRepositoryError::invalid_persisted_data(EmptyColumn(
                column,
            )));
        }
    }

    Ok(EventBinding::from_persisted(PersistedBindingData {
        id: BindingId::from_uuid(id),
        guild_id: GuildId::new(guild_id),
        channel_id: ChannelId::new(channel_id),
        message_id: MessageId::new(message_id),
        role_id: RoleId::new(role_id),
        created_at,
    }))
}

fn violates(info: &dyn diesel::result::DatabaseErrorInformation, index: &str) -> bool {
    info.constraint_name().is_some_and(|name| name == index)
}
