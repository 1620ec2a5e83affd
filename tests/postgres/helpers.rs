//! Shared fixtures for `PostgreSQL` binding repository tests.

pub use super::cluster::{BoxError, PostgresCluster, postgres_cluster};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use mockable::DefaultClock;
use nexus_bot::config::DatabaseConfig;
use nexus_bot::event_role::{
    adapters::postgres::{PostgresBindingRepository, connect_pool},
    domain::{ChannelId, EventBinding, GuildId, MessageId, MessageLocation, RoleId},
};
use rstest::fixture;
use tokio::runtime::Runtime;

/// SQL creating the bindings table and its unique indexes.
pub const CREATE_BINDINGS_SQL: &str =
    include_str!("../../migrations/2026-01-10-000000_create_event_role_bindings/up.sql");

/// Template database holding the migrated schema.
pub const TEMPLATE_DB: &str = "nexus_bot_test_template";

/// Guild used by every stored binding.
pub const GUILD: &str = "910000000000000001";
/// Channel used by every stored binding.
pub const CHANNEL: &str = "910000000000000002";

/// Builds a current-thread runtime for driving the async repository.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
pub fn test_runtime() -> Result<Runtime, BoxError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| Box::new(err) as BoxError)
}

/// Ensures the migrated template database exists.
///
/// # Errors
///
/// Returns an error if the template cannot be created or migrated.
pub fn ensure_template(cluster: PostgresCluster) -> Result<(), BoxError> {
    cluster.ensure_template_exists(TEMPLATE_DB, |url| {
        let mut conn = PgConnection::establish(url).map_err(|err| Box::new(err) as BoxError)?;
        conn.batch_execute(CREATE_BINDINGS_SQL)
            .map_err(|err| Box::new(err) as BoxError)
    })
}

/// Drops a per-test database when the guard goes out of scope.
pub struct CleanupGuard {
    cluster: PostgresCluster,
    db_name: String,
}

impl CleanupGuard {
    #[must_use]
    pub const fn new(cluster: PostgresCluster, db_name: String) -> Self {
        Self { cluster, db_name }
    }
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        drop(self.cluster.drop_database(&self.db_name));
    }
}

/// A migrated per-test database with a repository over it.
pub struct BindingDb {
    pub repo: PostgresBindingRepository,
    pub rt: Runtime,
    // Declared last so the pool closes before the database is dropped.
    _guard: CleanupGuard,
}

/// Provides a fresh database cloned from the template.
#[fixture]
pub fn binding_db(postgres_cluster: PostgresCluster) -> BindingDb {
    let cluster = postgres_cluster;
    ensure_template(cluster).expect("template setup");
    let db_name = format!("test_bindings_{}", uuid::Uuid::new_v4().simple());
    cluster
        .create_database_from_template(&db_name, TEMPLATE_DB)
        .expect("database from template");
    let guard = CleanupGuard::new(cluster, db_name.clone());

    let pool = connect_pool(&DatabaseConfig {
        url: cluster.database_url(&db_name),
        max_connections: 1,
    })
    .expect("connection pool");

    BindingDb {
        repo: PostgresBindingRepository::new(pool),
        rt: test_runtime().expect("tokio runtime"),
        _guard: guard,
    }
}

/// Builds a binding of `message` to `role` in the shared guild and channel.
#[must_use]
pub fn binding(message: &str, role: &str) -> EventBinding {
    EventBinding::new(
        MessageLocation {
            guild_id: GuildId::new(GUILD),
            channel_id: ChannelId::new(CHANNEL),
            message_id: MessageId::new(message),
        },
        RoleId::new(role),
        &DefaultClock,
    )
}
