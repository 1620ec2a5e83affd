//! Diesel row models for event binding persistence.

use super::schema::event_role_bindings;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for binding records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = event_role_bindings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct EventBindingRow {
    /// Internal binding identifier.
    pub id: uuid::Uuid,
    /// Guild of the announcement.
    pub guild_id: String,
    /// Channel of the announcement.
    pub channel_id: String,
    /// Announcement message.
    pub message_id: String,
    /// Bound role.
    pub role_id: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for binding records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = event_role_bindings)]
pub struct NewEventBindingRow {
    /// Internal binding identifier.
    pub id: uuid::Uuid,
    /// Guild of the announcement.
    pub guild_id: String,
    /// Channel of the announcement.
    pub channel_id: String,
    /// Announcement message.
    pub message_id: String,
    /// Bound role.
    pub role_id: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
