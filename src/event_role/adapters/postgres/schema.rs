//! Diesel schema for event binding persistence.

diesel::table! {
    /// Announcement-to-role bindings.
    event_role_bindings (id) {
        /// Internal binding identifier.
        id -> Uuid,
        /// Guild of the announcement.
        #[max_length = 32]
        guild_id -> Varchar,
        /// Channel of the announcement.
        #[max_length = 32]
        channel_id -> Varchar,
        /// Announcement message, unique.
        #[max_length = 32]
        message_id -> Varchar,
        /// Bound role, unique.
        #[max_length = 32]
        role_id -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
