//! `PostgreSQL` adapters for event binding persistence.

mod models;
mod repository;
mod schema;

pub use repository::{BindingPgPool, PostgresBindingRepository, connect_pool};
