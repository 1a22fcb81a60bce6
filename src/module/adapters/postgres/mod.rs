//! `PostgreSQL` adapters for module persistence.

mod models;
mod schema;
mod store;

pub use store::{ModulePgPool, PostgresModuleStore};
