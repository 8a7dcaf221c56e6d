//! Embedded relational store: a single-file SQLite database holding
//! messages, URL references, resolved URLs, and per-network edge tables,
//! with pushed-down similarity predicates for the engine's self-joins.

mod db;
mod error;
mod schema;

pub use db::Store;
pub use error::{Error, Result};
pub use schema::SCHEMA_VERSION;
