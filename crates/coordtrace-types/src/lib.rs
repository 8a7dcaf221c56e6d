// NOTE: Crate Rationale
//
// Why a flat data-model crate instead of types living next to their owning
// component?
// - Store, ingest, engine, and output all need the same `Message`/`EdgeRow`
//   shapes; duplicating them per crate would drift.
// - Keeps the store's schema-facing types decoupled from rusqlite, so
//   `coordtrace-output` can depend on the model without pulling in SQLite.

mod config;
mod error;
mod message;
mod network;

pub use config::{EngineConfig, OutputConfig, ResolverConfig};
pub use error::{Error, Result};
pub use message::{Message, MessageTuple, MessageUrl, ResolvedStatus, ResolvedUrl};
pub use network::{EdgeRow, NetworkKind, NodeAnnotation, TaggedEdge};
