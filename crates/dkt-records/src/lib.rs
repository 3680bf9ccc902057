//! Owner-scoped practice records.
//!
//! Cases, clients, hearings and documents, each owned by one account and
//! guarded by the owner-or-elevated rule from [`dkt_auth::authorize`].
//!
//! - [`Record`] — Validation, ownership, and mount point of a record kind
//! - [`Store`] — Persistence, implemented for PostgreSQL and [`MemoryRecords`]
//! - [`routes`] — HTTP surface: list, create, fetch, replace, delete
mod case;
mod client;
mod document;
mod handlers;
mod hearing;
mod record;
mod status;
mod store;

pub use case::*;
pub use client::*;
pub use document::*;
pub use handlers::*;
pub use hearing::*;
pub use record::*;
pub use status::*;
pub use store::*;
