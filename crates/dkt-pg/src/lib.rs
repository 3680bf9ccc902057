//! PostgreSQL connectivity and schema metadata.
//!
//! ## Connectivity
//!
//! - [`db()`] — Establishes a database connection from a URL
//! - [`migrate()`] — Runs idempotent table and index creation
//!
//! ## Metadata
//!
//! - [`Schema`] — Table metadata and DDL generation
//! - [`StoreError`] — Repository failure with unique violations split out
//!
//! ## Table Names
//!
//! Constants for every persistent entity: accounts and the four
//! owner-scoped record kinds.
mod error;
mod schema;

pub use error::*;
pub use schema::*;

use std::sync::Arc;
use tokio_postgres::Client;

/// Establishes a database connection.
///
/// Returns an `Arc<Client>` suitable for sharing across actix workers.
/// The connection task is spawned onto the current runtime and logs
/// when it terminates.
pub async fn db(url: &str) -> Result<Arc<Client>, PgErr> {
    log::info!("connecting to database");
    let tls = tokio_postgres::tls::NoTls;
    let (client, connection) = tokio_postgres::connect(url, tls).await?;
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            log::error!("database connection closed: {}", e);
        }
    });
    client
        .execute("SET client_min_messages TO WARNING", &[])
        .await?;
    Ok(Arc::new(client))
}

/// Creates tables and indices for each schema, in order.
///
/// Order matters for foreign keys: referenced tables come first.
pub async fn migrate(client: &Client, schemas: &[(&str, &str, &str)]) -> Result<(), PgErr> {
    for (name, creates, indices) in schemas {
        log::info!("ensuring table ({})", name);
        client.batch_execute(creates).await?;
        client.batch_execute(indices).await?;
    }
    Ok(())
}

/// PostgreSQL error type alias.
pub type PgErr = tokio_postgres::Error;

/// Table for registered user accounts.
#[rustfmt::skip]
pub const USERS:     &str = "users";
/// Table for legal cases.
#[rustfmt::skip]
pub const CASES:     &str = "cases";
/// Table for clients of the practice.
#[rustfmt::skip]
pub const CLIENTS:   &str = "clients";
/// Table for scheduled court hearings.
#[rustfmt::skip]
pub const HEARINGS:  &str = "hearings";
/// Table for document metadata.
#[rustfmt::skip]
pub const DOCUMENTS: &str = "documents";
