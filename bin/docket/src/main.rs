//! Practice Backend Binary
//!
//! Reads configuration from flags or the environment (BIND_ADDR,
//! DATABASE_URL, JWT_SECRET, APP_ENV, WORKERS), migrates the schema and
//! serves the HTTP API.

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dkt_core::log();
    dkt_core::kys();
    dkt_server::run().await
}
