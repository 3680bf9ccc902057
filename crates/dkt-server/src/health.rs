use actix_web::HttpResponse;
use actix_web::web;
use std::sync::Arc;
use tokio_postgres::Client;

/// Liveness of the backing store.
#[allow(async_fn_in_trait)]
pub trait Probe {
    async fn ping(&self) -> Result<(), String>;
}

impl Probe for Arc<Client> {
    async fn ping(&self) -> Result<(), String> {
        self.execute("SELECT 1", &[])
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}

impl Probe for dkt_records::MemoryRecords {
    async fn ping(&self) -> Result<(), String> {
        Ok(())
    }
}

pub const SERVICE: &str = "docket";

pub async fn health<P: Probe + 'static>(probe: web::Data<P>) -> HttpResponse {
    let timestamp = chrono::Utc::now().to_rfc3339();
    match probe
        .get_ref()
        .ping()
        .await
        .inspect_err(|e| log::error!("health check failed: {}", e))
    {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "status": "healthy",
            "timestamp": timestamp,
            "service": SERVICE,
        })),
        Err(_) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": "Service unavailable",
            "timestamp": timestamp,
            "service": SERVICE,
        })),
    }
}
