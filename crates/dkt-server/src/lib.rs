//! Practice Backend Server
//!
//! Wires configuration, storage, the route guard and every HTTP surface
//! into a single actix-web server.
//!
//! ## Submodules
//!
//! - [`config`] — Command line and environment configuration
//! - [`health`] — Liveness endpoint
mod config;
mod health;

pub use config::*;
pub use health::*;


use actix_cors::Cors;
use actix_web::App;
use actix_web::Error;
use actix_web::HttpServer;
use actix_web::body::MessageBody;
use actix_web::dev::ServiceFactory;
use actix_web::dev::ServiceRequest;
use actix_web::dev::ServiceResponse;
use actix_web::error::JsonPayloadError;
use actix_web::middleware::DefaultHeaders;
use actix_web::middleware::Logger;
use actix_web::middleware::from_fn;
use actix_web::web;
use clap::Parser;
use dkt_auth::Account;
use dkt_auth::Accounts;
use dkt_auth::ApiError;
use dkt_auth::Codec;
use dkt_auth::FieldError;
use dkt_auth::Limiter;
use dkt_auth::Window;
use dkt_pg::Schema;
use dkt_records::Case;
use dkt_records::Document;
use dkt_records::Hearing;
use dkt_records::Stores;
use std::sync::Arc;
use std::time::Duration;

/// How often closed rate-limit windows are dropped.
const SWEEP: Duration = Duration::from_secs(60);

/// Shared handles cloned into every worker.
pub struct State<A, S> {
    pub accounts: web::Data<A>,
    pub records: web::Data<S>,
    pub codec: web::Data<Codec>,
    pub limiter: web::Data<dyn Limiter>,
}

impl<A, S> Clone for State<A, S> {
    fn clone(&self) -> Self {
        Self {
            accounts: self.accounts.clone(),
            records: self.records.clone(),
            codec: self.codec.clone(),
            limiter: self.limiter.clone(),
        }
    }
}

fn security_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("X-Content-Type-Options", "nosniff"))
        .add(("X-Frame-Options", "DENY"))
        .add(("X-XSS-Protection", "1; mode=block"))
        .add(("Referrer-Policy", "strict-origin-when-cross-origin"))
        .add(("Permissions-Policy", "camera=(), microphone=(), geolocation=()"))
}

/// Well-formed JSON of the wrong shape reports the decoder's message;
/// anything unparseable is a plain bad request.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|e, _| {
        log::debug!("rejected request body: {}", e);
        match e {
            JsonPayloadError::Deserialize(e) if e.is_data() => {
                ApiError::Validation(vec![FieldError::new("body", e.to_string())]).into()
            }
            _ => ApiError::BadRequest("Invalid request body").into(),
        }
    })
}

/// Full application for one worker. The route guard fronts every handler
/// and sits inside the logging, CORS and header layers, so its denials are
/// logged and hardened and CORS preflights are answered without a session.
#[rustfmt::skip]
pub fn app<A, S>(
    state: State<A, S>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    A: Accounts + 'static,
    S: Stores + Probe + 'static,
{
    App::new()
        .wrap(from_fn(dkt_auth::guard))
        .wrap(security_headers())
        .wrap(
            Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header(),
        )
        .wrap(Logger::new("%r %s %Ts"))
        .app_data(state.accounts)
        .app_data(state.records)
        .app_data(state.codec)
        .app_data(state.limiter)
        .app_data(json_config())
        .route("/api/health", web::get().to(health::<S>))
        .configure(dkt_auth::routes::<A>)
        .configure(dkt_records::routes::<A, S>)
}

fn sweep(window: Arc<Window>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SWEEP);
        loop {
            interval.tick().await;
            match window.sweep() {
                0 => continue,
                n => log::debug!("swept {} rate limit windows", n),
            }
        }
    });
}

pub async fn run() -> anyhow::Result<()> {
    let config = Config::parse();
    let codec = config.codec()?;
    let client = dkt_pg::db(&config.database_url).await?;
    dkt_pg::migrate(
        &client,
        &[
            Account::ddl(),
            Case::ddl(),
            dkt_records::Client::ddl(),
            Hearing::ddl(),
            Document::ddl(),
        ],
    )
    .await?;
    let window = Arc::new(Window::auth());
    sweep(window.clone());
    let state = State {
        accounts: web::Data::new(client.clone()),
        records: web::Data::new(client),
        codec: web::Data::new(codec),
        limiter: web::Data::from(window as Arc<dyn Limiter>),
    };
    log::info!("starting server on {} ({:?})", config.bind, config.environment);
    HttpServer::new(move || app(state.clone()))
        .workers(config.workers)
        .bind(&config.bind)?
        .run()
        .await?;
    Ok(())
}
