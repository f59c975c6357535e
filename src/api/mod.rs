use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::Result;
use std::time::Instant;
use tracing::{debug, error, info, instrument};

pub mod config;
pub mod handlers;
pub mod models;

use crate::api::config::ApiConfig;
use crate::store::ScreenshotStore;

/// State shared across requests that is not part of the store
pub struct ServerState {
    /// Server start time, for uptime reporting
    pub started_at: Instant,
}

/// Registers the gallery routes on an actix service config.
///
/// Split out from [`start_server`] so the in-process test harness can mount
/// the exact same route table.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/collection")
            .route(web::get().to(handlers::list_screenshots))
            .route(web::post().to(handlers::save_screenshot)),
    )
    .service(web::resource("/health").route(web::get().to(handlers::health_check)));
}

/// Starts the API server with the specified configuration
///
/// Initializes the screenshot store (creating the data directory and an
/// empty collection on first run) and serves the HTTP endpoints until
/// shutdown. The browser client is served from a different origin, so CORS
/// is left permissive.
///
/// # Arguments
/// * `host` - Host address to bind to (e.g., "127.0.0.1")
/// * `port` - Port to listen on
/// * `config` - Optional API configuration (uses defaults if None)
///
/// # Returns
/// * `Result<()>` - Success or an error
#[instrument(skip(config))]
pub async fn start_server(host: &str, port: u16, config: Option<ApiConfig>) -> Result<()> {
    info!("Starting screenshot gallery server on {}:{}", host, port);

    let config = config.unwrap_or_else(|| {
        debug!("Using default API configuration");
        ApiConfig::default()
    });

    debug!(
        "Initializing screenshot store in '{}' with payload limit {} bytes",
        config.data_dir, config.payload_limit
    );

    let store = ScreenshotStore::new(&config.data_dir);
    if let Err(e) = store.initialize().await {
        error!("Failed to initialize screenshot store: {}", e);
        return Err(e.into());
    }

    let store_data = web::Data::new(store);
    let state_data = web::Data::new(ServerState {
        started_at: Instant::now(),
    });
    let payload_limit = config.payload_limit;

    info!("Starting HTTP server at {}:{}", host, port);
    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(web::JsonConfig::default().limit(payload_limit))
            .app_data(store_data.clone())
            .app_data(state_data.clone())
            .configure(routes)
    })
    .bind((host, port))
    .map_err(|e| {
        error!("Failed to bind to {}:{}: {}", host, port, e);
        e
    })?
    .run()
    .await?;

    info!("Server shutdown complete");
    Ok(())
}
