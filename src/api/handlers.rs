use actix_web::{web, HttpResponse, Responder};
use tracing::{debug, error, info, instrument, warn};

use crate::api::models::{ErrorResponse, HealthStatus, SaveConfirmation, SaveScreenshotRequest};
use crate::api::ServerState;
use crate::store::ScreenshotStore;

/// HTTP handler for listing the stored screenshot collection
///
/// Reads the full collection from the store and returns it in insertion
/// order. Store failures become a generic 500 with a short message; the
/// underlying detail goes to the log only.
///
/// # Arguments
/// * `store` - Shared screenshot store
///
/// # Returns
/// * HTTP response with the JSON array of records or error information
#[instrument(skip(store))]
pub async fn list_screenshots(store: web::Data<ScreenshotStore>) -> impl Responder {
    debug!("Received list request");

    match store.list().await {
        Ok(records) => {
            info!("Returning {} screenshot(s)", records.len());
            HttpResponse::Ok().json(records)
        }
        Err(e) => {
            error!("Failed to read screenshot collection: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Error reading screenshots".to_string(),
            })
        }
    }
}

/// HTTP handler for saving a screenshot
///
/// Appends the submitted record to the collection. The payload is passed
/// through to the store opaquely; presence of `title` and `imageData` is the
/// only check, enforced by deserialization before this handler runs.
///
/// # Arguments
/// * `request` - JSON body with `title` and `imageData`
/// * `store` - Shared screenshot store
///
/// # Returns
/// * 201 with a confirmation body, or 500 with error information
#[instrument(skip(request, store), fields(title = %request.title))]
pub async fn save_screenshot(
    request: web::Json<SaveScreenshotRequest>,
    store: web::Data<ScreenshotStore>,
) -> impl Responder {
    let request = request.into_inner();
    info!("Received save request for '{}'", request.title);

    match store.append(&request.title, &request.image_data).await {
        Ok(record) => {
            debug!("Stored screenshot with id {}", record.id);
            HttpResponse::Created().json(SaveConfirmation {
                message: "Screenshot saved successfully".to_string(),
            })
        }
        Err(e) => {
            error!("Failed to save screenshot '{}': {}", request.title, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Error saving screenshot".to_string(),
            })
        }
    }
}

/// Health check endpoint for monitoring service status
///
/// Reports `healthy` with the current collection size when the backing file
/// reads cleanly, `degraded` otherwise, along with server uptime.
#[instrument(skip(store, state))]
pub async fn health_check(
    store: web::Data<ScreenshotStore>,
    state: web::Data<ServerState>,
) -> impl Responder {
    debug!("Processing health check request");

    let (status, screenshots) = match store.list().await {
        Ok(records) => ("healthy", records.len()),
        Err(e) => {
            warn!("Health check: collection unreadable: {}", e);
            ("degraded", 0)
        }
    };

    info!("Health check: status={}, screenshots={}", status, screenshots);
    HttpResponse::Ok().json(HealthStatus {
        status: status.to_string(),
        screenshots,
        uptime: state.started_at.elapsed(),
    })
}
