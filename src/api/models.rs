use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Request to save a screenshot into the gallery
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SaveScreenshotRequest {
    /// Caller-supplied label, a filename or formatted capture time
    pub title: String,

    /// Inline image payload as a data URI; stored verbatim, never inspected
    pub image_data: String,
}

/// Confirmation body for a successful save
#[derive(Debug, Serialize)]
pub struct SaveConfirmation {
    /// Short human-readable confirmation
    pub message: String,
}

/// Error response for API endpoints
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Short error message; internal detail stays in the log
    pub error: String,
}

/// Health status response for the /health endpoint
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    /// Status indicator: healthy or degraded
    pub status: String,

    /// Number of screenshots currently in the collection
    pub screenshots: usize,

    /// Time since the server started
    pub uptime: Duration,
}
