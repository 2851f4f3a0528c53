use tracing::warn;

use crate::api::ApiClient;

/// Shown when the backend cannot be reached or answers with an error.
pub const API_UNAVAILABLE: &str = "API not available";

/// One-line backend status for display. Never fails.
pub async fn api_status(api: &ApiClient) -> String {
    match api.health_check().await {
        Ok(health) => {
            if !health.is_healthy() {
                warn!(status = %health.status, "backend reports degraded health");
            }
            health.message
        }
        Err(e) => {
            warn!(error = %e, base_url = %api.base_url(), "health check failed");
            API_UNAVAILABLE.to_string()
        }
    }
}
