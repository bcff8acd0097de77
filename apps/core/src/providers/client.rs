//! Shared HTTP plumbing for the cognitive-service clients.

use crate::error::AppError;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::warn;

pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
pub const SUBSCRIPTION_REGION_HEADER: &str = "Ocp-Apim-Subscription-Region";

/// Upstream error bodies are truncated to this many characters before being surfaced.
const MAX_ERROR_BODY_CHARS: usize = 512;

/// One client per process; reqwest pools connections internally.
pub fn build_http_client(timeout: Duration) -> Result<Client, AppError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))
}

/// Checks the status and decodes the JSON body.
pub async fn read_json<T: DeserializeOwned>(
    response: Response,
    service: &'static str,
) -> Result<T, AppError> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let body: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
        warn!("{} responded with status {}: {}", service, status, body);
        return Err(AppError::Upstream {
            service,
            status: status.as_u16(),
            body,
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| AppError::Provider(format!("{} returned an unreadable response: {}", service, e)))
}
