//! Image captioning backed by the Azure Computer Vision v3.2 REST API.

use super::client::{read_json, SUBSCRIPTION_KEY_HEADER};
use super::traits::VisionProvider;
use crate::config::ServiceCredentials;
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, instrument, warn};

const DESCRIBE_PATH: &str = "vision/v3.2/describe";
const CAPTION_LANGUAGE: &str = "es";

pub const NO_IMAGE: &str = "No se proporcionó una imagen válida";
pub const UNSUPPORTED_IMAGE: &str = "Tipo de imagen no soportado";
pub const NO_CAPTION: &str = "No se pudo generar una descripción para la imagen";

#[derive(Debug, Deserialize)]
struct DescribeResponse {
    description: Description,
}

#[derive(Debug, Deserialize)]
struct Description {
    #[serde(default)]
    captions: Vec<Caption>,
}

#[derive(Debug, Deserialize)]
struct Caption {
    text: String,
    #[serde(default)]
    confidence: f64,
}

pub struct AzureVisionClient {
    client: Client,
    credentials: ServiceCredentials,
}

impl AzureVisionClient {
    pub fn new(client: Client, credentials: ServiceCredentials) -> Self {
        Self {
            client,
            credentials,
        }
    }
}

#[async_trait]
impl VisionProvider for AzureVisionClient {
    #[instrument(skip(self, image), fields(bytes = image.len()))]
    async fn describe(&self, image: Vec<u8>) -> Result<String, AppError> {
        let service = self.credentials.resolve()?;
        let url = service.endpoint.join(DESCRIBE_PATH)?;

        let response = self
            .client
            .post(url)
            .query(&[("maxCandidates", "1"), ("language", CAPTION_LANGUAGE)])
            .header(SUBSCRIPTION_KEY_HEADER, &service.key)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(image)
            .send()
            .await?;

        let parsed: DescribeResponse = read_json(response, "Vision").await?;

        match parsed.description.captions.into_iter().next() {
            Some(caption) => {
                info!("Caption ({:.2}): {}", caption.confidence, caption.text);
                Ok(caption.text)
            }
            None => Ok(NO_CAPTION.to_string()),
        }
    }
}

/// Validates the bytes, then captions them. Provider failures become a
/// readable error string; missing configuration is returned as an error.
pub async fn describe_image(provider: &dyn VisionProvider, image: Vec<u8>) -> Result<String, AppError> {
    if image.is_empty() {
        return Ok(NO_IMAGE.to_string());
    }
    if !infer::is_image(&image) {
        return Ok(UNSUPPORTED_IMAGE.to_string());
    }

    match provider.describe(image).await {
        Ok(caption) => Ok(caption),
        Err(e) if e.is_config() => Err(e),
        Err(e) => {
            warn!("Image description degraded: {}", e);
            Ok(format!("Error al analizar la imagen: {}", e.message()))
        }
    }
}
