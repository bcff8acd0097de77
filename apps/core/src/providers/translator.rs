//! Translation backed by the Azure Translator v3 REST API.

use super::client::{read_json, SUBSCRIPTION_KEY_HEADER, SUBSCRIPTION_REGION_HEADER};
use super::traits::TranslationProvider;
use crate::config::TranslatorConfig;
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{instrument, warn};

const TRANSLATE_PATH: &str = "translate";
const API_VERSION: &str = "3.0";
pub const NO_TRANSLATION: &str = "No se pudo traducir el texto";

#[derive(Debug, Deserialize)]
struct TranslationItem {
    #[serde(default)]
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    text: String,
}

pub struct AzureTranslatorClient {
    client: Client,
    config: TranslatorConfig,
}

impl AzureTranslatorClient {
    pub fn new(client: Client, config: TranslatorConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl TranslationProvider for AzureTranslatorClient {
    #[instrument(skip(self, text))]
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, AppError> {
        let service = self.config.credentials.resolve()?;
        let url = service.endpoint.join(TRANSLATE_PATH)?;

        let response = self
            .client
            .post(url)
            .query(&[("api-version", API_VERSION), ("to", target_language)])
            .header(SUBSCRIPTION_KEY_HEADER, &service.key)
            .header(SUBSCRIPTION_REGION_HEADER, &self.config.region)
            .json(&json!([{ "Text": text }]))
            .send()
            .await?;

        let items: Vec<TranslationItem> = read_json(response, "Translator").await?;

        Ok(items
            .into_iter()
            .next()
            .and_then(|item| item.translations.into_iter().next())
            .map(|t| t.text)
            .unwrap_or_else(|| NO_TRANSLATION.to_string()))
    }
}

/// Empty input short-circuits to an empty string. Provider failures become a
/// readable error string; missing configuration is returned as an error.
pub async fn translate_text(
    provider: &dyn TranslationProvider,
    text: &str,
    target_language: &str,
) -> Result<String, AppError> {
    if text.trim().is_empty() {
        return Ok(String::new());
    }

    match provider.translate(text, target_language).await {
        Ok(translated) => Ok(translated),
        Err(e) if e.is_config() => Err(e),
        Err(e) => {
            warn!("Translation degraded: {}", e);
            Ok(format!("Error al traducir: {}", e.message()))
        }
    }
}
