//! Sentiment analysis backed by the Azure AI Language REST API.

use super::client::{read_json, SUBSCRIPTION_KEY_HEADER};
use super::traits::SentimentProvider;
use crate::config::ServiceCredentials;
use crate::error::AppError;
use crate::models::{SentimentLabel, SentimentResult, SentimentScores};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};

const SENTIMENT_PATH: &str = "text/analytics/v3.1/sentiment";
const DOCUMENT_LANGUAGE: &str = "es";
pub const INVALID_INPUT: &str = "Texto de entrada no válido";

#[derive(Debug, Deserialize)]
struct SentimentResponse {
    #[serde(default)]
    documents: Vec<DocumentSentiment>,
    #[serde(default)]
    errors: Vec<DocumentError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentSentiment {
    sentiment: String,
    confidence_scores: ConfidenceScores,
}

#[derive(Debug, Deserialize)]
struct ConfidenceScores {
    positive: f64,
    neutral: f64,
    negative: f64,
}

#[derive(Debug, Deserialize)]
struct DocumentError {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

pub struct AzureLanguageClient {
    client: Client,
    credentials: ServiceCredentials,
}

impl AzureLanguageClient {
    pub fn new(client: Client, credentials: ServiceCredentials) -> Self {
        Self {
            client,
            credentials,
        }
    }
}

#[async_trait]
impl SentimentProvider for AzureLanguageClient {
    #[instrument(skip(self, text), fields(chars = text.chars().count()))]
    async fn analyze(&self, text: &str) -> Result<SentimentResult, AppError> {
        let service = self.credentials.resolve()?;
        let url = service.endpoint.join(SENTIMENT_PATH)?;

        let payload = json!({
            "documents": [{"id": "1", "language": DOCUMENT_LANGUAGE, "text": text}]
        });

        let response = self
            .client
            .post(url)
            .header(SUBSCRIPTION_KEY_HEADER, &service.key)
            .json(&payload)
            .send()
            .await?;

        let parsed: SentimentResponse = read_json(response, "Language").await?;

        if let Some(doc) = parsed.documents.into_iter().next() {
            let label = SentimentLabel::from_service(&doc.sentiment);
            info!("Sentiment: {} -> {:?}", doc.sentiment, label);
            return Ok(SentimentResult::new(
                label,
                SentimentScores {
                    positive: doc.confidence_scores.positive,
                    neutral: doc.confidence_scores.neutral,
                    negative: doc.confidence_scores.negative,
                },
            ));
        }

        let detail = parsed
            .errors
            .first()
            .map(|e| format!("{} ({})", e.error.message, e.error.code))
            .unwrap_or_else(|| "Respuesta inválida".to_string());
        warn!("Language service rejected the document: {}", detail);
        Ok(SentimentResult::failed(format!(
            "Error al analizar el texto: {}",
            detail
        )))
    }
}

/// Never fails: empty input yields a neutral result and provider failures an
/// `error`-labelled one.
pub async fn analyze_sentiment(provider: &dyn SentimentProvider, text: &str) -> SentimentResult {
    if text.trim().is_empty() {
        return SentimentResult::neutral_fallback(INVALID_INPUT);
    }

    match provider.analyze(text).await {
        Ok(result) => result,
        Err(e) => {
            warn!("Sentiment analysis degraded: {}", e);
            SentimentResult::failed(format!("Error inesperado: {}", e.message()))
        }
    }
}
