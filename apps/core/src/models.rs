use crate::chat::IntentLabel;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Polarity reported by the sentiment provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
    /// The provider could not be reached or rejected the document.
    Error,
}

impl SentimentLabel {
    /// Maps the label string used by the Language service. `mixed` is reported as neutral.
    pub fn from_service(label: &str) -> Self {
        match label {
            "positive" => SentimentLabel::Positive,
            "negative" => SentimentLabel::Negative,
            _ => SentimentLabel::Neutral,
        }
    }
}

/// Confidence scores, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScores {
    #[serde(rename = "positivo")]
    pub positive: f64,
    pub neutral: f64,
    #[serde(rename = "negativo")]
    pub negative: f64,
}

impl SentimentScores {
    pub fn neutral() -> Self {
        Self {
            positive: 0.0,
            neutral: 1.0,
            negative: 0.0,
        }
    }
}

/// Result of one sentiment analysis. Field names follow the JSON contract of the web UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    #[serde(rename = "sentimiento")]
    pub label: SentimentLabel,
    #[serde(rename = "puntuaciones", skip_serializing_if = "Option::is_none", default)]
    pub scores: Option<SentimentScores>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl SentimentResult {
    pub fn new(label: SentimentLabel, scores: SentimentScores) -> Self {
        Self {
            label,
            scores: Some(scores),
            error: None,
        }
    }

    /// Neutral result that still records why no analysis happened.
    pub fn neutral_fallback(reason: impl Into<String>) -> Self {
        Self {
            label: SentimentLabel::Neutral,
            scores: Some(SentimentScores::neutral()),
            error: Some(reason.into()),
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            label: SentimentLabel::Error,
            scores: None,
            error: Some(reason.into()),
        }
    }

    pub fn is_negative(&self) -> bool {
        self.label == SentimentLabel::Negative
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Reply returned by `/api/chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub success: bool,
    pub response: String,
    pub intent: IntentLabel,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub sentiment: Option<SentimentResult>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub suggestions: Vec<String>,
}

/// Body of `/api/analizar-sentimiento`.
#[derive(Debug, Deserialize)]
pub struct SentimentRequest {
    #[serde(default)]
    pub texto: String,
}

fn default_target_language() -> String {
    "en".to_string()
}

/// Body of `/api/traducir`.
#[derive(Debug, Deserialize, Validate)]
pub struct TranslationRequest {
    #[serde(default)]
    pub texto: String,
    /// Target language code, e.g. `en`, `pt-br`, `zh-Hans`.
    #[serde(default = "default_target_language")]
    #[validate(length(min = 2, max = 10))]
    pub idioma: String,
}

/// Body of `/api/chat`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Token issued by the bot connector service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectLineToken {
    pub token: String,
    pub expires_in: u64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub conversation_id: Option<String>,
}
