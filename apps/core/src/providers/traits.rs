use crate::error::AppError;
use crate::models::{DirectLineToken, SentimentResult};
use async_trait::async_trait;

/// Text sentiment analysis.
///
/// Implementations return errors as-is; callers that must not fail use
/// [`crate::providers::language::analyze_sentiment`].
#[async_trait]
pub trait SentimentProvider: Send + Sync + 'static {
    async fn analyze(&self, text: &str) -> Result<SentimentResult, AppError>;
}

/// Text translation with automatic source-language detection.
#[async_trait]
pub trait TranslationProvider: Send + Sync + 'static {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, AppError>;
}

/// Image captioning.
#[async_trait]
pub trait VisionProvider: Send + Sync + 'static {
    async fn describe(&self, image: Vec<u8>) -> Result<String, AppError>;
}

/// Issues short-lived tokens for the web chat client.
#[async_trait]
pub trait TokenProvider: Send + Sync + 'static {
    async fn generate_token(&self) -> Result<DirectLineToken, AppError>;
}
