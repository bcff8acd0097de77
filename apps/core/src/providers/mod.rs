//! # Providers
//!
//! Thin clients for the external AI services, each behind a trait so the
//! dispatcher and handlers can be exercised with mocks.
//!
//! ## Components
//! - `traits`: provider seams
//! - `client`: shared reqwest helpers
//! - `language`: sentiment analysis
//! - `translator`: text translation
//! - `vision`: image captioning
//! - `direct_line`: bot connector tokens

pub mod client;
pub mod direct_line;
pub mod language;
pub mod traits;
pub mod translator;
pub mod vision;

pub use direct_line::DirectLineClient;
pub use language::AzureLanguageClient;
pub use traits::{SentimentProvider, TokenProvider, TranslationProvider, VisionProvider};
pub use translator::AzureTranslatorClient;
pub use vision::AzureVisionClient;
