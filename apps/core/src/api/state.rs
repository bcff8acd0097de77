use crate::chat::ChatDispatcher;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::providers::client::build_http_client;
use crate::providers::{
    AzureLanguageClient, AzureTranslatorClient, AzureVisionClient, DirectLineClient,
    SentimentProvider, TokenProvider, TranslationProvider, VisionProvider,
};
use crate::uploads::UploadStore;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub dispatcher: Arc<ChatDispatcher>,
    pub sentiment: Arc<dyn SentimentProvider>,
    pub translator: Arc<dyn TranslationProvider>,
    pub vision: Arc<dyn VisionProvider>,
    pub direct_line: Arc<dyn TokenProvider>,
    pub uploads: Arc<UploadStore>,
}

/// The external services used by the handlers.
pub struct Providers {
    pub sentiment: Arc<dyn SentimentProvider>,
    pub translator: Arc<dyn TranslationProvider>,
    pub vision: Arc<dyn VisionProvider>,
    pub direct_line: Arc<dyn TokenProvider>,
}

impl Providers {
    /// Azure-backed providers sharing one HTTP client.
    pub fn azure(config: &AppConfig) -> Result<Self, AppError> {
        let client = build_http_client(config.provider_timeout)?;

        Ok(Self {
            sentiment: Arc::new(AzureLanguageClient::new(client.clone(), config.language.clone())),
            translator: Arc::new(AzureTranslatorClient::new(
                client.clone(),
                config.translator.clone(),
            )),
            vision: Arc::new(AzureVisionClient::new(client.clone(), config.vision.clone())),
            direct_line: Arc::new(DirectLineClient::new(client, config.direct_line.clone())),
        })
    }
}

impl AppState {
    pub fn new(config: AppConfig, providers: Providers) -> Self {
        let dispatcher = ChatDispatcher::new(
            providers.sentiment.clone(),
            config.chat.mode,
            config.chat.session_capacity,
            config.chat.rng_seed,
        );
        let uploads = UploadStore::new(&config.server.upload_dir);

        Self {
            config: Arc::new(config),
            dispatcher: Arc::new(dispatcher),
            sentiment: providers.sentiment,
            translator: providers.translator,
            vision: providers.vision,
            direct_line: providers.direct_line,
            uploads: Arc::new(uploads),
        }
    }

    pub fn from_config(config: AppConfig) -> Result<Self, AppError> {
        let providers = Providers::azure(&config)?;
        Ok(Self::new(config, providers))
    }
}
