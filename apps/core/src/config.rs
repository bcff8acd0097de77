//! Central configuration, read once from the environment at startup.
//!
//! Credentials are optional at load time. Each service validates its own
//! variables when it is first used, so a missing key only breaks the
//! endpoints that need it.

use crate::error::AppError;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;
use url::Url;

const DEFAULT_TRANSLATOR_REGION: &str = "southcentralus";
const DEFAULT_DIRECT_LINE_ENDPOINT: &str = "https://directline.botframework.com/v3/directline";
const DEFAULT_SESSION_CAPACITY: usize = 1024;
/// Upper bound on `CHAT_SESSION_CAPACITY`; the LRU allocates for it up front.
pub const MAX_SESSION_CAPACITY: usize = 100_000;
const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PORT: u16 = 5000;

/// 4 MiB, the cap on uploaded images.
pub const MAX_UPLOAD_BYTES: usize = 4 * 1024 * 1024;

/// Which dispatcher variant answers `/api/chat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatMode {
    /// FAQ table + per-session welcome + sentiment-conditioned fallback.
    #[default]
    Faq,
    /// Keyword intent + canned response, no welcome state.
    Legacy,
}

impl ChatMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatMode::Faq => "faq",
            ChatMode::Legacy => "legacy",
        }
    }
}

impl FromStr for ChatMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "faq" => Ok(ChatMode::Faq),
            "legacy" => Ok(ChatMode::Legacy),
            other => Err(AppError::Config(format!("Unknown CHAT_MODE: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Key + endpoint pair for one cognitive service.
#[derive(Debug, Clone)]
pub struct ServiceCredentials {
    key_var: &'static str,
    endpoint_var: &'static str,
    pub key: Option<String>,
    pub endpoint: Option<String>,
}

/// Credentials that passed validation.
#[derive(Debug, Clone)]
pub struct ResolvedService {
    pub key: String,
    /// Always ends with `/` so relative paths can be joined onto it.
    pub endpoint: Url,
}

impl ServiceCredentials {
    pub fn new(
        key_var: &'static str,
        endpoint_var: &'static str,
        key: Option<String>,
        endpoint: Option<String>,
    ) -> Self {
        Self {
            key_var,
            endpoint_var,
            key,
            endpoint,
        }
    }

    #[cfg(test)]
    pub fn is_configured(&self) -> bool {
        self.key.is_some() && self.endpoint.is_some()
    }

    pub fn variable_names(&self) -> (&'static str, &'static str) {
        (self.key_var, self.endpoint_var)
    }

    pub fn resolve(&self) -> Result<ResolvedService, AppError> {
        let (Some(key), Some(endpoint)) = (&self.key, &self.endpoint) else {
            return Err(AppError::Config(format!(
                "{} o {} no están configuradas en las variables de entorno",
                self.key_var, self.endpoint_var
            )));
        };

        Ok(ResolvedService {
            key: key.clone(),
            endpoint: parse_base_url(endpoint, self.endpoint_var)?,
        })
    }
}

/// Parses a base URL and guarantees a trailing slash.
pub fn parse_base_url(raw: &str, var: &str) -> Result<Url, AppError> {
    let mut normalized = raw.trim().to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    Url::parse(&normalized)
        .map_err(|e| AppError::Config(format!("{} no es una URL válida: {}", var, e)))
}

#[derive(Debug, Clone)]
pub struct TranslatorConfig {
    pub credentials: ServiceCredentials,
    pub region: String,
}

#[derive(Debug, Clone)]
pub struct DirectLineConfig {
    pub secret: Option<String>,
    pub endpoint: String,
}

/// Only reported by the preflight in legacy mode; no client uses it.
#[derive(Debug, Clone, Default)]
pub struct LuisConfig {
    pub app_id: Option<String>,
    pub key: Option<String>,
    pub endpoint: Option<String>,
}

impl LuisConfig {
    pub fn is_configured(&self) -> bool {
        self.app_id.is_some() && self.key.is_some() && self.endpoint.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub mode: ChatMode,
    pub session_capacity: usize,
    pub rng_seed: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub upload_dir: PathBuf,
    pub static_dir: PathBuf,
    pub templates_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub language: ServiceCredentials,
    pub vision: ServiceCredentials,
    pub translator: TranslatorConfig,
    pub direct_line: DirectLineConfig,
    pub luis: LuisConfig,
    pub chat: ChatConfig,
    pub provider_timeout: Duration,
}

impl AppConfig {
    /// Loads `.env` (if any) and then reads the process environment.
    pub fn from_env() -> Self {
        // A missing .env is normal in production.
        dotenv::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let mode = match var("CHAT_MODE") {
            Some(raw) => raw.parse().unwrap_or_else(|e: AppError| {
                warn!("{}, falling back to faq", e);
                ChatMode::Faq
            }),
            None => ChatMode::Faq,
        };

        let log_format = match var("LOG_FORMAT").map(|v| v.to_lowercase()) {
            Some(ref v) if v == "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Self {
            server: ServerConfig {
                host: var("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
                port: parse_or(var("SERVER_PORT"), "SERVER_PORT", DEFAULT_PORT),
                upload_dir: PathBuf::from(var("UPLOAD_DIR").unwrap_or_else(|| "uploads".into())),
                static_dir: PathBuf::from(var("STATIC_DIR").unwrap_or_else(|| "static".into())),
                templates_dir: PathBuf::from(
                    var("TEMPLATES_DIR").unwrap_or_else(|| "templates".into()),
                ),
                max_upload_bytes: MAX_UPLOAD_BYTES,
                log_format,
            },
            language: ServiceCredentials::new(
                "LANGUAGE_KEY",
                "LANGUAGE_ENDPOINT",
                var("LANGUAGE_KEY"),
                var("LANGUAGE_ENDPOINT"),
            ),
            vision: ServiceCredentials::new(
                "VISION_KEY",
                "VISION_ENDPOINT",
                var("VISION_KEY"),
                var("VISION_ENDPOINT"),
            ),
            translator: TranslatorConfig {
                credentials: ServiceCredentials::new(
                    "TRANSLATOR_KEY",
                    "TRANSLATOR_ENDPOINT",
                    var("TRANSLATOR_KEY"),
                    var("TRANSLATOR_ENDPOINT"),
                ),
                region: var("TRANSLATOR_REGION")
                    .unwrap_or_else(|| DEFAULT_TRANSLATOR_REGION.to_string()),
            },
            direct_line: DirectLineConfig {
                secret: var("DIRECT_LINE_SECRET"),
                endpoint: var("DIRECT_LINE_ENDPOINT")
                    .unwrap_or_else(|| DEFAULT_DIRECT_LINE_ENDPOINT.to_string()),
            },
            luis: LuisConfig {
                app_id: var("LUIS_APP_ID"),
                key: var("LUIS_KEY"),
                endpoint: var("LUIS_ENDPOINT"),
            },
            chat: ChatConfig {
                mode,
                session_capacity: session_capacity(var("CHAT_SESSION_CAPACITY")),
                rng_seed: var("CHAT_RNG_SEED").and_then(|raw| match raw.parse() {
                    Ok(seed) => Some(seed),
                    Err(e) => {
                        warn!("Ignoring invalid CHAT_RNG_SEED '{}': {}", raw, e);
                        None
                    }
                }),
            },
            provider_timeout: Duration::from_secs(parse_or(
                var("PROVIDER_TIMEOUT_SECS"),
                "PROVIDER_TIMEOUT_SECS",
                DEFAULT_PROVIDER_TIMEOUT_SECS,
            )),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn session_capacity(raw: Option<String>) -> usize {
    let capacity = parse_or(raw, "CHAT_SESSION_CAPACITY", DEFAULT_SESSION_CAPACITY);
    if capacity > MAX_SESSION_CAPACITY {
        warn!(
            "CHAT_SESSION_CAPACITY {} exceeds the maximum, using {}",
            capacity, MAX_SESSION_CAPACITY
        );
        return MAX_SESSION_CAPACITY;
    }
    capacity.max(1)
}

fn parse_or<T>(raw: Option<String>, name: &str, default: T) -> T
where
    T: FromStr + Copy,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(value) => value.trim().parse().unwrap_or_else(|e| {
            warn!("Invalid {} '{}': {}, using default", name, value, e);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.chat.mode, ChatMode::Faq);
        assert_eq!(config.chat.session_capacity, 1024);
        assert_eq!(config.translator.region, "southcentralus");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.max_upload_bytes, 4 * 1024 * 1024);
        assert_eq!(config.provider_timeout, Duration::from_secs(30));
        assert!(!config.language.is_configured());
        assert_eq!(
            config.direct_line.endpoint,
            "https://directline.botframework.com/v3/directline"
        );
    }

    #[test]
    fn test_missing_credentials_fail_at_resolve() {
        let config = config_from(&[("LANGUAGE_KEY", "abc")]);
        let err = config.language.resolve().unwrap_err();
        assert!(err.is_config());
        assert!(err.message().contains("LANGUAGE_KEY"));
        assert!(err.message().contains("LANGUAGE_ENDPOINT"));
    }

    #[test]
    fn test_resolve_appends_trailing_slash() {
        let config = config_from(&[
            ("VISION_KEY", "k"),
            ("VISION_ENDPOINT", "https://example.cognitiveservices.azure.com"),
        ]);
        let resolved = config.vision.resolve().unwrap();
        assert_eq!(
            resolved.endpoint.as_str(),
            "https://example.cognitiveservices.azure.com/"
        );
        assert_eq!(resolved.key, "k");
    }

    #[test]
    fn test_invalid_endpoint_is_config_error() {
        let config = config_from(&[("VISION_KEY", "k"), ("VISION_ENDPOINT", "not a url")]);
        let err = config.vision.resolve().unwrap_err();
        assert!(err.is_config());
        assert!(err.message().contains("VISION_ENDPOINT"));
    }

    #[test]
    fn test_blank_values_are_treated_as_missing() {
        let config = config_from(&[("TRANSLATOR_KEY", "   "), ("TRANSLATOR_ENDPOINT", "https://x/")]);
        assert!(!config.translator.credentials.is_configured());
    }

    #[test]
    fn test_chat_mode_and_bad_numbers() {
        let config = config_from(&[
            ("CHAT_MODE", "Legacy"),
            ("CHAT_SESSION_CAPACITY", "lots"),
            ("CHAT_RNG_SEED", "42"),
            ("SERVER_PORT", "8080"),
        ]);
        assert_eq!(config.chat.mode, ChatMode::Legacy);
        assert_eq!(config.chat.session_capacity, 1024);
        assert_eq!(config.chat.rng_seed, Some(42));
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_unknown_chat_mode_falls_back() {
        let config = config_from(&[("CHAT_MODE", "luis")]);
        assert_eq!(config.chat.mode, ChatMode::Faq);
    }
}
