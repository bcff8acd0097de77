//! Token exchange with the Bot Framework Direct Line service.
//!
//! The secret never leaves the server; the browser only receives the
//! short-lived token.

use super::client::read_json;
use super::traits::TokenProvider;
use crate::config::{parse_base_url, DirectLineConfig};
use crate::error::AppError;
use crate::models::DirectLineToken;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, instrument};

const GENERATE_PATH: &str = "tokens/generate";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    token: String,
    #[serde(rename = "expires_in")]
    expires_in: u64,
    #[serde(default)]
    conversation_id: Option<String>,
}

pub struct DirectLineClient {
    client: Client,
    config: DirectLineConfig,
}

impl DirectLineClient {
    pub fn new(client: Client, config: DirectLineConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl TokenProvider for DirectLineClient {
    #[instrument(skip(self))]
    async fn generate_token(&self) -> Result<DirectLineToken, AppError> {
        let secret = self.config.secret.as_deref().ok_or_else(|| {
            AppError::Config("DIRECT_LINE_SECRET no está configurado en las variables de entorno".to_string())
        })?;
        let url = parse_base_url(&self.config.endpoint, "DIRECT_LINE_ENDPOINT")?.join(GENERATE_PATH)?;

        let response = self
            .client
            .post(url)
            .bearer_auth(secret)
            .send()
            .await?;

        let generated: GenerateResponse = read_json(response, "Direct Line").await?;
        info!("Direct Line token issued (expires in {}s)", generated.expires_in);

        Ok(DirectLineToken {
            token: generated.token,
            expires_in: generated.expires_in,
            conversation_id: generated.conversation_id,
        })
    }
}

/// Remediation hints shown next to a failed token request.
pub fn remediation_hints(err: &AppError) -> Vec<&'static str> {
    match err {
        AppError::Config(_) => vec![
            "Define DIRECT_LINE_SECRET en el archivo .env o en las variables de entorno del servidor.",
            "El secreto se obtiene en Azure Portal > tu Bot > Canales > Direct Line.",
            "Reinicia el servidor después de cambiar la configuración.",
        ],
        AppError::Upstream { status: 401 | 403, .. } => vec![
            "El servicio rechazó el secreto de Direct Line: verifica que sea el del canal Direct Line y no el de Web Chat.",
            "Si regeneraste el secreto en Azure Portal, actualiza DIRECT_LINE_SECRET.",
        ],
        AppError::Upstream { status: 404, .. } => vec![
            "Verifica DIRECT_LINE_ENDPOINT; el valor por defecto es https://directline.botframework.com/v3/directline.",
        ],
        AppError::Upstream { status: 429, .. } => vec![
            "Se superó el límite de solicitudes de Direct Line; espera unos segundos y vuelve a intentarlo.",
        ],
        AppError::Upstream { .. } => vec![
            "El servicio de Direct Line devolvió un error; consulta el estado del servicio de Azure Bot.",
        ],
        _ => vec![
            "Verifica la conectividad de red del servidor con directline.botframework.com.",
            "Revisa si un proxy o firewall bloquea las solicitudes salientes HTTPS.",
        ],
    }
}
