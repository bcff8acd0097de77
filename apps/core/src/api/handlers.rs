//! Request handlers for the `/api` routes.

use super::error::{ApiError, ApiResult, Envelope};
use super::state::AppState;
use crate::chat::DEFAULT_SESSION_ID;
use crate::error::AppError;
use crate::models::{ChatReply, ChatRequest, SentimentLabel, SentimentRequest, TranslationRequest};
use crate::preflight::run_preflight_checks;
use crate::providers::direct_line::remediation_hints;
use crate::providers::translator::translate_text;
use crate::providers::vision::describe_image;
use crate::uploads::secure_filename;
use axum::{
    extract::{multipart::MultipartRejection, rejection::JsonRejection, Multipart, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::{info, instrument, warn};
use validator::Validate;

const SUCCESS: &str = "éxito";
const IMAGE_FIELD: &str = "imagen";
const MISSING_TEXT: &str = "No se proporcionó texto";
const MISSING_TRANSLATION_TEXT: &str = "No se proporcionó texto para traducir";
const MISSING_IMAGE: &str = "No se proporcionó ninguna imagen o el campo no se llama 'imagen'";
const EMPTY_FILENAME: &str = "No se seleccionó ningún archivo";
const EMPTY_MESSAGE: &str = "El mensaje no puede estar vacío";

/// POST /api/analizar-sentimiento
#[instrument(skip_all)]
pub async fn analyze_sentiment(
    State(state): State<AppState>,
    payload: Result<Json<SentimentRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(request) = payload.map_err(ApiError::from_json_rejection)?;
    if request.texto.trim().is_empty() {
        return Err(ApiError::bad_request(MISSING_TEXT));
    }

    let result = state.sentiment.analyze(&request.texto).await?;
    if result.label == SentimentLabel::Error {
        let message = result.error.unwrap_or_else(|| "Error al analizar el texto".to_string());
        warn!("Sentiment provider rejected the text: {}", message);
        return Err(ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "ProviderError",
            message,
        ));
    }

    Ok(Json(json!({ "estado": SUCCESS, "resultado": result })))
}

/// POST /api/traducir
#[instrument(skip_all)]
pub async fn translate(
    State(state): State<AppState>,
    payload: Result<Json<TranslationRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(request) = payload.map_err(ApiError::from_json_rejection)?;
    if request.texto.trim().is_empty() {
        return Err(ApiError::bad_request(MISSING_TRANSLATION_TEXT));
    }
    request.validate().map_err(AppError::from)?;

    let traduccion = translate_text(state.translator.as_ref(), &request.texto, &request.idioma).await?;

    Ok(Json(json!({ "estado": SUCCESS, "traduccion": traduccion })))
}

/// POST /api/analizar-imagen
///
/// The stored copy of the upload is removed when this handler returns,
/// whatever the outcome.
#[instrument(skip_all)]
pub async fn analyze_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<Value>> {
    let mut multipart = multipart.map_err(|rejection| {
        warn!("Not a multipart request: {}", rejection.body_text());
        ApiError::bad_request(MISSING_IMAGE)
    })?;

    let (original_name, data) = loop {
        let Some(field) = multipart.next_field().await.map_err(ApiError::from_multipart)? else {
            warn!("Field '{}' not found in the request", IMAGE_FIELD);
            return Err(ApiError::bad_request(MISSING_IMAGE));
        };
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        if file_name.is_empty() {
            return Err(ApiError::bad_request(EMPTY_FILENAME));
        }
        info!(
            "Received file {} ({})",
            file_name,
            field.content_type().unwrap_or("unknown")
        );

        let data = field.bytes().await.map_err(ApiError::from_multipart)?;
        break (file_name, data);
    };

    let filename = secure_filename(&original_name);
    let descripcion = process_image(&state, &filename, &data)
        .await
        .map_err(|e| {
            ApiError::from_app(&e).with_message(format!("Error al procesar la imagen: {}", e.message()))
        })?;

    info!("Image analysis finished: {}", descripcion);
    Ok(Json(json!({
        "estado": SUCCESS,
        "descripcion": descripcion,
        "nombre_archivo": filename,
    })))
}

async fn process_image(state: &AppState, filename: &str, data: &[u8]) -> Result<String, AppError> {
    state.uploads.init()?;
    let upload = state.uploads.store(filename, data)?;
    if !upload.path().exists() {
        return Err(AppError::Internal("No se pudo guardar el archivo temporal".to_string()));
    }

    let bytes = tokio::fs::read(upload.path()).await?;
    describe_image(state.vision.as_ref(), bytes).await
}

/// POST /api/chat
#[instrument(skip_all)]
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> ApiResult<Json<ChatReply>> {
    let Json(request) = payload
        .map_err(|rejection| ApiError::from_json_rejection(rejection).with_envelope(Envelope::Success))?;

    let message = request.message.trim();
    if message.is_empty() {
        return Err(ApiError::bad_request(EMPTY_MESSAGE).with_envelope(Envelope::Success));
    }

    let session_id = request
        .session_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .unwrap_or(DEFAULT_SESSION_ID);

    Ok(Json(state.dispatcher.handle(session_id, message).await))
}

/// GET|POST /api/directline/token
#[instrument(skip_all)]
pub async fn direct_line_token(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let err = match state.direct_line.generate_token().await {
        Ok(token) => {
            return Ok(Json(json!({
                "success": true,
                "token": token.token,
                "expires_in": token.expires_in,
                "conversation_id": token.conversation_id,
            })))
        }
        Err(e) => e,
    };

    let mut details = json!({ "hints": remediation_hints(&err) });
    let mut api_error = ApiError::from_app(&err).with_envelope(Envelope::Success);

    if let AppError::Upstream { status, body, .. } = &err {
        details["status"] = json!(status);
        details["details"] = json!(body);
        api_error = api_error
            .with_status(StatusCode::BAD_GATEWAY)
            .with_message(format!(
                "El servicio de Direct Line rechazó la solicitud (estado {})",
                status
            ));
    }

    Err(api_error.with_details(details))
}

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let report = run_preflight_checks(&state.config);
    let status = if report.ready_to_serve { "ok" } else { "degraded" };
    let sessions = state.dispatcher.session_count().await;

    Json(json!({
        "status": status,
        "chat_mode": state.dispatcher.mode().as_str(),
        "chat_sessions": sessions,
        "preflight": report,
    }))
}
