//! Provider Tests
//!
//! Azure clients exercised against a local wiremock server, plus the
//! degrading wrappers used by the handlers.

use super::mocks::{png_bytes, Behaviour, MockSentiment, MockTranslator, MockVision};
use crate::config::{DirectLineConfig, ServiceCredentials, TranslatorConfig};
use crate::error::AppError;
use crate::models::SentimentLabel;
use crate::providers::client::build_http_client;
use crate::providers::direct_line::remediation_hints;
use crate::providers::language::{analyze_sentiment, INVALID_INPUT};
use crate::providers::translator::{translate_text, NO_TRANSLATION};
use crate::providers::vision::{describe_image, NO_CAPTION, NO_IMAGE, UNSUPPORTED_IMAGE};
use crate::providers::{
    AzureLanguageClient, AzureTranslatorClient, AzureVisionClient, DirectLineClient,
    SentimentProvider, TokenProvider, TranslationProvider, VisionProvider,
};
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Fixtures
// ============================================================================

fn client() -> Client {
    build_http_client(Duration::from_secs(5)).unwrap()
}

fn credentials(key_var: &'static str, endpoint_var: &'static str, endpoint: &str) -> ServiceCredentials {
    ServiceCredentials::new(key_var, endpoint_var, Some("test-key".into()), Some(endpoint.into()))
}

fn missing(key_var: &'static str, endpoint_var: &'static str) -> ServiceCredentials {
    ServiceCredentials::new(key_var, endpoint_var, None, None)
}

// ============================================================================
// Language
// ============================================================================

#[tokio::test]
async fn test_language_parses_document_sentiment() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/text/analytics/v3.1/sentiment"))
        .and(header("Ocp-Apim-Subscription-Key", "test-key"))
        .and(body_partial_json(json!({
            "documents": [{"id": "1", "language": "es", "text": "Me encanta"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [{
                "id": "1",
                "sentiment": "positive",
                "confidenceScores": {"positive": 0.93, "neutral": 0.05, "negative": 0.02}
            }],
            "errors": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = AzureLanguageClient::new(
        client(),
        credentials("LANGUAGE_KEY", "LANGUAGE_ENDPOINT", &server.uri()),
    );
    let result = provider.analyze("Me encanta").await.unwrap();

    assert_eq!(result.label, SentimentLabel::Positive);
    let scores = result.scores.unwrap();
    assert!((scores.positive - 0.93).abs() < f64::EPSILON);
    assert!(result.error.is_none());
}

#[tokio::test]
async fn test_language_mixed_maps_to_neutral() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/text/analytics/v3.1/sentiment"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [{
                "id": "1",
                "sentiment": "mixed",
                "confidenceScores": {"positive": 0.4, "neutral": 0.2, "negative": 0.4}
            }]
        })))
        .mount(&server)
        .await;

    // Endpoint that already ends with a slash.
    let endpoint = format!("{}/", server.uri());
    let provider = AzureLanguageClient::new(client(), credentials("LANGUAGE_KEY", "LANGUAGE_ENDPOINT", &endpoint));

    assert_eq!(provider.analyze("más o menos").await.unwrap().label, SentimentLabel::Neutral);
}

#[tokio::test]
async fn test_language_document_error_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/text/analytics/v3.1/sentiment"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [],
            "errors": [{"id": "1", "error": {"code": "InvalidArgument", "message": "Document text is empty."}}]
        })))
        .mount(&server)
        .await;

    let provider = AzureLanguageClient::new(client(), credentials("LANGUAGE_KEY", "LANGUAGE_ENDPOINT", &server.uri()));
    let result = provider.analyze("x").await.unwrap();

    assert_eq!(result.label, SentimentLabel::Error);
    assert!(result.error.unwrap().contains("InvalidArgument"));
}

#[tokio::test]
async fn test_language_http_error_becomes_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Access denied due to invalid subscription key"))
        .mount(&server)
        .await;

    let provider = AzureLanguageClient::new(client(), credentials("LANGUAGE_KEY", "LANGUAGE_ENDPOINT", &server.uri()));
    let err = provider.analyze("hola").await.unwrap_err();

    match err {
        AppError::Upstream { service, status, body } => {
            assert_eq!(service, "Language");
            assert_eq!(status, 401);
            assert!(body.contains("invalid subscription key"));
        }
        other => panic!("expected upstream error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_language_missing_credentials_is_config_error() {
    let provider = AzureLanguageClient::new(client(), missing("LANGUAGE_KEY", "LANGUAGE_ENDPOINT"));
    let err = provider.analyze("hola").await.unwrap_err();

    assert!(err.is_config());
    assert!(err.message().contains("LANGUAGE_KEY o LANGUAGE_ENDPOINT"));
}

#[tokio::test]
async fn test_analyze_sentiment_never_fails() {
    let ok = MockSentiment::returning(SentimentLabel::Negative);
    assert_eq!(analyze_sentiment(&ok, "muy mal").await.label, SentimentLabel::Negative);

    let empty = analyze_sentiment(&ok, "   ").await;
    assert_eq!(empty.label, SentimentLabel::Neutral);
    assert_eq!(empty.error.as_deref(), Some(INVALID_INPUT));
    assert_eq!(ok.call_count(), 1);

    let failing = MockSentiment::failing(Behaviour::FailConfig);
    let degraded = analyze_sentiment(&failing, "hola").await;
    assert_eq!(degraded.label, SentimentLabel::Error);
    assert!(degraded.error.unwrap().starts_with("Error inesperado: "));
}

// ============================================================================
// Translator
// ============================================================================

#[tokio::test]
async fn test_translator_sends_region_and_target() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/translate"))
        .and(query_param("api-version", "3.0"))
        .and(query_param("to", "fr"))
        .and(header("Ocp-Apim-Subscription-Key", "test-key"))
        .and(header("Ocp-Apim-Subscription-Region", "westeurope"))
        .and(body_json(json!([{"Text": "Hola mundo"}])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"detectedLanguage": {"language": "es", "score": 1.0}, "translations": [{"text": "Bonjour le monde", "to": "fr"}]}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let provider = AzureTranslatorClient::new(
        client(),
        TranslatorConfig {
            credentials: credentials("TRANSLATOR_KEY", "TRANSLATOR_ENDPOINT", &server.uri()),
            region: "westeurope".into(),
        },
    );

    assert_eq!(provider.translate("Hola mundo", "fr").await.unwrap(), "Bonjour le monde");
}

#[tokio::test]
async fn test_translator_without_translations() {
    for reply in [json!([{"translations": []}]), json!([])] {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/translate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply))
            .expect(1)
            .mount(&server)
            .await;

        let provider = AzureTranslatorClient::new(
            client(),
            TranslatorConfig {
                credentials: credentials("TRANSLATOR_KEY", "TRANSLATOR_ENDPOINT", &server.uri()),
                region: "westeurope".into(),
            },
        );

        assert_eq!(provider.translate("Hola", "en").await.unwrap(), NO_TRANSLATION);
        assert_eq!(translate_text(&provider, "Hola", "en").await.unwrap(), NO_TRANSLATION);
    }
}

#[tokio::test]
async fn test_translate_text_degrades_provider_errors() {
    assert_eq!(
        translate_text(&MockTranslator::new(Behaviour::Succeed), "", "en").await.unwrap(),
        ""
    );

    let failing = MockTranslator::new(Behaviour::FailProvider);
    let text = translate_text(&failing, "hola", "en").await.unwrap();
    assert_eq!(text, "Error al traducir: servicio caído");

    let unconfigured = MockTranslator::new(Behaviour::FailConfig);
    assert!(translate_text(&unconfigured, "hola", "en").await.unwrap_err().is_config());
}

// ============================================================================
// Vision
// ============================================================================

#[tokio::test]
async fn test_vision_posts_octet_stream_and_reads_caption() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/vision/v3.2/describe"))
        .and(query_param("maxCandidates", "1"))
        .and(query_param("language", "es"))
        .and(header("Content-Type", "application/octet-stream"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "description": {"tags": ["perro"], "captions": [{"text": "un perro en el parque", "confidence": 0.87}]},
            "requestId": "abc"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = AzureVisionClient::new(client(), credentials("VISION_KEY", "VISION_ENDPOINT", &server.uri()));

    assert_eq!(provider.describe(png_bytes()).await.unwrap(), "un perro en el parque");
}

#[tokio::test]
async fn test_vision_without_captions() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"description": {"captions": []}})))
        .mount(&server)
        .await;

    let provider = AzureVisionClient::new(client(), credentials("VISION_KEY", "VISION_ENDPOINT", &server.uri()));

    assert_eq!(provider.describe(png_bytes()).await.unwrap(), NO_CAPTION);
}

#[tokio::test]
async fn test_describe_image_validates_bytes_first() {
    let vision = MockVision::new(Behaviour::Succeed);

    assert_eq!(describe_image(&vision, Vec::new()).await.unwrap(), NO_IMAGE);
    assert_eq!(
        describe_image(&vision, b"plain text, not an image".to_vec()).await.unwrap(),
        UNSUPPORTED_IMAGE
    );
    assert_eq!(vision.calls.load(std::sync::atomic::Ordering::SeqCst), 0);

    let failing = MockVision::new(Behaviour::FailProvider);
    assert_eq!(
        describe_image(&failing, png_bytes()).await.unwrap(),
        "Error al analizar la imagen: servicio caído"
    );

    let unconfigured = MockVision::new(Behaviour::FailConfig);
    assert!(describe_image(&unconfigured, png_bytes()).await.unwrap_err().is_config());
}

// ============================================================================
// Direct Line
// ============================================================================

#[tokio::test]
async fn test_direct_line_exchanges_secret_for_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v3/directline/tokens/generate"))
        .and(header("Authorization", "Bearer s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "conversationId": "conv-42",
            "token": "ey.token",
            "expires_in": 1800
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = DirectLineClient::new(
        client(),
        DirectLineConfig {
            secret: Some("s3cret".into()),
            endpoint: format!("{}/v3/directline", server.uri()),
        },
    );
    let token = provider.generate_token().await.unwrap();

    assert_eq!(token.token, "ey.token");
    assert_eq!(token.expires_in, 1800);
    assert_eq!(token.conversation_id.as_deref(), Some("conv-42"));
}

#[tokio::test]
async fn test_direct_line_rejection_carries_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"error": {"code": "Forbidden"}})))
        .mount(&server)
        .await;

    let provider = DirectLineClient::new(
        client(),
        DirectLineConfig {
            secret: Some("wrong".into()),
            endpoint: server.uri(),
        },
    );
    let err = provider.generate_token().await.unwrap_err();

    assert!(matches!(err, AppError::Upstream { status: 403, .. }));
    assert!(remediation_hints(&err)[0].contains("rechazó el secreto"));
}

#[tokio::test]
async fn test_direct_line_without_secret() {
    let provider = DirectLineClient::new(
        client(),
        DirectLineConfig {
            secret: None,
            endpoint: "https://directline.botframework.com/v3/directline".into(),
        },
    );
    let err = provider.generate_token().await.unwrap_err();

    assert!(err.is_config());
    assert!(err.message().contains("DIRECT_LINE_SECRET"));
    assert_eq!(remediation_hints(&err).len(), 3);
}

#[tokio::test]
async fn test_unreachable_service_is_a_provider_error() {
    // Nothing listens on the discard port.
    let provider = AzureVisionClient::new(
        build_http_client(Duration::from_secs(2)).unwrap(),
        credentials("VISION_KEY", "VISION_ENDPOINT", "http://127.0.0.1:9"),
    );
    let err = provider.describe(png_bytes()).await.unwrap_err();

    assert!(!err.is_config());
    assert_eq!(err.kind(), "ProviderError");
}
