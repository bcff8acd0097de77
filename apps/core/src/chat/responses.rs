//! Canned responses for the keyword classifier.

use super::intent::IntentLabel;
use crate::models::SentimentResult;

/// Prepended when the user's message reads negative.
pub const EMPATHY_PREFIX: &str = "Lamento que estés teniendo dificultades. ";

const GENERAL_RESPONSE: &str = "¿En qué más puedo ayudarte hoy? Estoy aquí para asistirte con información de productos, compras y soporte técnico.";

const RESPONSE_TABLE: &[(IntentLabel, &str)] = &[
    (
        IntentLabel::Producto,
        "Te puedo ayudar con información sobre nuestros productos. ¿Qué te gustaría saber? Puedo darte especificaciones técnicas, precios o hacer comparaciones.",
    ),
    (
        IntentLabel::Stock,
        "Déjame verificar la disponibilidad en tiempo real. ¿Qué producto te interesa?",
    ),
    (
        IntentLabel::Pago,
        "Aceptamos múltiples métodos de pago: tarjeta de crédito/débito, transferencia bancaria y efectivo. ¿Cuál prefieres?",
    ),
    (
        IntentLabel::Compra,
        "¡Excelente elección! Por favor, indícame qué producto deseas agregar a tu carrito.",
    ),
    (
        IntentLabel::Soporte,
        "Lamento los inconvenientes. Por favor, describe el problema que estás experimentando y con gusto te ayudaré.",
    ),
    (IntentLabel::General, GENERAL_RESPONSE),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseSelector;

impl ResponseSelector {
    pub fn new() -> Self {
        Self
    }

    /// Canned text for an intent; intents without an entry get the general answer.
    pub fn base_response(&self, intent: IntentLabel) -> &'static str {
        RESPONSE_TABLE
            .iter()
            .find(|(candidate, _)| *candidate == intent)
            .map(|(_, text)| *text)
            .unwrap_or(GENERAL_RESPONSE)
    }

    pub fn select(&self, intent: IntentLabel, sentiment: &SentimentResult) -> String {
        let response = self.base_response(intent);
        if sentiment.is_negative() {
            format!("{}{}", EMPATHY_PREFIX, response)
        } else {
            response.to_string()
        }
    }
}
