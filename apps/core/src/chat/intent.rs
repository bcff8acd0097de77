//! Intent classification using keyword tables.
//!
//! Lowercases the message and returns the first intent whose keyword list
//! has an entry contained in it. Table order decides ties.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse purpose of a user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentLabel {
    /// Product details, specs, prices
    Producto,
    /// Availability / inventory
    Stock,
    /// Payment methods
    Pago,
    /// Cart and orders
    Compra,
    /// Problems and help requests
    Soporte,
    /// Answered from the FAQ table
    Faq,
    PositiveFeedback,
    NegativeFeedback,
    /// Nothing matched; a clarifying prompt was sent
    GeneralInquiry,
    /// First message of a conversation
    Welcome,
    /// Default of the keyword classifier
    General,
}

impl fmt::Display for IntentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl IntentLabel {
    pub fn label(&self) -> &'static str {
        match self {
            IntentLabel::Producto => "producto",
            IntentLabel::Stock => "stock",
            IntentLabel::Pago => "pago",
            IntentLabel::Compra => "compra",
            IntentLabel::Soporte => "soporte",
            IntentLabel::Faq => "faq",
            IntentLabel::PositiveFeedback => "positive_feedback",
            IntentLabel::NegativeFeedback => "negative_feedback",
            IntentLabel::GeneralInquiry => "general_inquiry",
            IntentLabel::Welcome => "welcome",
            IntentLabel::General => "general",
        }
    }
}

/// Ordered (intent, keywords) table. Earlier rows win.
const INTENT_TABLE: &[(IntentLabel, &[&str])] = &[
    (
        IntentLabel::Producto,
        &["especificaciones", "características", "precio", "producto"],
    ),
    (
        IntentLabel::Stock,
        &["disponible", "hay", "stock", "inventario", "quedan"],
    ),
    (
        IntentLabel::Pago,
        &["pagar", "tarjeta", "cuotas", "transferencia", "pago"],
    ),
    (
        IntentLabel::Compra,
        &["comprar", "carrito", "pedido", "orden"],
    ),
    (
        IntentLabel::Soporte,
        &["ayuda", "problema", "error", "soporte"],
    ),
];

/// Keyword intent classifier.
#[derive(Debug, Clone, Copy)]
pub struct IntentClassifier {
    table: &'static [(IntentLabel, &'static [&'static str])],
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentClassifier {
    pub fn new() -> Self {
        Self {
            table: INTENT_TABLE,
        }
    }

    /// Classify a raw user message.
    pub fn classify(&self, text: &str) -> IntentLabel {
        let text = text.to_lowercase();

        self.table
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|keyword| text.contains(keyword)))
            .map(|(intent, _)| *intent)
            .unwrap_or(IntentLabel::General)
    }
}
