//! FAQ table and the fixed texts used by the dispatcher.

const HOURS: &str = "Nuestro horario de atención es de lunes a viernes de 9:00 a 18:00 y sábados de 9:00 a 13:00.";
const CONTACT: &str = "Puedes escribirnos a soporte@innovventas.com o llamarnos al +54 11 5555-0100 de lunes a viernes de 9:00 a 18:00.";
const SHIPPING: &str = "Realizamos envíos a todo el país. Los pedidos llegan en 3 a 5 días hábiles y el envío es gratuito en compras superiores a $50.000.";
const RETURNS: &str = "Tienes 30 días desde la entrega para solicitar una devolución. El producto debe estar sin uso y con su embalaje original; el reembolso se acredita en 5 a 10 días hábiles.";
const PAYMENT: &str = "Aceptamos tarjetas de crédito y débito, transferencia bancaria y efectivo. Con tarjeta de crédito puedes pagar hasta en 12 cuotas.";
const GREETING: &str = "¡Hola! ¿En qué puedo ayudarte hoy?";
const FAREWELL: &str = "¡Gracias por visitar InnovVentas! Que tengas un excelente día.";
const THANKS: &str = "¡De nada! Si necesitas algo más, aquí estaré.";

/// Ordered (phrase, answer) table. Phrases are lowercase; the first contained phrase wins.
pub const FAQ_TABLE: &[(&str, &str)] = &[
    ("hola", GREETING),
    ("buenos días", GREETING),
    ("buenas tardes", GREETING),
    ("buenas noches", GREETING),
    ("horario", HOURS),
    ("a qué hora abren", HOURS),
    ("a qué hora cierran", HOURS),
    ("contacto", CONTACT),
    ("teléfono", CONTACT),
    ("correo", CONTACT),
    ("dirección", "Nuestra tienda principal está en Av. Corrientes 1234, Buenos Aires. También atendemos en línea las 24 horas."),
    ("envío", SHIPPING),
    ("envio", SHIPPING),
    ("entrega", SHIPPING),
    ("devolución", RETURNS),
    ("devolucion", RETURNS),
    ("reembolso", RETURNS),
    ("garantía", "Todos nuestros productos tienen 12 meses de garantía oficial del fabricante."),
    ("métodos de pago", PAYMENT),
    ("formas de pago", PAYMENT),
    ("factura", "Emitimos factura electrónica por cada compra; la recibirás en tu correo junto con la confirmación del pedido."),
    ("adiós", FAREWELL),
    ("adios", FAREWELL),
    ("hasta luego", FAREWELL),
    ("chau", FAREWELL),
    ("gracias", THANKS),
];

pub const WELCOME_MESSAGE: &str = "¡Bienvenido a InnovVentas!\n\
Soy tu asistente virtual y puedo ayudarte con:\n\
- Horarios y datos de contacto\n\
- Envíos y devoluciones\n\
- Métodos de pago\n\
¿En qué puedo ayudarte hoy?";

/// Example questions shown with the welcome and with clarifying prompts.
pub const SUGGESTIONS: [&str; 4] = [
    "¿Cuál es el horario de atención?",
    "¿Cuáles son los métodos de pago?",
    "¿Cuánto tarda el envío?",
    "¿Cómo hago una devolución?",
];

pub const CLARIFYING_PROMPTS: [&str; 4] = [
    "No estoy seguro de haber entendido. ¿Podrías darme más detalles?",
    "¿Podrías reformular tu pregunta? Así podré ayudarte mejor.",
    "Cuéntame un poco más sobre lo que necesitas.",
    "Puedo ayudarte con horarios, envíos, pagos y devoluciones. ¿Sobre qué te gustaría saber?",
];

pub const POSITIVE_REPLY: &str = "¡Me alegra mucho leer eso! ¿Hay algo más en lo que pueda ayudarte?";

pub const NEGATIVE_REPLY: &str = "Lamento que estés teniendo una mala experiencia. Cuéntame qué ocurrió y haré lo posible por ayudarte.";

pub fn suggestions() -> Vec<String> {
    SUGGESTIONS.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, Copy)]
pub struct FaqMatcher {
    table: &'static [(&'static str, &'static str)],
}

impl Default for FaqMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl FaqMatcher {
    pub fn new() -> Self {
        Self { table: FAQ_TABLE }
    }

    /// Returns the `(phrase, answer)` of the first phrase contained in the message.
    pub fn find(&self, message: &str) -> Option<(&'static str, &'static str)> {
        let message = message.to_lowercase();
        self.table
            .iter()
            .find(|(phrase, _)| message.contains(phrase))
            .copied()
    }
}
