//! # Chat Module
//!
//! Rule-based chat responder for the store assistant.
//!
//! ## Components
//! - `intent`: keyword intent classifier
//! - `responses`: canned response per intent, with an empathy prefix for negative messages
//! - `faq`: FAQ table and fixed texts
//! - `session`: per-session welcome state
//! - `dispatcher`: orchestrator

pub mod dispatcher;
pub mod faq;
pub mod intent;
pub mod responses;
pub mod session;

pub use dispatcher::ChatDispatcher;
pub use intent::IntentLabel;
pub use session::DEFAULT_SESSION_ID;
