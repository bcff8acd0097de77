//! Chat dispatcher: welcome state, FAQ lookup and sentiment-driven replies.

use super::faq::{self, FaqMatcher};
use super::intent::{IntentClassifier, IntentLabel};
use super::responses::ResponseSelector;
use super::session::SessionStore;
use crate::config::ChatMode;
use crate::models::{ChatReply, SentimentLabel};
use crate::providers::language::analyze_sentiment;
use crate::providers::SentimentProvider;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

pub struct ChatDispatcher {
    sentiment: Arc<dyn SentimentProvider>,
    classifier: IntentClassifier,
    selector: ResponseSelector,
    faq: FaqMatcher,
    sessions: SessionStore,
    rng: Mutex<StdRng>,
    mode: ChatMode,
}

impl ChatDispatcher {
    /// Creates a dispatcher; `seed` makes fallback-prompt selection reproducible.
    pub fn new(
        sentiment: Arc<dyn SentimentProvider>,
        mode: ChatMode,
        session_capacity: usize,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(sentiment, mode, session_capacity, rng)
    }

    pub fn with_rng(
        sentiment: Arc<dyn SentimentProvider>,
        mode: ChatMode,
        session_capacity: usize,
        rng: StdRng,
    ) -> Self {
        Self {
            sentiment,
            classifier: IntentClassifier::new(),
            selector: ResponseSelector::new(),
            faq: FaqMatcher::new(),
            sessions: SessionStore::new(session_capacity),
            rng: Mutex::new(rng),
            mode,
        }
    }

    pub fn mode(&self) -> ChatMode {
        self.mode
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.len().await
    }

    /// Answers one message in the configured mode.
    #[instrument(skip(self, message))]
    pub async fn handle(&self, session_id: &str, message: &str) -> ChatReply {
        match self.mode {
            ChatMode::Faq => self.handle_faq(session_id, message).await,
            ChatMode::Legacy => self.generate_response(message).await,
        }
    }

    async fn handle_faq(&self, session_id: &str, message: &str) -> ChatReply {
        // 1. First message of the session: welcome, nothing else runs.
        if self.sessions.begin_turn(session_id).await {
            info!("Welcoming session {}", session_id);
            return ChatReply {
                success: true,
                response: faq::WELCOME_MESSAGE.to_string(),
                intent: IntentLabel::Welcome,
                sentiment: None,
                suggestions: faq::suggestions(),
            };
        }

        // 2. FAQ table. Sentiment is attached for telemetry only.
        if let Some((phrase, answer)) = self.faq.find(message) {
            debug!("FAQ match on '{}'", phrase);
            let sentiment = analyze_sentiment(self.sentiment.as_ref(), message).await;
            return ChatReply {
                success: true,
                response: answer.to_string(),
                intent: IntentLabel::Faq,
                sentiment: Some(sentiment),
                suggestions: Vec::new(),
            };
        }

        // 3. Sentiment-conditioned replies; errors count as neutral.
        let sentiment = analyze_sentiment(self.sentiment.as_ref(), message).await;
        let (response, intent) = match sentiment.label {
            SentimentLabel::Positive => (faq::POSITIVE_REPLY.to_string(), IntentLabel::PositiveFeedback),
            SentimentLabel::Negative => (faq::NEGATIVE_REPLY.to_string(), IntentLabel::NegativeFeedback),
            SentimentLabel::Neutral | SentimentLabel::Error => {
                // 4. Clarifying prompt.
                let prompt = {
                    let mut rng = self.rng.lock().await;
                    faq::CLARIFYING_PROMPTS
                        .choose(&mut *rng)
                        .copied()
                        .unwrap_or(faq::CLARIFYING_PROMPTS[0])
                };
                return ChatReply {
                    success: true,
                    response: prompt.to_string(),
                    intent: IntentLabel::GeneralInquiry,
                    sentiment: Some(sentiment),
                    suggestions: faq::suggestions(),
                };
            }
        };

        ChatReply {
            success: true,
            response,
            intent,
            sentiment: Some(sentiment),
            suggestions: Vec::new(),
        }
    }

    /// Keyword intent + canned response, without FAQ or welcome state.
    pub async fn generate_response(&self, message: &str) -> ChatReply {
        let sentiment = analyze_sentiment(self.sentiment.as_ref(), message).await;
        let intent = self.classifier.classify(message);
        let response = self.selector.select(intent, &sentiment);
        debug!("Legacy intent {} (sentiment {:?})", intent, sentiment.label);

        ChatReply {
            success: !sentiment.has_error(),
            response,
            intent,
            sentiment: Some(sentiment),
            suggestions: Vec::new(),
        }
    }
}
