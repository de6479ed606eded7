//! Translate screen state
//!
//! Two independent pieces: the translation itself (instant, answered by a
//! [`Translator`]) and simulated voice capture (a delayed transition from
//! Listening back to Idle that fills in the input text).

use std::fmt::Debug;
use std::time::Duration;

use super::data::{Language, CANNED_TRANSLATION, CANNED_VOICE_PHRASE};
use super::pending::{Pending, Ticket};

/// What the user asked to have translated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub source_text: String,
    pub target: Language,
}

/// Translation plus cultural note
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResult {
    pub text: String,
}

/// Translation backend
pub trait Translator: Debug + Send + Sync {
    fn translate(&self, request: &TranslationRequest) -> TranslationResult;
}

/// Answers every request with the same annotated greeting
#[derive(Debug, Default, Clone, Copy)]
pub struct CannedTranslator;

impl Translator for CannedTranslator {
    fn translate(&self, _request: &TranslationRequest) -> TranslationResult {
        TranslationResult {
            text: CANNED_TRANSLATION.to_string(),
        }
    }
}

/// Voice capture toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VoiceState {
    #[default]
    Idle,
    Listening,
}

/// Everything the Translate screen remembers
#[derive(Debug, Clone, Default)]
pub struct Translation {
    /// Text in the input box
    pub input: String,
    /// Selected target language
    pub language: Language,
    /// The single live result, replaced on every submit
    pub result: Option<TranslationResult>,
    voice: Pending,
}

impl Translation {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }

    pub fn set_input(&mut self, text: String) {
        self.input = text;
    }

    pub fn select_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Translate the current input. Cannot fail; empty input is fine.
    pub fn submit(&mut self, translator: &dyn Translator) -> &TranslationResult {
        let request = TranslationRequest {
            source_text: self.input.clone(),
            target: self.language,
        };
        tracing::info!(
            "Translating {} chars into {}",
            request.source_text.chars().count(),
            request.target
        );
        self.result.insert(translator.translate(&request))
    }

    pub fn voice_state(&self) -> VoiceState {
        if self.voice.is_pending() {
            VoiceState::Listening
        } else {
            VoiceState::Idle
        }
    }

    /// Flip voice capture.
    ///
    /// Idle -> Listening returns the ticket the caller must run [`listen`]
    /// for. Listening -> Idle cancels the capture: its completion will be
    /// ignored and the input text stays as it is.
    pub fn toggle_voice(&mut self) -> Option<Ticket> {
        match self.voice_state() {
            VoiceState::Idle => {
                let ticket = self.voice.start();
                tracing::info!("🎤 Listening (ticket {})", ticket.id());
                Some(ticket)
            }
            VoiceState::Listening => {
                if let Some(ticket) = self.voice.cancel() {
                    tracing::info!("🎤 Stopped listening (ticket {})", ticket.id());
                }
                None
            }
        }
    }

    /// Apply a finished capture. Returns `false` for a stale ticket.
    pub fn finish_voice(&mut self, ticket: Ticket, phrase: String) -> bool {
        if !self.voice.settle(ticket) {
            tracing::debug!("Ignoring stale voice capture (ticket {})", ticket.id());
            return false;
        }
        self.input = phrase;
        true
    }
}

/// Simulated speech recognition: wait, then "hear" the canned phrase
pub async fn listen(delay: Duration) -> String {
    tokio::time::sleep(delay).await;
    CANNED_VOICE_PHRASE.to_string()
}
