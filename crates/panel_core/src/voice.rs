//! Voice input: a platform seam for speech recognition plus the state
//! machine that turns recognizer events into dispatched commands.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedReceiver;

/// Locale the recognizer is asked for. Fixed, matching the server-side
/// command vocabulary.
pub const VOICE_LOCALE: &str = "pt-BR";

/// Single-shot recognition: one utterance, final results only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognizerSettings {
    pub locale: String,
    pub continuous: bool,
    pub interim_results: bool,
}

impl Default for RecognizerSettings {
    fn default() -> Self {
        Self {
            locale: VOICE_LOCALE.to_string(),
            continuous: false,
            interim_results: false,
        }
    }
}

/// One recognized utterance with its alternatives, best first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognizedPhrase {
    pub alternatives: Vec<String>,
}

/// Lifecycle events of one recognition session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognizerEvent {
    Started,
    Result(Vec<RecognizedPhrase>),
    Error(String),
    Ended,
}

/// Platform capability behind the voice button. Implementations wrap
/// whatever recognizer the host OS offers; [`UnsupportedSpeechCapability`]
/// stands in where there is none.
#[async_trait]
pub trait SpeechCapability: Send + Sync {
    fn is_supported(&self) -> bool;

    /// Begin one recognition session and stream its lifecycle events.
    async fn start(
        &self,
        settings: RecognizerSettings,
    ) -> Result<UnboundedReceiver<RecognizerEvent>>;
}

pub struct UnsupportedSpeechCapability;

#[async_trait]
impl SpeechCapability for UnsupportedSpeechCapability {
    fn is_supported(&self) -> bool {
        false
    }

    async fn start(
        &self,
        _settings: RecognizerSettings,
    ) -> Result<UnboundedReceiver<RecognizerEvent>> {
        Err(anyhow!("speech recognition is not supported on this platform"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VoiceState {
    #[default]
    Idle,
    Listening,
}

/// What the caller should do after feeding an event into the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceAction {
    None,
    BeganListening,
    /// Forward this transcript to the command dispatcher.
    Dispatch(String),
    Failed(String),
    Finished,
}

/// Explicit `Idle -> Listening -> Idle` machine over recognizer events,
/// testable without any UI surface or real recognizer.
#[derive(Debug, Default)]
pub struct VoiceSession {
    state: VoiceState,
}

impl VoiceSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }

    pub fn on_event(&mut self, event: RecognizerEvent) -> VoiceAction {
        match (self.state, event) {
            (VoiceState::Idle, RecognizerEvent::Started) => {
                self.state = VoiceState::Listening;
                VoiceAction::BeganListening
            }
            // Result arrives before Ended; the session stays open until then.
            (VoiceState::Listening, RecognizerEvent::Result(phrases)) => {
                match first_transcript(&phrases) {
                    Some(transcript) => VoiceAction::Dispatch(transcript),
                    None => VoiceAction::None,
                }
            }
            // Recognizers can fail before Started ever fires (permission
            // denied, no microphone); surface the error from either state.
            (_, RecognizerEvent::Error(message)) => {
                self.state = VoiceState::Idle;
                VoiceAction::Failed(message)
            }
            (VoiceState::Listening, RecognizerEvent::Ended) => {
                self.state = VoiceState::Idle;
                VoiceAction::Finished
            }
            // Anything else is out of order for a single-shot session.
            _ => VoiceAction::None,
        }
    }
}

/// First alternative of the first phrase, the one the panel dispatches.
fn first_transcript(phrases: &[RecognizedPhrase]) -> Option<String> {
    phrases
        .first()
        .and_then(|phrase| phrase.alternatives.first())
        .cloned()
}

#[cfg(test)]
#[path = "tests/voice_tests.rs"]
mod tests;
