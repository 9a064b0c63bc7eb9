//! Core of the remote command panel: owns the session with the server,
//! dispatches command strings to it, and feeds status/log events to an
//! attached view.

use std::time::Duration;

use anyhow::Result;
use reqwest::Client;
use storage::Storage;
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

pub mod events;
pub mod protocol;
pub mod voice;

pub use events::{ConnectionStatus, LogEntry, PanelEvent};

use protocol::{CommandRequest, CommandResponse};
use voice::{RecognizerSettings, SpeechCapability, VoiceAction, VoiceSession, VoiceState};

/// Port the command server listens on. Fixed in this version.
pub const DEFAULT_PORT: &str = "5000";

const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// The client's belief about a reachable server. Owned by the
/// [`PanelClient`] instance; there is no process-wide connection state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub server_address: String,
    pub port: String,
    pub connected: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            server_address: String::new(),
            port: DEFAULT_PORT.to_string(),
            connected: false,
        }
    }
}

/// Why the connect handshake failed. Single attempt, no retry.
#[derive(Debug, Error)]
pub enum ConnectFailure {
    #[error("health check timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("server returned HTTP {0}")]
    Status(u16),
}

/// Outcome of one command dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Executed,
    /// Application-level refusal (non-2xx). The session stays up.
    Rejected(String),
    /// Network-level failure. The session is gone and must be re-established.
    ConnectionLost(String),
    NotConnected,
}

pub struct PanelClient {
    http: Client,
    storage: Storage,
    events: UnboundedSender<PanelEvent>,
    pub(crate) session: Session,
    status: ConnectionStatus,
    saved_address: Option<String>,
    log: Vec<LogEntry>,
    pub(crate) health_check_timeout: Duration,
}

impl PanelClient {
    /// Loads the last-used server address so the view can prefill its input.
    pub async fn new(storage: Storage, events: UnboundedSender<PanelEvent>) -> Result<Self> {
        let saved_address = storage.load_server_address().await?;
        Ok(Self {
            http: Client::new(),
            storage,
            events,
            session: Session::default(),
            status: ConnectionStatus::Disconnected,
            saved_address,
            log: Vec::new(),
            health_check_timeout: HEALTH_CHECK_TIMEOUT,
        })
    }

    pub fn connected(&self) -> bool {
        self.session.connected
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    pub fn saved_address(&self) -> Option<&str> {
        self.saved_address.as_deref()
    }

    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    /// Probe the server once and, on success, adopt the address as the
    /// session's. Empty input never touches the network.
    pub async fn connect(&mut self, address: &str) -> bool {
        let address = address.trim();
        if address.is_empty() {
            self.alert("Enter the server address first");
            return false;
        }

        let port = self.session.port.clone();
        self.push_log(format!("🔄 Connecting to {address}:{port}..."));

        match self.health_check(address).await {
            Ok(()) => {
                self.session.server_address = address.to_string();
                self.session.connected = true;

                // The connect itself succeeded; a persist failure only costs
                // the prefill after the next restart.
                if let Err(err) = self.storage.save_server_address(address).await {
                    warn!(address, error = %err, "failed to persist server address");
                } else {
                    self.saved_address = Some(address.to_string());
                }

                self.set_status(ConnectionStatus::Connected);
                self.push_log(format!("✅ Connected to {address}:{port}"));
                true
            }
            Err(failure) => {
                self.session.connected = false;
                self.set_status(ConnectionStatus::Failed);
                self.push_log(format!("❌ Error: {failure}"));
                self.alert(format!("Could not connect:\n{failure}"));
                false
            }
        }
    }

    async fn health_check(&self, address: &str) -> Result<(), ConnectFailure> {
        let url = format!("http://{}:{}/status", address, self.session.port);
        debug!(%url, "issuing health check");

        let response = self
            .http
            .get(&url)
            .timeout(self.health_check_timeout)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    ConnectFailure::Timeout
                } else {
                    ConnectFailure::Network(err.to_string())
                }
            })?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ConnectFailure::Status(response.status().as_u16()))
        }
    }

    /// Client-side reset only: no teardown request is sent to the server.
    pub fn disconnect(&mut self) {
        self.session.connected = false;
        self.set_status(ConnectionStatus::Disconnected);
        self.push_log("🔌 Disconnected");
    }

    /// Dispatch one opaque command string to the connected server.
    ///
    /// Unlike the health check this request carries no timeout; a hung
    /// command blocks only its own call.
    pub async fn send(&mut self, command: &str) -> Dispatch {
        if !self.session.connected {
            self.alert("Connect to the server first");
            return Dispatch::NotConnected;
        }

        self.push_log(format!("📤 Sending: {command}"));

        let url = format!(
            "http://{}:{}",
            self.session.server_address, self.session.port
        );
        let request = CommandRequest {
            command: command.to_string(),
        };

        match self.http.post(&url).json(&request).send().await {
            Ok(response) if response.status().is_success() => {
                self.push_log(format!("✅ Command executed: {command}"));
                Dispatch::Executed
            }
            Ok(response) => {
                let message = response
                    .json::<CommandResponse>()
                    .await
                    .ok()
                    .and_then(|body| body.message)
                    .unwrap_or_else(|| "server did not respond".to_string());
                self.push_log(format!("❌ Error: {message}"));
                Dispatch::Rejected(message)
            }
            Err(err) => {
                // Only a network-level failure invalidates the session.
                let message = err.to_string();
                self.push_log(format!("❌ Network error: {message}"));
                self.session.connected = false;
                self.set_status(ConnectionStatus::Disconnected);
                Dispatch::ConnectionLost(message)
            }
        }
    }

    /// Run one single-shot voice capture and route the transcript through
    /// [`Self::send`]. Returns the dispatch outcome if anything was said.
    pub async fn dictate(&mut self, speech: &dyn SpeechCapability) -> Option<Dispatch> {
        if !speech.is_supported() {
            self.alert("Voice recognition is not available on this platform");
            return None;
        }

        let mut recognizer_events = match speech.start(RecognizerSettings::default()).await {
            Ok(rx) => rx,
            Err(err) => {
                self.push_log(format!("❌ Voice recognition error: {err}"));
                return None;
            }
        };

        let mut voice = VoiceSession::new();
        let mut outcome = None;

        while let Some(event) = recognizer_events.recv().await {
            match voice.on_event(event) {
                VoiceAction::BeganListening => {
                    self.set_listening(true);
                    self.push_log("🎤 Listening...");
                }
                VoiceAction::Dispatch(transcript) => {
                    self.push_log(format!("🎤 You said: \"{transcript}\""));
                    outcome = Some(self.send(&transcript).await);
                }
                VoiceAction::Failed(message) => {
                    self.push_log(format!("❌ Voice recognition error: {message}"));
                    self.set_listening(false);
                }
                VoiceAction::Finished => {
                    self.set_listening(false);
                }
                VoiceAction::None => {}
            }
        }

        // Recognizer went away mid-session without an Ended event.
        if voice.state() == VoiceState::Listening {
            self.set_listening(false);
        }

        outcome
    }

    fn push_log(&mut self, message: impl Into<String>) {
        let entry = LogEntry::now(message);
        self.log.push(entry.clone());
        let _ = self.events.send(PanelEvent::Log(entry));
    }

    fn set_status(&mut self, status: ConnectionStatus) {
        self.status = status;
        let _ = self.events.send(PanelEvent::StatusChanged(status));
    }

    fn set_listening(&mut self, listening: bool) {
        let _ = self.events.send(PanelEvent::ListeningChanged(listening));
    }

    fn alert(&self, message: impl Into<String>) {
        let _ = self.events.send(PanelEvent::Alert(message.into()));
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
