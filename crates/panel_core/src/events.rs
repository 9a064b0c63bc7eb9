//! Events the panel core pushes to whatever view is attached.

use std::fmt;

use chrono::Local;

/// What the client currently believes about the server connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connected,
    /// The last connect attempt failed; distinct from never having tried.
    Failed,
}

impl ConnectionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionStatus::Disconnected => "DISCONNECTED",
            ConnectionStatus::Connected => "CONNECTED",
            ConnectionStatus::Failed => "FAILED",
        }
    }

    pub fn led_on(&self) -> bool {
        matches!(self, ConnectionStatus::Connected)
    }

    /// Command controls are usable only while connected.
    pub fn controls_enabled(&self) -> bool {
        matches!(self, ConnectionStatus::Connected)
    }

    pub fn connect_button_label(&self) -> &'static str {
        match self {
            ConnectionStatus::Connected => "DISCONNECT",
            _ => "CONNECT",
        }
    }
}

/// One line of the panel's activity log. Append-only, in-memory only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Local wall-clock time, formatted `HH:MM:SS`.
    pub timestamp: String,
    pub message: String,
}

impl LogEntry {
    pub fn now(message: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now().format("%H:%M:%S").to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.timestamp, self.message)
    }
}

/// View contract: everything a front-end needs to mirror the panel state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEvent {
    StatusChanged(ConnectionStatus),
    Log(LogEntry),
    /// Immediate, user-facing. The view decides how blocking it is.
    Alert(String),
    ListeningChanged(bool),
}
