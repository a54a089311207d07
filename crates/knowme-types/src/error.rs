//! Error types for knowme.

use std::io;

/// Errors produced by the knowme crates.
#[derive(Debug, thiserror::Error)]
pub enum KnowmeError {
    /// Raised by a command handler. Displayed bare so the executor can
    /// render it as `Error: <message>`.
    #[error("{0}")]
    Command(String),

    #[error("Command not found: {0}. Type 'help'.")]
    UnknownCommand(String),

    #[error("config error: {0}")]
    Config(String),

    /// The remote side could not be reached at all (connect, DNS, timeout).
    #[error("network unreachable: {0}")]
    Network(String),

    /// The remote side answered, but not with something usable.
    #[error("proxy error: {0}")]
    Proxy(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl KnowmeError {
    /// Whether this error means the network peer was unreachable, as opposed
    /// to a peer that answered badly.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, KnowmeError>;
