//! Duplex message channel to the game host.
//!
//! Outbound messages are JSON objects tagged by `cmd`; inbound messages are
//! host states. The channel reports a clean shutdown as
//! [`ChannelError::Closed`], distinct from transport and decode failures.

use rushlane_kernel::host::HostStateV1;
use rushlane_search::keys::Key;
use serde_json::{json, Value};

/// A message sent to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundMessage {
    /// Sent once at session start.
    Join { name: String },
    /// One primitive key press.
    Key(Key),
}

impl OutboundMessage {
    /// Wire form: `{"cmd":"join","name":..}` or `{"cmd":"key","key":..}`.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Join { name } => json!({ "cmd": "join", "name": name }),
            Self::Key(key) => json!({ "cmd": "key", "key": key.as_char().to_string() }),
        }
    }

    #[must_use]
    pub fn to_json(&self) -> String {
        self.to_value().to_string()
    }
}

/// Failure talking to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelError {
    /// The host closed the session cleanly.
    Closed,
    /// The connection failed.
    Transport { detail: String },
    /// An inbound message was not a valid host state.
    Decode { detail: String },
}

impl std::fmt::Display for ChannelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Closed => write!(f, "host closed the session"),
            Self::Transport { detail } => write!(f, "transport error: {detail}"),
            Self::Decode { detail } => write!(f, "undecodable host message: {detail}"),
        }
    }
}

impl std::error::Error for ChannelError {}

/// Blocking duplex channel to the host.
pub trait HostChannel {
    /// Send one message.
    ///
    /// # Errors
    ///
    /// [`ChannelError::Closed`] on clean shutdown, otherwise a transport error.
    fn send(&mut self, message: &OutboundMessage) -> Result<(), ChannelError>;

    /// Block until the next host state arrives.
    ///
    /// # Errors
    ///
    /// [`ChannelError::Closed`] on clean shutdown; `Transport` or `Decode`
    /// for anything else.
    fn recv(&mut self) -> Result<HostStateV1, ChannelError>;
}
