//! Fatal agent errors.
//!
//! Anything here ends the session with a non-zero exit. Search failures and
//! plan timeouts are not errors at this level; the dispatcher recovers from
//! them and counts them in its session summary.

use crate::channel::ChannelError;
use crate::config::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentError {
    /// The environment did not describe a usable configuration.
    Config(ConfigError),
    /// Transport or decode failure (never `ChannelError::Closed`).
    Channel(ChannelError),
}

impl std::fmt::Display for AgentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(e) => write!(f, "configuration: {e}"),
            Self::Channel(e) => write!(f, "host channel: {e}"),
        }
    }
}

impl std::error::Error for AgentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Channel(e) => Some(e),
        }
    }
}

impl From<ConfigError> for AgentError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<ChannelError> for AgentError {
    fn from(e: ChannelError) -> Self {
        Self::Channel(e)
    }
}
