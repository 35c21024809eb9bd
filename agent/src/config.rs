//! Agent configuration from environment variables.
//!
//! | Variable          | Default              |
//! |-------------------|----------------------|
//! | `SERVER`          | `localhost`          |
//! | `PORT`            | `8000`               |
//! | `NAME`            | `$USER`, else `agent`|
//! | `KEY_DEADLINE_MS` | `200`                |
//! | `RETRY`           | `resend`             |
//! | `MAX_EXPANSIONS`  | unbounded            |

use std::time::Duration;

use rushlane_search::policy::SearchPolicyV1;

use crate::dispatch::RetryPolicy;

const DEFAULT_SERVER: &str = "localhost";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_NAME: &str = "agent";
const DEFAULT_KEY_DEADLINE_MS: u64 = 200;

/// A variable was set to something unusable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue {
        variable: &'static str,
        value: String,
        detail: String,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue {
                variable,
                value,
                detail,
            } => write!(f, "invalid {variable}={value:?}: {detail}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Runtime settings for one agent session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    pub server: String,
    pub port: u16,
    /// Name sent in the join message.
    pub name: String,
    /// How long one key may stay unacknowledged before the plan is dropped.
    pub key_deadline: Duration,
    pub retry: RetryPolicy,
    pub search_policy: SearchPolicyV1,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            port: DEFAULT_PORT,
            name: DEFAULT_NAME.to_string(),
            key_deadline: Duration::from_millis(DEFAULT_KEY_DEADLINE_MS),
            retry: RetryPolicy::default(),
            search_policy: SearchPolicyV1::default(),
        }
    }
}

impl AgentConfig {
    /// Read the process environment.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidValue`] for unparsable numbers or retry modes.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Empty values count as unset.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidValue`] for unparsable numbers or retry modes.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(server) = get("SERVER") {
            config.server = server;
        }
        if let Some(port) = get("PORT") {
            config.port = parse_number("PORT", &port)?;
        }
        if let Some(name) = get("NAME").or_else(|| get("USER")) {
            config.name = name;
        }
        if let Some(ms) = get("KEY_DEADLINE_MS") {
            config.key_deadline = Duration::from_millis(parse_number("KEY_DEADLINE_MS", &ms)?);
        }
        if let Some(retry) = get("RETRY") {
            config.retry = RetryPolicy::parse(&retry).ok_or_else(|| ConfigError::InvalidValue {
                variable: "RETRY",
                value: retry.clone(),
                detail: "expected `resend` or `reawait`".into(),
            })?;
        }
        if let Some(max) = get("MAX_EXPANSIONS") {
            let max: u64 = parse_number("MAX_EXPANSIONS", &max)?;
            config.search_policy.max_expansions = Some(max);
            config
                .search_policy
                .validate()
                .map_err(|e| ConfigError::InvalidValue {
                    variable: "MAX_EXPANSIONS",
                    value: max.to_string(),
                    detail: e.to_string(),
                })?;
        }
        Ok(config)
    }

    /// Host websocket endpoint.
    #[must_use]
    pub fn url(&self) -> String {
        format!("ws://{}:{}/player", self.server, self.port)
    }
}

fn parse_number<T>(variable: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidValue {
            variable,
            value: value.to_string(),
            detail: e.to_string(),
        })
}
