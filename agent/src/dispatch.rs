//! Dispatch/replan loop.
//!
//! # Cycle
//!
//! ```text
//! recv state → grid not where the plan expects?  drop plan
//!   → (plan empty?) solve → send head key → recv echo
//!   → elapsed > deadline?  drop whole plan
//!   → cursor/selected changed since cycle start?  pop head
//!   → otherwise retry (resend or re-await) until one of the above
//! ```
//!
//! After a key is consumed or the plan is dropped the loop goes back to the
//! top and waits for the next host update. Each planned key carries the grid
//! the host should be showing before it is pressed; an update whose grid is
//! neither that one nor the grid after the head key (a new level, or a piece
//! moved by someone else) invalidates the plan. The session ends when the
//! host closes the channel cleanly.

use std::collections::VecDeque;
use std::time::Duration;

use rushlane_kernel::host::HostStateV1;
use rushlane_search::keys::{keys_to_string, Key};
use rushlane_search::plan::solve;
use rushlane_search::policy::SearchPolicyV1;
use serde::Serialize;

use crate::channel::{ChannelError, HostChannel, OutboundMessage};
use crate::clock::Clock;
use crate::config::AgentConfig;
use crate::error::AgentError;

/// What to do when an echoed state shows the head key had no effect yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RetryPolicy {
    /// Send the head key again before every receive.
    #[default]
    Resend,
    /// Send the head key once, then only receive.
    Reawait,
}

impl RetryPolicy {
    /// Case-insensitive `resend` / `reawait`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "resend" => Some(Self::Resend),
            "reawait" => Some(Self::Reawait),
            _ => None,
        }
    }
}

impl std::fmt::Display for RetryPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Resend => write!(f, "resend"),
            Self::Reawait => write!(f, "reawait"),
        }
    }
}

/// Counters for one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub states_received: u64,
    /// Key messages written, resends included.
    pub keys_sent: u64,
    pub keys_consumed: u64,
    /// Searches that produced a plan (possibly empty, for solved boards).
    pub plans_computed: u64,
    pub plans_without_solution: u64,
    pub plans_timed_out: u64,
    /// Plans dropped because the host's board left the planned sequence.
    pub plans_invalidated: u64,
    /// Searches that could not start, e.g. on a malformed grid.
    pub search_failures: u64,
}

/// Single-threaded agent loop over a [`HostChannel`].
pub struct Dispatcher<C: Clock> {
    name: String,
    key_deadline: Duration,
    retry: RetryPolicy,
    policy: SearchPolicyV1,
    clock: C,
    plan: VecDeque<Key>,
    /// Grid expected before each planned key, then the final grid.
    expected: VecDeque<String>,
    summary: SessionSummary,
}

impl<C: Clock> Dispatcher<C> {
    #[must_use]
    pub fn new(config: &AgentConfig, clock: C) -> Self {
        Self {
            name: config.name.clone(),
            key_deadline: config.key_deadline,
            retry: config.retry,
            policy: config.search_policy.clone(),
            clock,
            plan: VecDeque::new(),
            expected: VecDeque::new(),
            summary: SessionSummary::default(),
        }
    }

    /// Keys still waiting to be dispatched, head first.
    #[must_use]
    pub fn pending(&self) -> Vec<Key> {
        self.plan.iter().copied().collect()
    }

    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        self.summary
    }

    /// Join the host and play until it closes the session.
    ///
    /// # Errors
    ///
    /// [`AgentError::Channel`] on any transport or decode failure. A clean
    /// close is not an error and returns the session summary.
    pub fn run<H: HostChannel>(&mut self, channel: &mut H) -> Result<SessionSummary, AgentError> {
        match self.session(channel) {
            Err(ChannelError::Closed) | Ok(()) => {
                log::info!(
                    "session closed: {} states, {} keys sent, {} consumed, {} plans",
                    self.summary.states_received,
                    self.summary.keys_sent,
                    self.summary.keys_consumed,
                    self.summary.plans_computed
                );
                Ok(self.summary)
            }
            Err(e) => Err(AgentError::Channel(e)),
        }
    }

    fn session<H: HostChannel>(&mut self, channel: &mut H) -> Result<(), ChannelError> {
        channel.send(&OutboundMessage::Join {
            name: self.name.clone(),
        })?;
        log::info!("joined as {:?}", self.name);

        loop {
            let state = self.recv(channel)?;
            if !self.plan.is_empty() {
                self.follow_board(&state);
            }
            if self.plan.is_empty() {
                self.replan(&state);
            }
            if !self.plan.is_empty() {
                self.dispatch_head(channel, &state)?;
            }
        }
    }

    fn recv<H: HostChannel>(&mut self, channel: &mut H) -> Result<HostStateV1, ChannelError> {
        let state = channel.recv()?;
        self.summary.states_received += 1;
        Ok(state)
    }

    /// Check a fresh update against the planned grids.
    fn follow_board(&mut self, state: &HostStateV1) {
        let grid = state.grid().flat();
        if self.expected.front().is_some_and(|g| g == grid) {
            return;
        }
        if self.expected.get(1).is_some_and(|g| g == grid) {
            // The host already applied the head drag.
            log::debug!("head key {:?} already applied by host", self.plan.front());
            self.consume_head();
            return;
        }
        log::warn!(
            "board changed outside the plan; dropping {} planned keys",
            self.plan.len()
        );
        self.drop_plan();
        self.summary.plans_invalidated += 1;
    }

    fn consume_head(&mut self) {
        self.plan.pop_front();
        self.expected.pop_front();
        self.summary.keys_consumed += 1;
    }

    fn drop_plan(&mut self) {
        self.plan.clear();
        self.expected.clear();
    }

    fn replan(&mut self, state: &HostStateV1) {
        match solve(state, &self.policy) {
            Ok(Some(plan)) => {
                self.summary.plans_computed += 1;
                log::debug!(
                    "plan {} ({} moves): {:?}",
                    plan.digest.short(),
                    plan.move_count(),
                    keys_to_string(&plan.keys)
                );
                self.plan = plan.keys.into();
                self.expected = plan.grids.into();
            }
            Ok(None) => {
                self.summary.plans_without_solution += 1;
            }
            Err(e) => {
                self.summary.search_failures += 1;
                log::error!("search failed: {e}");
            }
        }
    }

    /// Drive the head key until it is consumed or the deadline passes.
    fn dispatch_head<H: HostChannel>(
        &mut self,
        channel: &mut H,
        cycle_state: &HostStateV1,
    ) -> Result<(), ChannelError> {
        let baseline = cycle_state.observation();
        let start = self.clock.now();
        let mut sent = false;

        while let Some(&key) = self.plan.front() {
            if !sent || self.retry == RetryPolicy::Resend {
                channel.send(&OutboundMessage::Key(key))?;
                self.summary.keys_sent += 1;
                sent = true;
            }
            let echoed = self.recv(channel)?;

            let elapsed = self.clock.now().saturating_duration_since(start);
            if elapsed > self.key_deadline {
                log::warn!(
                    "key {key:?} unacknowledged after {}ms; dropping {} planned keys",
                    elapsed.as_millis(),
                    self.plan.len()
                );
                self.drop_plan();
                self.summary.plans_timed_out += 1;
                break;
            }
            if echoed.observation() != baseline {
                self.consume_head();
                break;
            }
        }
        Ok(())
    }
}
