//! Rushlane agent: plays the sliding-car puzzle against a remote host.
//!
//! The agent joins the host, receives game states, asks the search crate
//! for a key plan and dispatches the plan one key at a time, dropping it
//! when a key is not acknowledged within the per-key deadline.
//!
//! The dispatch loop is single-threaded and talks to the host only through
//! the [`channel::HostChannel`] trait; wall time is read only through
//! [`clock::Clock`]. Both seams let tests script the host and the clock.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod channel;
pub mod clock;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod ws;
