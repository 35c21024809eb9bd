//! Host module: the state object echoed by the game host after every key.

pub mod state;

pub use state::{GridToken, HostStateError, HostStateV1, Observation};
