//! Rushlane Kernel: the deterministic board model behind the agent.
//!
//! # API Surface
//!
//! - [`board::Board`] -- parse a flattened grid, locate pieces, apply single-step moves
//! - [`host::state::HostStateV1`] -- the opaque host state with its `grid`, `cursor`
//!   and `selected` fields
//! - [`proof::hash::canonical_hash`] -- domain-separated SHA-256 digests
//!
//! # Module Dependency Direction
//!
//! `board` ← `host`; `proof` stands alone.
//!
//! One-way only. `board` depends on nothing internal.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod board;
pub mod host;
pub mod proof;
