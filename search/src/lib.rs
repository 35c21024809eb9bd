//! Rushlane Search: greedy best-first search over sliding-piece boards.
//!
//! This crate provides the planning layer for the agent. It depends only on
//! `rushlane_kernel`; it does NOT depend on `rushlane_agent`.
//!
//! # Crate dependency graph
//!
//! ```text
//! rushlane_kernel  ←  rushlane_search  ←  rushlane_agent
//! (board, host)       (tree, keys)         (config, dispatch)
//! ```
//!
//! # Key types
//!
//! - [`SearchNodeV1`](node::SearchNodeV1): immutable arena node with parent index
//! - [`ActionV1`](node::ActionV1): the displacement linking a parent to a child
//! - [`GameTree`](tree::GameTree): arena, frontier and visited set for one puzzle
//! - [`Key`](keys::Key): a primitive key press
//! - [`Plan`](plan::Plan): the ordered key presses solving one puzzle

#![forbid(unsafe_code)]

pub mod error;
pub mod frontier;
pub mod keys;
pub mod node;
pub mod plan;
pub mod policy;
pub mod tree;
