//! Board module: cells, coordinates, directions and the grid itself.
//!
//! This is the foundational layer. No other kernel module is imported here.

pub mod cell;
pub mod grid;

pub use cell::{Cell, Coord, Direction, GOAL_PIECE};
pub use grid::{Board, GridError};
