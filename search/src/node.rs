//! Core search node and action types.

use rushlane_kernel::board::{Board, Coord};
use rushlane_kernel::host::HostStateV1;

use crate::error::SearchError;

/// Position of a node in its tree's arena. Parents always have a smaller id
/// than their children, so parent links can never form a cycle.
pub type NodeId = usize;

/// The displacement that links a parent node to a child.
///
/// Records enough to derive the key presses for the transition: where the
/// cursor started, where the piece's first endpoint was, and where it ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionV1 {
    /// The piece that moved.
    pub piece: char,
    /// Cursor position before any key of this transition.
    pub cursor: Coord,
    /// First endpoint (scan order) before the move.
    pub before: Coord,
    /// First endpoint (scan order) after the move.
    pub after: Coord,
}

/// An immutable node in the search arena.
///
/// Nodes are created when their parent is expanded and are never mutated
/// afterward; they live until the owning tree is dropped.
#[derive(Debug, Clone)]
pub struct SearchNodeV1 {
    /// Host state this node represents (hypothetical for non-root nodes).
    pub host_state: HostStateV1,
    /// Board side N.
    pub grid_size: usize,
    /// Decoded board.
    pub board: Board,
    /// Parent index (`None` for root).
    pub parent: Option<NodeId>,
    /// Tree depth (root = 0).
    pub depth: u32,
    /// The action that produced this node from its parent.
    pub action: Option<ActionV1>,
    /// Obstacles between the goal piece and the exit; lower is better.
    pub heuristic: usize,
}

/// Build a node from a host state.
///
/// Decodes the board from the state's grid token; `grid_size` is the
/// board side.
///
/// # Errors
///
/// Returns [`SearchError::Grid`] if the grid token is not a perfect square
/// or contains characters outside the grid alphabet.
pub fn create_node(
    host_state: HostStateV1,
    parent: Option<NodeId>,
    depth: u32,
    action: Option<ActionV1>,
    heuristic: usize,
) -> Result<SearchNodeV1, SearchError> {
    let board = host_state.board()?;
    Ok(SearchNodeV1 {
        host_state,
        grid_size: board.size(),
        board,
        parent,
        depth,
        action,
        heuristic,
    })
}
