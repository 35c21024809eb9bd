//! Action translator: turn a winning path into primitive key presses.
//!
//! Each transition is played as: optional deselect, walk the cursor to the
//! piece, optional select, walk the cursor (dragging the piece) to its new
//! position. Cursor walks emit horizontal keys first, then vertical keys,
//! one key per cell.

use rushlane_kernel::board::Coord;

use crate::node::{ActionV1, NodeId, SearchNodeV1};

/// A primitive key press understood by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// `w`
    Up,
    /// `a`
    Left,
    /// `s`
    Down,
    /// `d`
    Right,
    /// `' '`: select or deselect the piece under the cursor.
    Toggle,
}

impl Key {
    /// The single-character wire symbol.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Up => 'w',
            Self::Left => 'a',
            Self::Down => 's',
            Self::Right => 'd',
            Self::Toggle => ' ',
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'w' => Some(Self::Up),
            'a' => Some(Self::Left),
            's' => Some(Self::Down),
            'd' => Some(Self::Right),
            ' ' => Some(Self::Toggle),
            _ => None,
        }
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Render keys as their wire symbols.
#[must_use]
pub fn keys_to_string(keys: &[Key]) -> String {
    keys.iter().map(|k| k.as_char()).collect()
}

/// Keys that walk the cursor from `from` to `to`.
#[must_use]
pub fn move_keys(from: Coord, to: Coord) -> Vec<Key> {
    let mut keys = Vec::with_capacity(from.x.abs_diff(to.x) + from.y.abs_diff(to.y));
    if from.x < to.x {
        keys.extend(std::iter::repeat(Key::Right).take(to.x - from.x));
    } else {
        keys.extend(std::iter::repeat(Key::Left).take(from.x - to.x));
    }
    if from.y > to.y {
        keys.extend(std::iter::repeat(Key::Up).take(from.y - to.y));
    } else {
        keys.extend(std::iter::repeat(Key::Down).take(to.y - from.y));
    }
    keys
}

/// Keys for one transition, given the selection in the parent state.
#[must_use]
pub fn action_to_keys(selected: Option<char>, action: &ActionV1) -> Vec<Key> {
    let mut keys = Vec::new();
    if selected.is_some_and(|s| s != action.piece) {
        keys.push(Key::Toggle);
    }
    keys.extend(move_keys(action.cursor, action.before));
    if selected != Some(action.piece) {
        keys.push(Key::Toggle);
    }
    keys.extend(move_keys(action.before, action.after));
    keys
}

/// Concatenated keys for every transition along `path` (root first).
///
/// Ids missing from `nodes` and nodes without an action are skipped.
#[must_use]
pub fn plan_keys(nodes: &[SearchNodeV1], path: &[NodeId]) -> Vec<Key> {
    path.windows(2)
        .filter_map(|pair| {
            let parent = nodes.get(pair[0])?;
            let action = nodes.get(pair[1])?.action.as_ref()?;
            Some(action_to_keys(parent.host_state.selected(), action))
        })
        .flatten()
        .collect()
}

/// Keys for the first transition of `path` only.
#[must_use]
pub fn first_transition_keys(nodes: &[SearchNodeV1], path: &[NodeId]) -> Vec<Key> {
    plan_keys(nodes, &path[..path.len().min(2)])
}

/// The flattened grid the host should show before each key of
/// [`plan_keys`], followed by the grid at the end of `path`.
///
/// Only the final key of a transition (the one-cell drag) changes the
/// board, so every key of a transition expects the parent's grid. The
/// result always has one more entry than the key list.
#[must_use]
pub fn plan_grids(nodes: &[SearchNodeV1], path: &[NodeId]) -> Vec<String> {
    let mut grids: Vec<String> = path
        .windows(2)
        .filter_map(|pair| {
            let parent = nodes.get(pair[0])?;
            let action = nodes.get(pair[1])?.action.as_ref()?;
            let count = action_to_keys(parent.host_state.selected(), action).len();
            Some(std::iter::repeat(parent.board.flatten()).take(count))
        })
        .flatten()
        .collect();
    if let Some(last) = path.last().and_then(|&id| nodes.get(id)) {
        grids.push(last.board.flatten());
    }
    grids
}
