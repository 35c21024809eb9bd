//! `GameTree`: one search session over one puzzle instance.
//!
//! The tree owns an append-only arena of [`SearchNodeV1`], the
//! [`StableFrontier`] and its visited set. Nothing is shared across
//! sessions; dropping the tree drops the whole search.
//!
//! # Expansion
//!
//! For each piece letter (in policy order) and each [`Direction`] (in
//! `Direction::ALL` order), the piece is moved one cell on the node's board.
//! Illegal moves produce nothing. Each legal move becomes a candidate whose
//! action records the cursor, the piece's first endpoint before the move and
//! its first endpoint after.
//!
//! When the goal piece's lane is already clear on the node being expanded,
//! the first legal candidate generated is returned alone and the rest of the
//! loop is skipped. The committed move is whichever piece/direction was
//! being tried first, which is not necessarily the goal piece.
//!
//! Candidates whose flattened grid is new become children with heuristic
//! [`Board::obstacles_ahead`]; the frontier is then re-sorted and the fresh
//! children are checked for the goal in creation order.

use rushlane_kernel::board::{Board, Direction};
use rushlane_kernel::host::HostStateV1;

use crate::error::SearchError;
use crate::frontier::StableFrontier;
use crate::node::{create_node, ActionV1, NodeId, SearchNodeV1};
use crate::policy::{PieceOrderV1, SearchPolicyV1};

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TerminationReasonV1 {
    /// The root already satisfies the goal; nothing was expanded.
    RootIsGoal,
    /// A freshly created child satisfies the goal.
    GoalReached { node_id: NodeId },
    /// Every reachable grid was expanded without reaching the goal.
    FrontierExhausted,
    /// `max_expansions` was hit first.
    ExpansionBudgetExceeded,
}

impl std::fmt::Display for TerminationReasonV1 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RootIsGoal => f.write_str("root_is_goal"),
            Self::GoalReached { .. } => f.write_str("goal_reached"),
            Self::FrontierExhausted => f.write_str("frontier_exhausted"),
            Self::ExpansionBudgetExceeded => f.write_str("expansion_budget_exceeded"),
        }
    }
}

/// Counters for one search session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct SearchStatsV1 {
    pub expansions: u64,
    pub nodes_created: u64,
    pub duplicates_suppressed: u64,
    pub short_circuits: u64,
    pub frontier_high_water: usize,
}

/// Result of [`GameTree::search`].
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub termination: TerminationReasonV1,
    /// The winning node (root for [`TerminationReasonV1::RootIsGoal`]).
    pub goal_node: Option<NodeId>,
    pub stats: SearchStatsV1,
}

impl SearchOutcome {
    /// Returns `true` if a winning node was found.
    #[must_use]
    pub fn is_goal_reached(&self) -> bool {
        self.goal_node.is_some()
    }
}

/// A legal single-step move out of a node.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub action: ActionV1,
    pub board: Board,
}

/// Candidates produced by expanding one node.
#[derive(Debug, Clone)]
pub struct Expansion {
    pub candidates: Vec<Candidate>,
    /// The lane-clear short-circuit fired.
    pub short_circuit: bool,
}

/// The search tree for one puzzle instance.
pub struct GameTree {
    nodes: Vec<SearchNodeV1>,
    frontier: StableFrontier,
    pieces: Vec<char>,
    policy: SearchPolicyV1,
    stats: SearchStatsV1,
}

impl GameTree {
    /// Root index.
    pub const ROOT: NodeId = 0;

    /// Build a session rooted at `host_state`.
    ///
    /// # Errors
    ///
    /// - [`SearchError::InvalidPolicy`] if the policy fails validation.
    /// - [`SearchError::Grid`] if the board token is malformed.
    /// - [`SearchError::MissingGoalPiece`] if the board has no goal piece.
    pub fn new(host_state: HostStateV1, policy: &SearchPolicyV1) -> Result<Self, SearchError> {
        policy.validate()?;
        let root = create_node(host_state, None, 0, None, 0)?;
        let heuristic = root
            .board
            .obstacles_ahead()
            .ok_or(SearchError::MissingGoalPiece)?;
        let pieces = match policy.piece_order {
            PieceOrderV1::Lexicographic => root.board.piece_letters().into_iter().collect(),
            PieceOrderV1::FirstSeen => root.board.piece_letters_in_order(),
        };
        let root_grid = root.board.flatten();
        let root = SearchNodeV1 { heuristic, ..root };
        Ok(Self {
            nodes: vec![root],
            frontier: StableFrontier::with_root(Self::ROOT, root_grid),
            pieces,
            policy: policy.clone(),
            stats: SearchStatsV1::default(),
        })
    }

    /// The arena, indexed by [`NodeId`].
    #[must_use]
    pub fn nodes(&self) -> &[SearchNodeV1] {
        &self.nodes
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&SearchNodeV1> {
        self.nodes.get(id)
    }

    #[must_use]
    pub fn root(&self) -> &SearchNodeV1 {
        &self.nodes[Self::ROOT]
    }

    /// Piece letters in iteration order.
    #[must_use]
    pub fn pieces(&self) -> &[char] {
        &self.pieces
    }

    #[must_use]
    pub fn frontier(&self) -> &StableFrontier {
        &self.frontier
    }

    #[must_use]
    pub fn stats(&self) -> SearchStatsV1 {
        self.stats
    }

    /// Generate the candidate moves out of `id`.
    ///
    /// Returns an empty expansion for an unknown id.
    #[must_use]
    pub fn candidates(&self, id: NodeId) -> Expansion {
        let Some(node) = self.nodes.get(id) else {
            return Expansion {
                candidates: Vec::new(),
                short_circuit: false,
            };
        };
        let lane_clear = node.board.lane_is_clear();
        // Where the cursor rests when this node's state is reached.
        let cursor = match &node.action {
            Some(action) => action.after,
            None => node.host_state.cursor().unwrap_or_default(),
        };

        let mut candidates = Vec::new();
        for &piece in &self.pieces {
            let Some(&before) = node.board.piece_coordinates(piece).first() else {
                continue;
            };
            for direction in Direction::ALL {
                let Some(board) = node.board.apply_move(piece, direction) else {
                    continue;
                };
                let Some(&after) = board.piece_coordinates(piece).first() else {
                    continue;
                };
                let candidate = Candidate {
                    action: ActionV1 {
                        piece,
                        cursor,
                        before,
                        after,
                    },
                    board,
                };
                if lane_clear {
                    return Expansion {
                        candidates: vec![candidate],
                        short_circuit: true,
                    };
                }
                candidates.push(candidate);
            }
        }
        Expansion {
            candidates,
            short_circuit: false,
        }
    }

    /// Grow the tree until a goal is found, the frontier is exhausted, or the
    /// expansion budget runs out.
    pub fn search(&mut self) -> SearchOutcome {
        if self.root().board.is_goal() {
            return self.finish(TerminationReasonV1::RootIsGoal, Some(Self::ROOT));
        }

        loop {
            if self
                .policy
                .max_expansions
                .is_some_and(|max| self.stats.expansions >= max)
            {
                return self.finish(TerminationReasonV1::ExpansionBudgetExceeded, None);
            }

            let Some(current) = self.frontier.pop() else {
                return self.finish(TerminationReasonV1::FrontierExhausted, None);
            };

            let expansion = self.candidates(current);
            self.stats.expansions += 1;
            if expansion.short_circuit {
                self.stats.short_circuits += 1;
            }

            let mut fresh = Vec::with_capacity(expansion.candidates.len());
            for candidate in expansion.candidates {
                if !self.frontier.mark_visited(candidate.board.flatten()) {
                    self.stats.duplicates_suppressed += 1;
                    continue;
                }
                let child = self.child(current, candidate);
                fresh.push(self.nodes.len());
                self.nodes.push(child);
                self.stats.nodes_created += 1;
            }

            let nodes = &self.nodes;
            self.frontier.extend_sorted(&fresh, |id| nodes[*id].heuristic);

            log::trace!(
                "expanded node {current}: {} children, frontier {}",
                fresh.len(),
                self.frontier.len()
            );

            let goal = fresh
                .iter()
                .copied()
                .find(|id| self.nodes[*id].board.is_goal());
            if let Some(goal) = goal {
                return self.finish(TerminationReasonV1::GoalReached { node_id: goal }, Some(goal));
            }
        }
    }

    fn child(&self, parent_id: NodeId, candidate: Candidate) -> SearchNodeV1 {
        let parent = &self.nodes[parent_id];
        let Candidate { action, board } = candidate;
        let host_state = parent
            .host_state
            .patched(&board, action.after, action.piece);
        SearchNodeV1 {
            host_state,
            grid_size: board.size(),
            heuristic: board.obstacles_ahead().unwrap_or(0),
            board,
            parent: Some(parent_id),
            depth: parent.depth + 1,
            action: Some(action),
        }
    }

    fn finish(
        &mut self,
        termination: TerminationReasonV1,
        goal_node: Option<NodeId>,
    ) -> SearchOutcome {
        self.stats.frontier_high_water = self.frontier.high_water();
        log::debug!(
            "search finished: {termination} after {} expansions, {} nodes",
            self.stats.expansions,
            self.nodes.len()
        );
        SearchOutcome {
            termination,
            goal_node,
            stats: self.stats,
        }
    }

    /// Node ids from the root to `goal`, both inclusive.
    ///
    /// Returns an empty path for an unknown id.
    #[must_use]
    pub fn reconstruct_path(&self, goal: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = self.nodes.get(goal).map(|_| goal);

        while let Some(id) = current {
            path.push(id);
            current = self.nodes.get(id).and_then(|n| n.parent);
        }

        path.reverse();
        path
    }
}
