//! Search policy types.

use crate::error::SearchError;

/// Search budget and move-generation ordering.
///
/// The default policy is unbounded: the tree grows until a goal is found or
/// the frontier is exhausted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPolicyV1 {
    /// Hard cap on node expansions (`None` = unbounded).
    pub max_expansions: Option<u64>,
    /// Order in which piece letters are tried during expansion.
    pub piece_order: PieceOrderV1,
}

impl SearchPolicyV1 {
    /// Validate that this policy can run.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if `max_expansions` is
    /// `Some(0)`, which could never expand the root.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_expansions == Some(0) {
            return Err(SearchError::InvalidPolicy {
                detail: "max_expansions must be at least 1".into(),
            });
        }
        Ok(())
    }
}

impl Default for SearchPolicyV1 {
    fn default() -> Self {
        Self {
            max_expansions: None,
            piece_order: PieceOrderV1::Lexicographic,
        }
    }
}

/// Piece iteration order.
///
/// Ordering decides which candidate wins heuristic ties (the frontier sort
/// is stable) and which move the lane-clear short-circuit commits to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceOrderV1 {
    /// Letters sorted ascending (`A` first). Default.
    Lexicographic,
    /// Letters in order of first appearance in the row-major grid.
    FirstSeen,
}
