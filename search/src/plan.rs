//! Search entry point: host state in, key plan out.

use rushlane_kernel::host::HostStateV1;
use rushlane_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};

use crate::error::SearchError;
use crate::keys::{first_transition_keys, keys_to_string, plan_grids, plan_keys, Key};
use crate::policy::SearchPolicyV1;
use crate::tree::{GameTree, SearchStatsV1, TerminationReasonV1};

/// The key presses that solve one puzzle, with provenance.
#[derive(Debug, Clone)]
pub struct Plan {
    /// Keys in dispatch order. Empty when the root is already solved.
    pub keys: Vec<Key>,
    /// Flattened grid the host should show before each key, then the solved
    /// grid; one entry longer than `keys`.
    pub grids: Vec<String>,
    /// Number of nodes on the winning path, root and goal included.
    pub path_len: usize,
    pub termination: TerminationReasonV1,
    pub stats: SearchStatsV1,
    /// `canonical_hash(Plan, keys)`.
    pub digest: ContentHash,
}

impl Plan {
    /// Number of board moves on the winning path.
    #[must_use]
    pub fn move_count(&self) -> usize {
        self.path_len.saturating_sub(1)
    }

    /// Keys as wire symbols.
    #[must_use]
    pub fn key_string(&self) -> String {
        keys_to_string(&self.keys)
    }
}

/// Digest of a key sequence.
#[must_use]
pub fn plan_digest(keys: &[Key]) -> ContentHash {
    canonical_hash(HashDomain::Plan, keys_to_string(keys).as_bytes())
}

/// Search from `host_state` and translate the winning path into keys.
///
/// Returns `Ok(None)` when no solution was found (frontier or budget
/// exhausted). If the first transition of a multi-node path translates to
/// no keys, a fresh tree is searched once more. Every move is a one-cell
/// drag that emits at least one key, so the second search only runs if
/// that stops holding.
///
/// # Errors
///
/// Any pre-flight [`SearchError`] from [`GameTree::new`].
pub fn solve(
    host_state: &HostStateV1,
    policy: &SearchPolicyV1,
) -> Result<Option<Plan>, SearchError> {
    match solve_once(host_state, policy)? {
        Some(found) if found.first_transition_empty => {
            log::warn!(
                "first transition of a {}-node path produced no keys; searching again",
                found.plan.path_len
            );
            Ok(solve_once(host_state, policy)?.map(|again| again.plan))
        }
        other => Ok(other.map(|found| found.plan)),
    }
}

struct Solved {
    plan: Plan,
    first_transition_empty: bool,
}

fn solve_once(
    host_state: &HostStateV1,
    policy: &SearchPolicyV1,
) -> Result<Option<Solved>, SearchError> {
    let mut tree = GameTree::new(host_state.clone(), policy)?;
    let grid = canonical_hash(HashDomain::Grid, host_state.grid().flat().as_bytes());
    let outcome = tree.search();

    let Some(goal) = outcome.goal_node else {
        log::info!(
            "no solution for grid {}: {} after {} expansions",
            grid.short(),
            outcome.termination,
            outcome.stats.expansions
        );
        return Ok(None);
    };

    let path = tree.reconstruct_path(goal);
    let keys = plan_keys(tree.nodes(), &path);
    let grids = plan_grids(tree.nodes(), &path);
    let first_transition_empty =
        path.len() > 1 && first_transition_keys(tree.nodes(), &path).is_empty();
    let digest = plan_digest(&keys);
    log::info!(
        "solved grid {} in {} moves / {} keys ({} expansions, {} nodes)",
        grid.short(),
        path.len().saturating_sub(1),
        keys.len(),
        outcome.stats.expansions,
        tree.nodes().len()
    );

    Ok(Some(Solved {
        plan: Plan {
            keys,
            grids,
            path_len: path.len(),
            termination: outcome.termination,
            stats: outcome.stats,
            digest,
        },
        first_transition_empty,
    }))
}
