//! Shared puzzle regimes for the rushlane benchmark suites.

use rushlane_kernel::host::HostStateV1;
use rushlane_search::policy::{PieceOrderV1, SearchPolicyV1};

/// A named puzzle with the policy it is searched under.
pub struct Regime {
    pub name: &'static str,
    pub state: HostStateV1,
    pub policy: SearchPolicyV1,
}

/// Wrap a flattened board in a host state with the cursor at the origin.
///
/// # Panics
///
/// Panics if `flat` cannot form a host state. Benchmark setup failures are
/// fatal.
#[must_use]
pub fn host_state(flat: &str) -> HostStateV1 {
    HostStateV1::from_value(serde_json::json!({
        "grid": format!("1 {flat} 0"),
        "cursor": [0, 0],
        "selected": "",
    }))
    .expect("benchmark host state")
}

fn regime(name: &'static str, flat: &str, piece_order: PieceOrderV1) -> Regime {
    Regime {
        name,
        state: host_state(flat),
        policy: SearchPolicyV1 {
            piece_order,
            ..SearchPolicyV1::default()
        },
    }
}

/// Short solve: one blocker, three moves.
#[must_use]
pub fn regime_blocked_lane() -> Regime {
    regime("blocked_lane", "ooooAABoooBooooo", PieceOrderV1::Lexicographic)
}

/// 6x6 board with two vertical blockers and a wall.
#[must_use]
pub fn regime_six_by_six() -> Regime {
    regime(
        "six_by_six",
        "ooBoooAABoCoooooCoDDooEEooFoooooFxoo",
        PieceOrderV1::Lexicographic,
    )
}

/// First-seen ordering: many short-circuits into non-goal pieces before a
/// solution appears.
#[must_use]
pub fn regime_short_circuit_pressure() -> Regime {
    regime(
        "short_circuit_pressure",
        "oooBooAAoBCoooooCoooDDooEoooFFEooooo",
        PieceOrderV1::FirstSeen,
    )
}

/// No solution: the search must exhaust every reachable grid.
#[must_use]
pub fn regime_exhaustive_dead_end() -> Regime {
    regime(
        "exhaustive_dead_end",
        "ooBoooAABoCoooooCoDDooEEooFoooooFxoo",
        PieceOrderV1::FirstSeen,
    )
}

/// Every regime, in report order.
#[must_use]
pub fn all_regimes() -> Vec<Regime> {
    vec![
        regime_blocked_lane(),
        regime_six_by_six(),
        regime_short_circuit_pressure(),
        regime_exhaustive_dead_end(),
    ]
}
