//! Binary that solves one host state and prints deterministic output lines
//! for cross-process verification.
//!
//! Usage: `solve_fixture <state.json>`
//!
//! Output: key=value lines (see `FixtureReport`).

use rushlane_kernel::host::HostStateV1;
use rushlane_kernel::proof::hash::{canonical_hash, HashDomain};
use rushlane_search::plan::solve;
use rushlane_search::policy::SearchPolicyV1;
use rushlane_search::tree::SearchStatsV1;
use serde::Serialize;

#[derive(Serialize)]
struct FixtureReport {
    grid_digest: String,
    termination: String,
    move_count: usize,
    keys: String,
    plan_digest: String,
    #[serde(flatten)]
    stats: SearchStatsV1,
}

fn main() {
    let path = std::env::args().nth(1).expect("usage: solve_fixture <state.json>");
    let text = std::fs::read_to_string(&path).expect("state file readable");
    let state = HostStateV1::from_json(&text).expect("valid host state");
    let grid_digest = canonical_hash(HashDomain::Grid, state.grid().flat().as_bytes());

    let report = match solve(&state, &SearchPolicyV1::default()).expect("search pre-flight") {
        Some(plan) => FixtureReport {
            grid_digest: grid_digest.as_str().to_string(),
            termination: termination_type(&plan.termination),
            move_count: plan.move_count(),
            keys: format!("{:?}", plan.key_string()),
            plan_digest: plan.digest.as_str().to_string(),
            stats: plan.stats,
        },
        None => FixtureReport {
            grid_digest: grid_digest.as_str().to_string(),
            termination: "no_solution".into(),
            move_count: 0,
            keys: String::from("\"\""),
            plan_digest: String::from("none"),
            stats: SearchStatsV1::default(),
        },
    };

    let value = serde_json::to_value(&report).expect("report serializes");
    let fields = value.as_object().expect("report is an object");
    for (key, value) in fields {
        match value {
            serde_json::Value::String(s) => println!("{key}={s}"),
            other => println!("{key}={other}"),
        }
    }
}

fn termination_type<T: Serialize>(termination: &T) -> String {
    serde_json::to_value(termination)
        .ok()
        .and_then(|v| v["type"].as_str().map(String::from))
        .unwrap_or_default()
}
