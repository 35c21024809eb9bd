//! Dispatch loop lock tests against the in-process host.
//!
//! Proves:
//! 1. A full session joins, plays the planned keys one by one and leaves
//!    the host's board solved, with every key consumed exactly once.
//! 2. A host that stops reacting makes every plan time out; plans are
//!    dropped and recomputed instead of failing the session.
//! 3. Resend and re-await differ only in how many key messages are written.
//! 4. A board that changes under a live plan (a new level) drops the plan
//!    and the new board is solved from scratch.

use std::time::Duration;

use lock_tests::host_sim::{SimHost, SteppedClock};
use rushlane_agent::config::AgentConfig;
use rushlane_agent::dispatch::{Dispatcher, RetryPolicy};
use rushlane_kernel::board::Coord;
use rushlane_search::keys::keys_to_string;

fn config(retry: RetryPolicy) -> AgentConfig {
    AgentConfig {
        name: "lock".into(),
        retry,
        ..AgentConfig::default()
    }
}

// ---------------------------------------------------------------------------
// 1. Full sessions
// ---------------------------------------------------------------------------

#[test]
fn session_solves_blocked_lane() {
    let clock = SteppedClock::new();
    let mut host = SimHost::new("ooooAABoooBooooo", Coord::new(0, 0), 100, clock.clone());
    let summary = Dispatcher::new(&config(RetryPolicy::Resend), clock)
        .run(&mut host)
        .unwrap();

    assert_eq!(host.joined_as(), Some("lock"));
    assert!(host.board().is_goal());
    assert_eq!(keys_to_string(host.keys()), "dds s aaw dd");
    assert_eq!(summary.keys_sent, 12);
    assert_eq!(summary.keys_consumed, 12);
    assert_eq!(summary.plans_computed, 1);
    assert_eq!(summary.plans_timed_out, 0);
}

#[test]
fn session_solves_larger_boards() {
    for (flat, cursor) in [
        ("oooBooAAoBCoooooCoooDDooEoooFFEooooo", Coord::new(1, 0)),
        ("ooBoooAABoCoooooCoDDooEEooFoooooFxoo", Coord::new(0, 0)),
    ] {
        let clock = SteppedClock::new();
        let mut host = SimHost::new(flat, cursor, 1_000, clock.clone());
        let summary = Dispatcher::new(&config(RetryPolicy::Resend), clock)
            .run(&mut host)
            .unwrap();
        assert!(host.board().is_goal(), "{flat}: not solved\n{}", host.board());
        assert_eq!(summary.keys_consumed, summary.keys_sent, "{flat}");
        assert_eq!(summary.plans_timed_out, 0, "{flat}");
        assert_eq!(summary.search_failures, 0, "{flat}");
    }
}

#[test]
fn already_solved_board_sends_no_keys() {
    let clock = SteppedClock::new();
    let mut host = SimHost::new("oooBAAooo", Coord::new(1, 1), 100, clock.clone());
    let summary = Dispatcher::new(&config(RetryPolicy::Resend), clock)
        .run(&mut host)
        .unwrap();
    assert!(host.keys().is_empty());
    assert_eq!(summary.states_received, 1);
    assert_eq!(summary.plans_computed, 1);
}

// ---------------------------------------------------------------------------
// 2. Timeouts
// ---------------------------------------------------------------------------

#[test]
fn unresponsive_host_times_out_every_plan() {
    let clock = SteppedClock::new();
    let mut host = SimHost::new("ooooAABoooBooooo", Coord::new(0, 0), 10, clock.clone())
        .with_tick(Duration::from_millis(60))
        .ignoring_keys();
    let summary = Dispatcher::new(&config(RetryPolicy::Resend), clock)
        .run(&mut host)
        .unwrap();

    // Each cycle: one update, then four echoes (60..240ms) before the
    // 200ms deadline trips.
    assert_eq!(summary.plans_timed_out, 2);
    assert_eq!(summary.plans_computed, 2);
    assert_eq!(summary.keys_consumed, 0);
    assert_eq!(keys_to_string(host.keys()), "dddddddd");
}

// ---------------------------------------------------------------------------
// 3. Retry policy
// ---------------------------------------------------------------------------

#[test]
fn reawait_writes_one_message_per_attempt() {
    let clock = SteppedClock::new();
    let mut host = SimHost::new("ooooAABoooBooooo", Coord::new(0, 0), 10, clock.clone())
        .with_tick(Duration::from_millis(60))
        .ignoring_keys();
    let summary = Dispatcher::new(&config(RetryPolicy::Reawait), clock)
        .run(&mut host)
        .unwrap();

    assert_eq!(summary.plans_timed_out, 2);
    assert_eq!(keys_to_string(host.keys()), "dd");
    assert_eq!(summary.keys_sent, 2);
}

#[test]
fn retry_policy_does_not_change_a_responsive_session() {
    let mut played = Vec::new();
    for retry in [RetryPolicy::Resend, RetryPolicy::Reawait] {
        let clock = SteppedClock::new();
        let mut host = SimHost::new("BBoCAAoCoxoooooo", Coord::new(0, 0), 200, clock.clone());
        let summary = Dispatcher::new(&config(retry), clock).run(&mut host).unwrap();
        assert!(host.board().is_goal());
        played.push((keys_to_string(host.keys()), summary));
    }
    assert_eq!(played[0], played[1]);
}

// ---------------------------------------------------------------------------
// 4. Board changes under a live plan
// ---------------------------------------------------------------------------

#[test]
fn level_switch_mid_plan_replans_on_new_board() {
    let clock = SteppedClock::new();
    let mut host = SimHost::new("ooooAABoooBooooo", Coord::new(0, 0), 100, clock.clone())
        .switching_level(1, "AAoBoooBoooooooo", Coord::new(2, 2));
    let summary = Dispatcher::new(&config(RetryPolicy::Resend), clock)
        .run(&mut host)
        .unwrap();

    // One key of the first plan, then B down and A right twice on the new
    // board.
    assert_eq!(keys_to_string(host.keys()), "ddww s aaaw dd");
    assert!(host.board().is_goal());
    assert_eq!(host.board().flatten(), "ooAAoooBoooBoooo");
    assert_eq!(summary.plans_invalidated, 1);
    assert_eq!(summary.plans_computed, 2);
    assert_eq!(summary.keys_sent, 14);
    assert_eq!(summary.keys_consumed, 14);
    assert_eq!(summary.plans_timed_out, 0);
}

#[test]
fn undisturbed_session_never_invalidates() {
    let clock = SteppedClock::new();
    let mut host = SimHost::new(
        "ooBoooAABoCoooooCoDDooEEooFoooooFxoo",
        Coord::new(0, 0),
        1_000,
        clock.clone(),
    );
    let summary = Dispatcher::new(&config(RetryPolicy::Resend), clock)
        .run(&mut host)
        .unwrap();
    assert!(host.board().is_goal());
    assert_eq!(summary.plans_invalidated, 0);
    assert_eq!(summary.plans_computed, 1);
}
