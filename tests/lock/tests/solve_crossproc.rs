//! Cross-process determinism for `solve_fixture`.
//!
//! Writes host states into a temporary directory, spawns the fixture binary
//! under several environment variants and asserts identical output.

use std::path::{Path, PathBuf};
use std::process::Command;

fn binary_path() -> String {
    let mut path = std::env::current_exe()
        .expect("can resolve test binary path")
        .parent()
        .expect("binary dir exists")
        .parent()
        .expect("deps parent exists")
        .to_path_buf();
    path.push("solve_fixture");
    path.to_string_lossy().to_string()
}

fn write_state(dir: &Path, name: &str, flat: &str) -> PathBuf {
    let path = dir.join(name);
    let state = serde_json::json!({
        "level": 4,
        "grid": format!("4 {flat} 17"),
        "cursor": [0, 0],
        "selected": "",
        "dimensions": [4, 4],
    });
    std::fs::write(&path, state.to_string()).expect("write state file");
    path
}

fn run_variant(state: &Path, work_dir: &Path, env_overrides: &[(&str, &str)]) -> String {
    let bin = binary_path();

    let mut command = Command::new(&bin);
    command.arg(state).current_dir(work_dir);
    command
        .env_remove("LC_ALL")
        .env_remove("LANG")
        .env_remove("RUST_LOG");
    for &(key, val) in env_overrides {
        command.env(key, val);
    }

    let output = command
        .output()
        .unwrap_or_else(|e| panic!("failed to spawn {bin} (overrides={env_overrides:?}): {e}"));
    assert!(
        output.status.success(),
        "solve_fixture exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout is valid UTF-8")
}

#[test]
fn crossproc_determinism_solved_plan() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let state = write_state(dir.path(), "blocked.json", "ooooAABoooBooooo");

    let baseline = run_variant(&state, dir.path(), &[]);
    assert!(baseline.contains("termination=goal_reached\n"), "{baseline}");
    assert!(baseline.contains("move_count=3\n"), "{baseline}");
    assert!(baseline.contains("keys=\"dds s aaw dd\"\n"), "{baseline}");
    assert!(baseline.contains("plan_digest=sha256:"), "{baseline}");
    assert!(baseline.contains("grid_digest=sha256:"), "{baseline}");
    assert!(baseline.contains("expansions=3\n"), "{baseline}");

    let alt_cwd = std::env::temp_dir();
    assert_eq!(baseline, run_variant(&state, &alt_cwd, &[]), "cwd changed output");
    assert_eq!(
        baseline,
        run_variant(&state, dir.path(), &[("LC_ALL", "C"), ("LANG", "C")]),
        "locale changed output"
    );
    assert_eq!(
        baseline,
        run_variant(
            &state,
            dir.path(),
            &[("RUST_LOG", "trace"), ("TZ", "America/New_York"), ("NAME", "noise")]
        ),
        "spurious env vars changed output"
    );
}

#[test]
fn crossproc_unsolvable_state() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let state = write_state(dir.path(), "walled.json", "AAxoxxxxxxxxxxxx");

    let out = run_variant(&state, dir.path(), &[]);
    assert!(out.contains("termination=no_solution\n"), "{out}");
    assert!(out.contains("plan_digest=none\n"), "{out}");
    assert_eq!(out, run_variant(&state, dir.path(), &[]));
}

#[test]
fn grid_digest_ignores_token_framing() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let a = write_state(dir.path(), "a.json", "ooooAABoooBooooo");
    let b_path = dir.path().join("b.json");
    std::fs::write(
        &b_path,
        r#"{"grid": "9 ooooAABoooBooooo 0", "cursor": [0, 0], "selected": ""}"#,
    )
    .expect("write state file");

    let digest = |out: &str| {
        out.lines()
            .find(|l| l.starts_with("grid_digest="))
            .map(String::from)
            .expect("grid_digest line")
    };
    let out_a = run_variant(&a, dir.path(), &[]);
    let out_b = run_variant(&b_path, dir.path(), &[]);
    assert_eq!(digest(&out_a), digest(&out_b));
    assert_eq!(out_a, out_b);
}
