use std::{
    io::Write,
    process::{Command, Output, Stdio},
};

fn market_warfare(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_market-warfare"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn market-warfare");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("failed to feed stdin");

    child.wait_with_output().expect("failed to wait for market-warfare")
}

fn exit_code(output: &Output) -> i32 {
    output.status.code().expect("process exited normally")
}

#[test]
fn auto_session_prints_final_state() {
    let output = market_warfare(&["--auto", "--seed", "42", "--rounds", "3"], "");

    let code = exit_code(&output);
    assert!(code == 0 || code == 1, "unexpected exit code {code}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Market Warfare Demo"));
    assert!(stdout.contains("Seed: 42"));
    assert!(stdout.contains("Auto chose:"));
    assert!(stdout.contains("Final State"));
}

#[test]
fn seeded_auto_sessions_replay_identically() {
    let args = ["--auto", "--seed", "1234", "--difficulty", "hard"];
    let first = market_warfare(&args, "");
    let second = market_warfare(&args, "");

    assert_eq!(first.stdout, second.stdout);
    assert_eq!(first.status.code(), second.status.code());
}

#[test]
fn json_report_matches_exit_code() {
    let output = market_warfare(&["--json", "--auto", "--seed", "7"], "");

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout holds only the json report");
    assert_eq!(report["seed"], 7);
    assert_eq!(report["difficulty"], "normal");
    assert_eq!(report["configured_rounds"], 12);

    let success = report["outcome"]["success"]
        .as_bool()
        .expect("success flag is a boolean");
    assert_eq!(exit_code(&output), if success { 0 } else { 1 });

    let played = report["rounds"].as_array().expect("rounds is an array").len();
    assert_eq!(
        report["outcome"]["rounds_played"].as_u64(),
        Some(played as u64)
    );
}

#[test]
fn interactive_session_reprompts_on_bad_keys() {
    let output = market_warfare(&["--seed", "3", "--rounds", "1"], "9\n5\n");

    let code = exit_code(&output);
    assert!(code == 0 || code == 1, "unexpected exit code {code}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Choose your move"));
    assert!(stdout.contains("Invalid. Enter 1-5."));
    assert!(stdout.contains("You hold."));
}

#[test]
fn zero_rounds_is_a_usage_error() {
    let output = market_warfare(&["--auto", "--rounds", "0"], "");

    assert_eq!(exit_code(&output), 2);
    assert!(String::from_utf8_lossy(&output.stderr).contains("error:"));
}

#[test]
fn out_of_range_settings_are_usage_errors() {
    let huge_cash = market_warfare(
        &["--auto", "--starting-cash", "9223372036854775807"],
        "",
    );
    assert_eq!(exit_code(&huge_cash), 2);
    assert!(String::from_utf8_lossy(&huge_cash.stderr).contains("starting cash"));

    let endless = market_warfare(&["--auto", "--rounds", "4294967295"], "");
    assert_eq!(exit_code(&endless), 2);
    assert!(String::from_utf8_lossy(&endless.stderr).contains("exceeds the limit"));
}

#[test]
fn closed_input_aborts_interactive_session() {
    let output = market_warfare(&["--seed", "5", "--rounds", "2"], "");

    assert_eq!(exit_code(&output), 2);
}

#[test]
fn unknown_difficulty_is_rejected() {
    let output = market_warfare(&["--auto", "--difficulty", "brutal"], "");

    assert_eq!(exit_code(&output), 2);
}
