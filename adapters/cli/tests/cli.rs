use std::{
    io::Write,
    process::{Command, Output, Stdio},
};

use gridwalk_world::Board;

fn gridwalk(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_gridwalk"))
        .args(args)
        .env("RUST_LOG", "off")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to launch gridwalk binary");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("gridwalk exits")
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "gridwalk failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).expect("utf-8 stdout")
}

#[test]
fn show_prints_a_loadable_layout() {
    let output = gridwalk(&["show", "--seed", "7", "--width", "10", "--height", "6"], "");
    let layout = stdout(&output);

    let board = Board::from_ascii(&layout).expect("printed layout parses");
    assert_eq!(board.width(), 10);
    assert_eq!(board.height(), 6);
    assert_eq!(board.start().column(), 0);
    assert_eq!(board.end().column(), 9);
}

#[test]
fn same_seed_shows_same_board() {
    let args = ["show", "--seed", "21", "--width", "12", "--height", "12"];
    assert_eq!(stdout(&gridwalk(&args, "")), stdout(&gridwalk(&args, "")));
}

#[test]
fn play_reads_moves_from_stdin() {
    let path = std::env::temp_dir().join(format!("gridwalk-cli-{}.txt", std::process::id()));
    std::fs::write(&path, "S..\n...\n..E\n").expect("write board file");
    let board = path.to_str().expect("utf-8 temp path");

    let output = gridwalk(
        &["play", "--board", board, "--json"],
        "down\ndown\nright\nright\n",
    );
    let _ = std::fs::remove_file(&path);

    let text = stdout(&output);
    let last: serde_json::Value =
        serde_json::from_str(text.lines().last().expect("output lines")).expect("json line");
    assert_eq!(last["status"], "won");
    assert_eq!(last["moves_remaining"], 446);
}

#[test]
fn missing_board_file_fails() {
    let output = gridwalk(&["solve", "--board", "/nonexistent/gridwalk-board.txt"], "");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("read board file"));
}
