//! Scenario regressions driven through the `Scenario` harness.
//!
//! The shipped regression verifies the tool's tempfile handling for action
//! lists: each command in a two-action list must get its own response file,
//! and the dry-run listing must show both expansions.

#![cfg(unix)]

mod common;

use buildbench::{BenchError, Scenario};
use common::FakeTool;

/// Fixture configuration: two chained actions, both using a response file.
const ACTION_LIST_FIXTURE: &str = "\
output = file.output
actions = [
    xxx.py -o$TEMPFILE file.input,
    yyy.py -ofile.output $TEMPFILE,
]
";

/// Stub emulating the tool's dry-run listing for the action-list fixture.
fn action_list_tool() -> FakeTool {
    FakeTool::install(
        "t1=$(mktemp)\n\
         t2=$(mktemp)\n\
         echo \"Using tempfile $t1 for command line:\"\n\
         echo \"xxx.py -otempfile file.input\"\n\
         echo \"xxx.py @$t1\"\n\
         echo \"Using tempfile $t2 for command line:\"\n\
         echo \"yyy.py -ofile.output tempfile\"\n\
         echo \"yyy.py @$t2\"\n\
         rm -f \"$t1\" \"$t2\"\n\
         exit 0\n",
    )
}

#[test]
fn test_tempfile_actionlist_dry_run() {
    let tool = action_list_tool();
    let mut scenario = Scenario::new(tool.path()).unwrap();
    scenario
        .write_file("build.conf", ACTION_LIST_FIXTURE)
        .unwrap();
    scenario.write_file("file.input", "file.input\n").unwrap();

    scenario.run(&["-n", "-Q", "."]).unwrap();

    scenario
        .expect_stdout(
            "Using tempfile \\S+ for command line:\n\
             xxx.py -otempfile file.input\n\
             xxx.py @\\S+\n\
             Using tempfile \\S+ for command line:\n\
             yyy.py -ofile.output tempfile\n\
             yyy.py @\\S+\n",
        )
        .unwrap();
}

#[test]
fn test_each_action_gets_its_own_tempfile() {
    let tool = action_list_tool();
    let mut scenario = Scenario::new(tool.path()).unwrap();
    scenario
        .write_file("build.conf", ACTION_LIST_FIXTURE)
        .unwrap();
    scenario.write_file("file.input", "file.input\n").unwrap();

    scenario.run(&["-n", "-Q", "."]).unwrap();

    let stdout = scenario.stdout();
    let response_files: Vec<&str> = stdout
        .lines()
        .filter_map(|l| l.strip_prefix("Using tempfile "))
        .filter_map(|l| l.split_whitespace().next())
        .collect();
    assert_eq!(response_files.len(), 2);
    assert_ne!(
        response_files[0], response_files[1],
        "both actions used the same response file"
    );
}

#[test]
fn test_mismatched_output_is_reported() {
    let tool = action_list_tool();
    let mut scenario = Scenario::new(tool.path()).unwrap();
    scenario
        .write_file("build.conf", ACTION_LIST_FIXTURE)
        .unwrap();
    scenario.write_file("file.input", "file.input\n").unwrap();

    scenario.run(&["-n", "-Q", "."]).unwrap();

    let err = scenario
        .expect_stdout("Using tempfile \\S+ for command line:\n")
        .unwrap_err();
    assert!(matches!(err, BenchError::PatternMismatch { .. }));
}

#[test]
fn test_failing_tool_stops_the_scenario() {
    let tool = FakeTool::install("echo \"boom\" >&2\nexit 9\n");
    let mut scenario = Scenario::new(tool.path()).unwrap();

    let err = scenario.run(&["-n", "-Q", "."]).unwrap_err();
    match err {
        BenchError::ToolFailure { phase, status } => {
            assert_eq!(phase, "scenario");
            assert!(status.contains("9"), "unexpected status: {}", status);
            assert!(status.contains("boom"), "stderr not captured: {}", status);
        }
        other => panic!("expected ToolFailure, got {:?}", other),
    }
}

#[test]
fn test_fixture_files_are_staged_in_workdir() {
    let tool = action_list_tool();
    let scenario = Scenario::new(tool.path()).unwrap();
    scenario.write_file("sub/dir/file.input", "data\n").unwrap();
    assert!(scenario.path().join("sub/dir/file.input").exists());
}
