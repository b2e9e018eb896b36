//! End-to-end tests of every subcommand

use std::fs;

use predicates::prelude::*;
use serde_json::Value;

use crate::helpers::{config_file, ctxsmith, fixture, isolated_home, run_ctxsmith};

// ============================================================================
// chunk
// ============================================================================

#[test]
fn chunk_pdf_lists_pages() {
    let home = isolated_home();
    ctxsmith(home.path())
        .args(["chunk", &fixture("paper.txt"), "--type", "pdf"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("PDF document ("))
        .stdout(predicate::str::contains("4 chunks"))
        .stdout(predicate::str::contains("pdf-chunk-3"))
        .stdout(predicate::str::contains("page 3"));
}

#[test]
fn chunk_json_carries_timestamps() {
    let home = isolated_home();
    let path = fixture("lecture.txt");
    let (stdout, stderr, code) =
        run_ctxsmith(home.path(), &["chunk", &path, "--type", "youtube", "--json"]);
    assert_eq!(code, 0, "stderr: {}", stderr);

    let json: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(
        json["totalLength"].as_u64().unwrap(),
        fs::read_to_string(&path).unwrap().len() as u64
    );
    let first = &json["chunks"][0];
    assert_eq!(first["id"], "youtube-chunk-0");
    assert_eq!(first["timestampRange"]["startTimestamp"], "0:00");
    assert_eq!(first["timestampRange"]["endTimestamp"], "4:15");
    assert_eq!(first["metadata"]["contentType"], "youtube");
}

#[test]
fn chunk_size_flag_overrides_default() {
    let home = isolated_home();
    let path = fixture("lecture.txt");
    let (stdout, _, code) = run_ctxsmith(
        home.path(),
        &["chunk", &path, "--type", "video", "--max-chunk-tokens", "50", "--json"],
    );
    assert_eq!(code, 0);
    let json: Value = serde_json::from_str(&stdout).unwrap();
    assert!(json["chunks"].as_array().unwrap().len() > 1);
}

#[test]
fn chunk_reads_stdin() {
    let home = isolated_home();
    ctxsmith(home.path())
        .args(["chunk", "-"])
        .write_stdin("Ownership is central.\n\nBorrowing is next.")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("text document (41 B)"))
        .stdout(predicate::str::contains("text-chunk-0"));
}

#[test]
fn chunk_rejects_unknown_type() {
    let home = isolated_home();
    ctxsmith(home.path())
        .args(["chunk", &fixture("paper.txt"), "--type", "docx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("docx"));
}

#[test]
fn chunk_reports_missing_file() {
    let home = isolated_home();
    ctxsmith(home.path())
        .args(["chunk", "/definitely/not/here.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read input file"));
}

#[test]
fn verbose_flag_enables_debug_logs() {
    let home = isolated_home();
    ctxsmith(home.path())
        .args(["-vv", "chunk", &fixture("paper.txt"), "--type", "pdf"])
        .assert()
        .success()
        .stderr(predicate::str::contains("split content"));

    ctxsmith(home.path())
        .args(["chunk", &fixture("paper.txt"), "--type", "pdf"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

// ============================================================================
// context
// ============================================================================

#[test]
fn context_respects_budget() {
    let home = isolated_home();
    let (stdout, _, code) = run_ctxsmith(
        home.path(),
        &["context", &fixture("page.html"), "--type", "website", "-b", "1000"],
    );
    assert_eq!(code, 0);
    let context = stdout.trim_end_matches('\n');
    assert!(context.len() <= 1000 * 4);
    assert!(context.starts_with("Overview:\nWeb page with 3 sections"));
}

#[test]
fn context_without_overview() {
    let home = isolated_home();
    ctxsmith(home.path())
        .args(["context", &fixture("paper.txt"), "--type", "pdf", "--no-overview"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[Section "))
        .stdout(predicate::str::contains("Overview:").not());
}

// ============================================================================
// tokens / timestamps
// ============================================================================

#[test]
fn tokens_prints_estimate() {
    let home = isolated_home();
    let path = fixture("transcript.txt");
    let (stdout, _, code) = run_ctxsmith(home.path(), &["tokens", &path]);
    assert_eq!(code, 0);
    let json: Value = serde_json::from_str(&stdout).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(json["characters"].as_u64().unwrap(), text.chars().count() as u64);
    assert_eq!(
        json["words"].as_u64().unwrap(),
        text.split_whitespace().count() as u64
    );
    assert!(json["tokens"].as_u64().unwrap() > 0);
}

#[test]
fn timestamps_reports_segments_and_metrics() {
    let home = isolated_home();
    let (stdout, _, code) = run_ctxsmith(home.path(), &["timestamps", &fixture("lecture.txt")]);
    assert_eq!(code, 0);
    let json: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["hasTimestamps"], true);
    assert_eq!(json["format"], "bracketed");
    assert_eq!(json["segments"].as_array().unwrap().len(), 6);
    assert_eq!(json["segments"][1]["startTime"], 45.0);
    assert_eq!(json["metrics"]["segmentCount"], 6);
}

// ============================================================================
// prompt / chapters
// ============================================================================

#[test]
fn prompt_prints_both_halves() {
    let home = isolated_home();
    ctxsmith(home.path())
        .args(["prompt", &fixture("paper.txt"), "--type", "pdf", "--pages", "3"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("=== system ===\n"))
        .stdout(predicate::str::contains("\n\n=== user ===\nSplit this PDF document into chapters."))
        .stdout(predicate::str::contains("between 1 and 3"));
}

#[test]
fn chapters_validates_fixture_response() {
    let home = isolated_home();
    let (stdout, stderr, code) = run_ctxsmith(
        home.path(),
        &["chapters", &fixture("chapters_response.txt"), "--duration", "255"],
    );
    assert_eq!(code, 0, "stderr: {}", stderr);
    let json: Value = serde_json::from_str(&stdout).unwrap();
    let titles: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Introduction", "Borrowing", "Lifetimes"]);
    assert!(stderr.contains("dropping chapter without title"));
}

#[test]
fn chapters_fails_without_json() {
    let home = isolated_home();
    ctxsmith(home.path())
        .args(["chapters", &fixture("transcript.txt")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No chapters in response"));
}

// ============================================================================
// batch
// ============================================================================

#[test]
fn batch_prints_line_per_file_in_order() {
    let home = isolated_home();
    let paper = fixture("paper.txt");
    let transcript = fixture("transcript.txt");
    let (stdout, _, code) = run_ctxsmith(home.path(), &["batch", &paper, &transcript]);
    assert_eq!(code, 0);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with(&format!("{}: ", paper)));
    assert!(lines[1].starts_with(&format!("{}: ", transcript)));
    assert!(lines.iter().all(|l| l.contains(" chunks, window ")));
}

#[test]
fn batch_requires_files() {
    let home = isolated_home();
    ctxsmith(home.path()).arg("batch").assert().failure();
}

// ============================================================================
// config
// ============================================================================

#[test]
fn config_init_writes_defaults_once() {
    let home = isolated_home();
    ctxsmith(home.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Wrote "));
    assert!(config_file(home.path()).exists());

    ctxsmith(home.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    ctxsmith(home.path())
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn config_show_reports_effective_sizes() {
    let home = isolated_home();
    let path = config_file(home.path());
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "[chunking]\nmax_chunk_size = 1200\n").unwrap();

    ctxsmith(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "# effective: max_chunk_tokens = 300, overlap_tokens = 100",
        ))
        .stdout(predicate::str::contains("[chunking]"))
        .stdout(predicate::str::contains("max_chunk_size = 1200"));
}

#[test]
fn config_file_drives_chunking() {
    let home = isolated_home();
    let path = config_file(home.path());
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "[chunking]\nmax_chunk_tokens = 50\n").unwrap();

    let (stdout, _, code) = run_ctxsmith(
        home.path(),
        &["chunk", &fixture("lecture.txt"), "--type", "youtube", "--json"],
    );
    assert_eq!(code, 0);
    let json: Value = serde_json::from_str(&stdout).unwrap();
    assert!(json["chunks"].as_array().unwrap().len() > 1);
}

#[test]
fn invalid_config_is_reported() {
    let home = isolated_home();
    let path = config_file(home.path());
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "[chunking]\nmax_chunk_tokens = 0\n").unwrap();

    ctxsmith(home.path())
        .args(["chunk", &fixture("paper.txt")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config"));
}

// ============================================================================
// completions
// ============================================================================

#[test]
fn completions_generate_for_bash() {
    let home = isolated_home();
    ctxsmith(home.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ctxsmith"));
}
