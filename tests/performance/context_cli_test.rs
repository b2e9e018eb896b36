//! Performance tests for the CLI with large input files.
//!
//! Run with: `cargo test --release --test performance`

use tempfile::TempDir;

use crate::helpers::{generate_document, run_ctxsmith, write_input};

/// Test: an 8 MB file chunks via the CLI in reasonable time
#[test]
fn chunk_large_file_via_cli_completes() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_input(&temp_dir, "large.md", &generate_document(8 * 1024 * 1024));

    let start = std::time::Instant::now();
    let (stdout, stderr, exit_code) =
        run_ctxsmith(temp_dir.path(), &["chunk", path.to_str().unwrap()]);
    let duration = start.elapsed();

    assert_eq!(exit_code, 0, "Large file chunk should succeed. stderr: {}", stderr);
    println!("8 MB CLI chunk completed in {:.2}s", duration.as_secs_f64());
    assert!(
        duration.as_secs() < 30,
        "Chunk took too long: {:.2}s",
        duration.as_secs_f64()
    );
    assert!(stdout.starts_with("text document ("));
    assert!(stdout.lines().next().unwrap().contains("MiB"));
}

/// Test: context for a large file honours the budget
#[test]
fn context_large_file_via_cli_within_budget() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_input(&temp_dir, "large.md", &generate_document(2 * 1024 * 1024));

    let (stdout, stderr, exit_code) = run_ctxsmith(
        temp_dir.path(),
        &["context", path.to_str().unwrap(), "--budget", "2000"],
    );
    assert_eq!(exit_code, 0, "stderr: {}", stderr);
    assert!(stdout.trim_end_matches('\n').len() <= 2000 * 4);
    assert!(stdout.starts_with("Overview:\nText document with "));
}
