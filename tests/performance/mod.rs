//! Performance test module.
//!
//! This module contains helpers shared across performance tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Helper to run ctxsmith with `home` as its home directory
pub fn run_ctxsmith(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_ctxsmith"))
        .args(args)
        .env("HOME", home)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute ctxsmith");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

/// Write `content` to `name` inside `dir`.
pub fn write_input(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write input file");
    path
}

/// Generate a document of roughly `target_bytes` with markdown headings,
/// lists and prose paragraphs.
pub fn generate_document(target_bytes: usize) -> String {
    const TOPICS: [&str; 8] = [
        "eviction", "sharding", "replication", "compaction", "indexing", "batching",
        "throttling", "recovery",
    ];
    let mut out = String::with_capacity(target_bytes + 1024);
    let mut section = 0usize;
    while out.len() < target_bytes {
        let topic = TOPICS[section % TOPICS.len()];
        out.push_str(&format!("## Section {}: {}\n\n", section + 1, topic));
        for p in 0..4 {
            for s in 0..5 {
                out.push_str(&format!(
                    "The {} layer handles request {} in phase {} without blocking the writer. ",
                    topic,
                    section * 20 + p * 5 + s,
                    s
                ));
            }
            out.push_str("\n\n");
        }
        out.push_str(&format!("- {} is important\n- measure before tuning\n\n", topic));
        section += 1;
    }
    out
}

/// Generate a bracketed transcript with one segment every 7 seconds.
pub fn generate_transcript(segments: usize) -> String {
    (0..segments)
        .map(|i| {
            let seconds = i * 7;
            let stamp = if seconds >= 3600 {
                format!("{}:{:02}:{:02}", seconds / 3600, (seconds % 3600) / 60, seconds % 60)
            } else {
                format!("{}:{:02}", seconds / 60, seconds % 60)
            };
            format!(
                "[{}] Segment {} explains one more detail about the system under test.\n",
                stamp, i
            )
        })
        .collect()
}
