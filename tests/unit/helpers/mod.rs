//! Test helper utilities

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use ctxsmith::ChunkingOptions;

/// Get the path to the fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Load a fixture file's contents
pub fn load_fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to load fixture: {}", name))
}

/// Options with a custom chunk size so short fixtures produce several chunks
pub fn small_chunks(max_chunk_tokens: usize, overlap_tokens: usize) -> ChunkingOptions {
    ChunkingOptions {
        max_chunk_tokens,
        overlap_tokens,
        ..ChunkingOptions::default()
    }
}

/// Deterministic prose, six sentences per paragraph
pub fn generate_prose(paragraphs: usize) -> String {
    const WORDS: [&str; 12] = [
        "cache", "memory", "latency", "request", "buffer", "index", "storage", "thread",
        "queue", "socket", "parser", "token",
    ];
    (0..paragraphs)
        .map(|p| {
            let sentences: Vec<String> = (0..6)
                .map(|s| {
                    let words: Vec<&str> = (0..10)
                        .map(|w| WORDS[(p * 7 + s * 3 + w) % WORDS.len()])
                        .collect();
                    format!("The {} handles {}.", words[0], words[1..].join(" "))
                })
                .collect();
            sentences.join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
