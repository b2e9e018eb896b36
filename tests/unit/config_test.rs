//! Unit tests for configuration loading and option resolution

use std::fs;

use ctxsmith::config::{ChunkingOverrides, ChunkingSection};
use ctxsmith::{ChunkingOptions, Config};
use tempfile::TempDir;

#[test]
fn defaults_match_engine_defaults() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.chunking_options(), ChunkingOptions::default());
}

#[test]
fn empty_file_parses_to_defaults() {
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn partial_sections_keep_other_defaults() {
    let config: Config = toml::from_str(
        r#"
[chunking]
max_chunk_tokens = 500
preserve_structure = false

[context]
include_overview = false

[timestamps]
overlap_seconds = 5.0
"#,
    )
    .unwrap();
    let options = config.chunking_options();
    assert_eq!(options.max_chunk_tokens, 500);
    assert_eq!(options.overlap_tokens, 100);
    assert!(!options.preserve_structure);
    assert!(options.prioritize_relevance);
    assert!(!options.context.include_overview);
    assert_eq!(options.timestamps.overlap_seconds, 5.0);
    assert_eq!(options.timestamps.merge_max_duration, 45.0);
}

#[test]
fn character_sizes_convert_to_tokens() {
    let section = ChunkingSection {
        max_chunk_size: Some(2000),
        overlap_size: Some(400),
        ..ChunkingSection::default()
    };
    assert_eq!(section.resolved_max_chunk_tokens(), 500);
    assert_eq!(section.resolved_overlap_tokens(), 100);
}

#[test]
fn token_sizes_win_over_character_sizes() {
    let section = ChunkingSection {
        max_chunk_tokens: Some(300),
        max_chunk_size: Some(2000),
        overlap_tokens: Some(0),
        overlap_size: Some(400),
        ..ChunkingSection::default()
    };
    assert_eq!(section.resolved_max_chunk_tokens(), 300);
    assert_eq!(section.resolved_overlap_tokens(), 0);
}

#[test]
fn overrides_win_over_file() {
    let config = Config {
        chunking: ChunkingSection {
            max_chunk_tokens: Some(300),
            overlap_tokens: Some(30),
            ..ChunkingSection::default()
        },
        ..Config::default()
    };
    let overrides = ChunkingOverrides {
        max_chunk_tokens: Some(800),
        overlap_tokens: None,
        include_overview: Some(false),
    };
    let options = config.chunking_options_with(&overrides);
    assert_eq!(options.max_chunk_tokens, 800);
    assert_eq!(options.overlap_tokens, 30);
    assert!(!options.context.include_overview);
}

#[test]
fn zero_sizes_are_rejected() {
    let config = Config {
        chunking: ChunkingSection {
            max_chunk_tokens: Some(0),
            ..ChunkingSection::default()
        },
        ..Config::default()
    };
    assert_eq!(
        config.validate().unwrap_err(),
        "chunking.max_chunk_tokens must be > 0"
    );

    let legacy = ChunkingSection {
        max_chunk_size: Some(0),
        ..ChunkingSection::default()
    };
    assert!(legacy.validate().unwrap_err().contains("max_chunk_size"));
}

#[test]
fn missing_file_loads_defaults() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn saved_config_loads_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    let mut config = Config::default();
    config.chunking.max_chunk_tokens = Some(640);
    config.context.overview_fraction = 0.25;
    config.relevance.stop_words = vec!["lorem".to_string()];

    config.save_to(&path).unwrap();
    assert!(path.exists());
    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn invalid_values_fail_to_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[context]\noverview_fraction = 0.9\n").unwrap();
    let err = Config::load_from(&path).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("Invalid config"));
    assert!(message.contains("overview_fraction"));
}

#[test]
fn malformed_toml_fails_to_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[chunking\nmax_chunk_tokens = ").unwrap();
    let err = Config::load_from(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse config file"));
}
