//! Unit tests for token estimation

use ctxsmith::chunking::tokens::{count_tokens, estimate_tokens, TextKind};

#[test]
fn empty_input_is_zero_tokens() {
    assert_eq!(estimate_tokens(""), 0);
    assert_eq!(count_tokens("  \n ").tokens, 0);
}

#[test]
fn estimate_grows_with_content() {
    let short = estimate_tokens("The cache evicts old entries.");
    let long = estimate_tokens(&"The cache evicts old entries. ".repeat(20));
    assert!(short > 0);
    assert!(long > short * 10);
}

#[test]
fn prose_is_near_four_chars_per_token() {
    let text = "Ownership rules decide when memory is released. ".repeat(50);
    let tokens = estimate_tokens(&text) as f64;
    let chars = text.chars().count() as f64;
    let ratio = chars / tokens;
    assert!((3.0..=5.5).contains(&ratio), "ratio {}", ratio);
}

#[test]
fn code_costs_more_than_prose_of_equal_length() {
    let code = "```\nfn main() { let x = vec![1, 2, 3]; println!(\"{:?}\", x); }\n```";
    let prose = "word ".repeat(code.len() / 5);
    assert_eq!(count_tokens(code).content_type, TextKind::Code);
    assert!(estimate_tokens(code) > estimate_tokens(&prose));
}

#[test]
fn count_reports_words_and_characters() {
    let count = count_tokens("héllo wörld");
    assert_eq!(count.words, 2);
    assert_eq!(count.characters, 11);
    assert!(count.tokens >= 2);
    assert!((0.0..=1.0).contains(&count.confidence));
}

#[test]
fn count_serializes_camel_case() {
    let json = serde_json::to_value(count_tokens("plain words here")).unwrap();
    assert!(json.get("contentType").is_some());
    assert!(json.get("tokens").is_some());
}
