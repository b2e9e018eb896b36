//! Tokens command handler

use anyhow::Result;

use ctxsmith::chunking::count_tokens;

use super::read_input;

/// Print the token estimate of a file as JSON.
#[cfg(not(tarpaulin_include))]
pub fn handle(file: &str) -> Result<()> {
    let text = read_input(file)?;
    println!("{}", serde_json::to_string_pretty(&count_tokens(&text))?);
    Ok(())
}
