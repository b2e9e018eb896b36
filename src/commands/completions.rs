//! Completions command handler

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, Shell as CompletionShell};
use std::io;

/// Generate shell completion script.
#[cfg(not(tarpaulin_include))]
pub fn handle<C: CommandFactory>(shell: CompletionShell) -> Result<()> {
    let mut cmd = C::command();
    generate(shell, &mut cmd, "ctxsmith", &mut io::stdout());
    Ok(())
}
