//! Config subcommands handler

use anyhow::{bail, Result};

use ctxsmith::Config;

/// Show the effective configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show() -> Result<()> {
    let config = Config::load()?;
    let options = config.chunking_options();
    println!("# {}", Config::config_path()?.display());
    println!(
        "# effective: max_chunk_tokens = {}, overlap_tokens = {}\n",
        options.effective_max_tokens(),
        options.effective_overlap_tokens()
    );
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

/// Write the default configuration file.
#[cfg(not(tarpaulin_include))]
pub fn handle_init(force: bool) -> Result<()> {
    let config_path = Config::config_path()?;
    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {} (use --force to overwrite)",
            config_path.display()
        );
    }
    Config::default().save()?;
    println!("Wrote {}", config_path.display());
    Ok(())
}
