//! ctxsmith - CLI entry point

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, ConfigCommands};

/// Log to stderr so stdout stays machine-readable. `RUST_LOG` wins over -v.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Chunk { input, sizes, json } => commands::chunk::handle(&input, &sizes, json),
        Commands::Context {
            input,
            sizes,
            budget,
            no_overview,
        } => commands::context::handle(&input, &sizes, budget, no_overview),
        Commands::Tokens { file } => commands::tokens::handle(&file),
        Commands::Timestamps { file } => commands::timestamps::handle(&file),
        Commands::Prompt {
            input,
            budget,
            pages,
            duration,
        } => commands::prompt::handle(&input, budget, pages, duration),
        Commands::Chapters {
            file,
            pages,
            duration,
        } => commands::chapters::handle(&file, pages, duration),
        Commands::Batch {
            files,
            content_type,
            sizes,
        } => commands::batch::handle(&files, content_type, &sizes),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(),
            ConfigCommands::Init { force } => commands::config::handle_init(force),
        },
        Commands::Completions { shell } => commands::completions::handle::<Cli>(shell),
    }
}
