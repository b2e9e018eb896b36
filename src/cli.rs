//! CLI definitions for ctxsmith
//!
//! This module contains the clap CLI structure definitions, separated from
//! main.rs so the command handlers can share argument types.

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell as CompletionShell;

use ctxsmith::ContentType;

/// Build clap styles.
///
/// - Green: headers, usage, command names
/// - White: descriptions, placeholders
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default())
        .valid(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

#[derive(Parser)]
#[command(name = "ctxsmith")]
#[command(about = "Chunk long documents and transcripts into token-budgeted context")]
#[command(
    long_about = "ctxsmith - chunking and token budgeting for language-model context windows.

Splits PDF text, video and audio transcripts, web pages and plain text into
token-bounded chunks with relevance scores, timestamps and structure
metadata, and assembles chunks into prompt contexts of a fixed size.

QUICK START:
    ctxsmith chunk lecture.txt --type youtube     Chunk a timestamped transcript
    ctxsmith context paper.txt --type pdf -b 2000 Build a 2000-token context
    ctxsmith tokens notes.md                      Estimate tokens
    cat page.html | ctxsmith chunk - --type website

Use '-' as FILE to read from stdin. Settings are read from
~/.config/ctxsmith/config.toml (see 'ctxsmith config show')."
)]
#[command(version)]
#[command(styles = build_cli_styles())]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Input file and content type shared by the document commands.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Input file ('-' for stdin)
    #[arg(help = "Input file ('-' reads stdin)")]
    pub file: String,
    /// Content type of the input
    #[arg(
        long = "type",
        short = 't',
        default_value = "text",
        help = "Content type: pdf, youtube, video, audio, website, text"
    )]
    pub content_type: ContentType,
}

/// Chunk sizing flags; unset flags fall back to the config file.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct SizeArgs {
    #[arg(long, help = "Target chunk size in tokens")]
    pub max_chunk_tokens: Option<usize>,
    #[arg(long, help = "Overlap between chunks in tokens")]
    pub overlap_tokens: Option<usize>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split a document into chunks
    #[command(long_about = "Split a document into token-bounded chunks.

Prints one line per chunk with its id, size, relevance score and position
(timestamp range or page), or the full result as JSON with --json.

EXAMPLES:
    ctxsmith chunk paper.txt --type pdf
    ctxsmith chunk talk.txt --type youtube --max-chunk-tokens 500
    ctxsmith chunk page.html --type website --json")]
    Chunk {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        sizes: SizeArgs,
        /// Print the full result as JSON
        #[arg(long, help = "Print the full result as JSON")]
        json: bool,
    },

    /// Build a prompt context within a token budget
    #[command(long_about = "Chunk a document and assemble a prompt context.

Chunks are added highest relevance first until the budget is reached. An
overview with the summary and key topics is prepended unless --no-overview
is given.

EXAMPLES:
    ctxsmith context paper.txt --type pdf --budget 2000
    ctxsmith context talk.txt --type video -b 500 --no-overview")]
    Context {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        sizes: SizeArgs,
        /// Context budget in tokens
        #[arg(long, short, default_value_t = 4000, help = "Context budget in tokens")]
        budget: usize,
        /// Skip the overview block
        #[arg(long, help = "Do not prepend the overview block")]
        no_overview: bool,
    },

    /// Estimate the token count of a file
    Tokens {
        /// Input file ('-' for stdin)
        #[arg(help = "Input file ('-' reads stdin)")]
        file: String,
    },

    /// Extract timestamps from a transcript
    #[command(long_about = "Extract timestamped segments from a transcript.

Recognizes [M:SS], (M:SS) and line-leading M:SS markers and prints the
extraction result with segment metrics as JSON.

EXAMPLE:
    ctxsmith timestamps lecture.txt")]
    Timestamps {
        /// Input file ('-' for stdin)
        #[arg(help = "Input file ('-' reads stdin)")]
        file: String,
    },

    /// Build the chapter-generation prompt for a document
    Prompt {
        #[command(flatten)]
        input: InputArgs,
        /// Content budget in tokens
        #[arg(long, short, default_value_t = 8000, help = "Content budget in tokens")]
        budget: usize,
        /// Page count of the source document
        #[arg(long, help = "Page count of the source document")]
        pages: Option<u32>,
        /// Duration of the source recording in seconds
        #[arg(long, help = "Duration of the recording in seconds")]
        duration: Option<f64>,
    },

    /// Parse and validate a chapter response
    #[command(long_about = "Parse a language-model chapter response.

Accepts raw JSON, JSON inside a markdown code fence, or JSON embedded in
prose. Chapters are validated against the known page count or duration and
printed as JSON.

EXAMPLE:
    ctxsmith chapters response.txt --pages 12")]
    Chapters {
        /// Response file ('-' for stdin)
        #[arg(help = "Response file ('-' reads stdin)")]
        file: String,
        /// Page count of the source document
        #[arg(long, help = "Page count of the source document")]
        pages: Option<u32>,
        /// Duration of the source recording in seconds
        #[arg(long, help = "Duration of the recording in seconds")]
        duration: Option<f64>,
    },

    /// Chunk several documents in parallel
    Batch {
        /// Input files
        #[arg(required = true, help = "Input files")]
        files: Vec<String>,
        /// Content type of every input
        #[arg(
            long = "type",
            short = 't',
            default_value = "text",
            help = "Content type: pdf, youtube, video, audio, website, text"
        )]
        content_type: ContentType,
        #[command(flatten)]
        sizes: SizeArgs,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    #[command(long_about = "Generate shell completion scripts.

EXAMPLES:
    ctxsmith completions bash > ~/.local/share/bash-completion/completions/ctxsmith
    ctxsmith completions zsh > ~/.zfunc/_ctxsmith")]
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration as TOML
    Show,
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long, help = "Overwrite an existing config file")]
        force: bool,
    },
}
