//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check`: Report unused keys, unparseable entries and unreadable catalogs
//! - `usages`: List the call sites of a message key
//! - `key-at`: Show the message call at a byte offset of a file
//! - `render`: Render a message with arguments
//! - `extract`: Move a selected literal into every locale catalog
//! - `id`: Generate unused message keys
//! - `init`: Initialize paraglot configuration file
//! - `serve`: Start MCP server for AI integration

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        self.command
            .as_ref()
            .and_then(Command::common)
            .is_some_and(|common| common.verbose)
    }
}

/// Common arguments shared by project commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Directory to start looking for .paraglotrc.json from
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct UsagesCommand {
    /// Message key to look up
    pub key: String,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct KeyAtCommand {
    /// Source file, relative to the project root
    pub file: PathBuf,

    /// Byte offset into the file
    pub offset: usize,

    /// Locale for the preview (default: base locale)
    #[arg(long)]
    pub locale: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct RenderCommand {
    /// Message key to render
    pub key: String,

    /// Locale to render in (default: base locale)
    #[arg(long)]
    pub locale: Option<String>,

    /// Placeholder value, can be repeated: --arg name=Ada
    #[arg(long = "arg", value_name = "NAME=VALUE")]
    pub args: Vec<String>,

    /// Plural count
    #[arg(long, allow_negative_numbers = true)]
    pub count: Option<i64>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    /// Source file containing the selection, relative to the project root
    #[arg(long)]
    pub file: PathBuf,

    /// Byte offset where the selection starts
    #[arg(long)]
    pub start: usize,

    /// Byte offset where the selection ends (exclusive)
    #[arg(long)]
    pub end: usize,

    /// Message key (default: a generated one)
    #[arg(long)]
    pub key: Option<String>,

    /// Translation for a locale, can be repeated: --text de=Hallo
    #[arg(long = "text", value_name = "LOCALE=TEXT")]
    pub texts: Vec<String>,

    /// Plural form for a locale, enables pluralization: --plural en="{count} items"
    #[arg(long = "plural", value_name = "LOCALE=TEXT")]
    pub plurals: Vec<String>,

    /// Rewrite the source file (default is dry-run)
    #[arg(long)]
    pub apply: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct IdCommand {
    /// Number of keys to generate
    #[arg(long, default_value_t = 1)]
    pub count: usize,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check catalogs for unused keys and unreadable entries
    Check(CheckCommand),
    /// List the call sites of a message key
    Usages(UsagesCommand),
    /// Show the message call at a byte offset
    KeyAt(KeyAtCommand),
    /// Render a message with arguments
    Render(RenderCommand),
    /// Move a selected literal into every locale catalog
    Extract(ExtractCommand),
    /// Generate unused message keys
    Id(IdCommand),
    /// Initialize a new .paraglotrc.json configuration file
    Init,
    /// Start MCP server for AI coding agents
    Serve,
}

impl Command {
    pub fn common(&self) -> Option<&CommonArgs> {
        match self {
            Command::Check(cmd) => Some(&cmd.common),
            Command::Usages(cmd) => Some(&cmd.common),
            Command::KeyAt(cmd) => Some(&cmd.common),
            Command::Render(cmd) => Some(&cmd.common),
            Command::Extract(cmd) => Some(&cmd.common),
            Command::Id(cmd) => Some(&cmd.common),
            Command::Init | Command::Serve => None,
        }
    }
}

/// Split `name=value` pairs.
pub fn parse_pairs(pairs: &[String]) -> Result<Vec<(String, String)>> {
    pairs
        .iter()
        .map(|pair| match pair.split_once('=') {
            Some((name, value)) if !name.trim().is_empty() => {
                Ok((name.trim().to_string(), value.to_string()))
            }
            _ => bail!("expected NAME=VALUE, got '{}'", pair),
        })
        .collect()
}
