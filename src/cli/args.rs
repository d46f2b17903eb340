//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Cocktails - search cocktail recipes from the terminal
///
/// Looks up recipes on TheCocktailDB and keeps results in a short-lived
/// query cache while you browse.
#[derive(Parser, Debug)]
#[command(name = "cocktails")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "COCKTAILS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the recipe API base URL
    #[arg(long, global = true, env = "COCKTAILS_API_URL")]
    pub api_url: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search cocktails by name
    Search(SearchArgs),

    /// Show a single cocktail by id
    Show(ShowArgs),

    /// Open a page by path (/, /?search=gin, /cocktail/11007)
    Open(OpenArgs),

    /// Interactive search session sharing one cache
    Browse,

    /// Show or edit configuration
    Config(ConfigArgs),
}

/// Arguments for the search command
#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Search term (defaults to search.default_term)
    pub term: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the show command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Cocktail id, e.g. 11007
    pub id: String,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the open command
#[derive(Parser, Debug)]
pub struct OpenArgs {
    /// Page path
    #[arg(default_value = "/")]
    pub path: String,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., cache.stale_after_secs)
        key: String,

        /// Value to set
        value: String,
    },
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}
