//! Cocktails - cocktail recipe search
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use cocktails::cli::{Cli, Commands};
use cocktails::config::{Config, ConfigManager, LogFormat};
use cocktails::error::CocktailResult;
use console::style;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> CocktailResult<()> {
    let cli = Cli::parse();

    let config_manager = ConfigManager::locate(cli.config.clone());
    let config = config_manager.resolve(cli.api_url.as_deref()).await?;

    init_logging(cli.verbose, &config);
    debug!(
        origin = ?config_manager.origin(),
        api = %config.api.base_url,
        "Using config {}",
        config_manager.path().display()
    );

    cocktails::ui::init_theme();

    match cli.command {
        Commands::Search(args) => cocktails::cli::commands::search(args, &config).await,
        Commands::Show(args) => cocktails::cli::commands::show(args, &config).await,
        Commands::Open(args) => cocktails::cli::commands::open(args, &config).await,
        Commands::Browse => cocktails::cli::commands::browse(&config).await,
        Commands::Config(args) => {
            cocktails::cli::commands::config(args, &config, &config_manager).await
        }
    }
}

/// 0 = warn, 1 = info, 2+ = debug; RUST_LOG wins when set
fn init_logging(verbose: u8, config: &Config) {
    let default = match verbose {
        0 => "cocktails=warn",
        1 => "cocktails=info",
        _ => "cocktails=debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if config.general.log_format == LogFormat::Json {
        builder.json().init();
    } else {
        builder.without_time().init();
    }
}
