//! Config command - show or edit configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager, InitOutcome};
use crate::error::CocktailResult;
use crate::ui::{self, UiContext};

/// Execute the config command
pub async fn execute(
    args: ConfigArgs,
    config: &Config,
    manager: &ConfigManager,
) -> CocktailResult<()> {
    let ctx = UiContext::detect();

    match args.action {
        None | Some(ConfigAction::Show) => println!("{}", toml::to_string_pretty(config)?),
        Some(ConfigAction::Path) => println!("{}", manager.path().display()),
        Some(ConfigAction::Init { force }) => {
            let path = manager.path().display().to_string();
            match manager.init(force).await? {
                InitOutcome::Created => ui::done(&ctx, &format!("Wrote defaults to {}", path)),
                InitOutcome::Overwritten => {
                    ui::done(&ctx, &format!("Reset {} to defaults", path));
                }
                InitOutcome::Kept => ui::notice_hint(
                    &ctx,
                    &format!("Config already exists at {}", path),
                    "Use --force to overwrite",
                ),
            }
        }
        Some(ConfigAction::Set { key, value }) => {
            manager.set(&key, &value).await?;
            ui::done(&ctx, &format!("Set {} = {}", key, value.trim()));
        }
    }

    Ok(())
}
