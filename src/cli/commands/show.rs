//! Show command - display one cocktail

use crate::cli::args::ShowArgs;
use crate::config::Config;
use crate::error::CocktailResult;
use crate::router::{Route, Router};
use crate::ui::UiContext;

/// Execute the show command
pub async fn execute(args: ShowArgs, config: &Config) -> CocktailResult<()> {
    let router = Router::from_config(config, UiContext::detect())?;
    router.navigate(&Route::item(args.id), args.format).await?;
    Ok(())
}
