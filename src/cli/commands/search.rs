//! Search command - list cocktails matching a term

use crate::cli::args::SearchArgs;
use crate::config::Config;
use crate::error::CocktailResult;
use crate::router::{Route, Router};
use crate::ui::UiContext;

/// Execute the search command
pub async fn execute(args: SearchArgs, config: &Config) -> CocktailResult<()> {
    let router = Router::from_config(config, UiContext::detect())?;
    let route = match args.term {
        Some(term) => Route::search(term),
        None => Route::home(),
    };

    router.navigate(&route, args.format).await?;
    Ok(())
}
