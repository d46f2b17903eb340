//! Open command - navigate to a page path

use crate::cli::args::OpenArgs;
use crate::config::Config;
use crate::error::CocktailResult;
use crate::router::Router;
use crate::ui::UiContext;

/// Execute the open command
pub async fn execute(args: OpenArgs, config: &Config) -> CocktailResult<()> {
    let router = Router::from_config(config, UiContext::detect())?;
    router.open(&args.path, args.format).await?;
    Ok(())
}
