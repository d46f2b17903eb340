//! Browse command - interactive search session
//!
//! Every page in the session goes through one router, so repeated searches
//! and lookups within the staleness window are served from the cache.

use crate::cli::args::OutputFormat;
use crate::config::Config;
use crate::drink::Drink;
use crate::error::{CocktailError, CocktailResult};
use crate::router::{Page, Route, Router};
use crate::ui::{self, UiContext};
use crate::views::SearchState;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
enum BrowseAction {
    Open(String),
    Refresh,
    NewSearch,
    Quit,
}

/// Execute the browse command
pub async fn execute(config: &Config) -> CocktailResult<()> {
    let ctx = UiContext::detect();
    if !ctx.is_interactive() {
        return Err(CocktailError::User(
            "browse needs an interactive terminal; use `cocktails search` instead".to_string(),
        ));
    }

    let router = Router::from_config(config, ctx.clone())?;
    ui::heading(&ctx, "Cocktail browser");

    loop {
        let default_term = router.client().default_term();
        let Some(term) = ui::input(&ctx, "Search cocktails", default_term).await? else {
            finish(&ctx, &router);
            return Ok(());
        };

        let mut page = match router.navigate(&Route::search(term), OutputFormat::Table).await {
            Ok(page) => page,
            Err(e) => {
                ui::notice(&ctx, &e.to_string());
                continue;
            }
        };

        loop {
            let Page::Landing { view, .. } = &page else {
                break;
            };
            let SearchState::List(drinks) = view.current() else {
                break;
            };

            match ui::select(&ctx, "Open a cocktail", &options(&drinks)).await? {
                Some(BrowseAction::Open(id)) => {
                    if let Err(e) = router.navigate(&Route::item(id), OutputFormat::Table).await {
                        ui::notice(&ctx, &e.to_string());
                    }
                }
                Some(BrowseAction::Refresh) => {
                    if let Err(e) = router.refresh(&page).await {
                        ui::notice(&ctx, &e.to_string());
                    }
                }
                Some(BrowseAction::NewSearch) => break,
                Some(BrowseAction::Quit) | None => {
                    finish(&ctx, &router);
                    return Ok(());
                }
            }

            let changed = matches!(&page, Page::Landing { view, .. } if view.has_changed());
            if changed {
                router.render(&mut page, OutputFormat::Table)?;
            }
        }
    }
}

fn finish(ctx: &UiContext, router: &Router) {
    debug!(queries = ?router.client().cache().keys(), "browse session ended");
    ui::farewell(ctx, "Cheers!");
}

fn options(drinks: &[Drink]) -> Vec<(BrowseAction, String, String)> {
    let mut options: Vec<_> = drinks
        .iter()
        .map(|drink| {
            (
                BrowseAction::Open(drink.id.clone()),
                drink.name.clone(),
                drink.glass.clone().unwrap_or_default(),
            )
        })
        .collect();

    options.push((
        BrowseAction::Refresh,
        "Refresh results".to_string(),
        "fetch again".to_string(),
    ));
    options.push((BrowseAction::NewSearch, "New search".to_string(), String::new()));
    options.push((BrowseAction::Quit, "Quit".to_string(), String::new()));
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::raw_drink;

    #[test]
    fn options_end_with_navigation() {
        let drinks: Vec<Drink> = vec![raw_drink("1").into(), raw_drink("2").into()];
        let options = options(&drinks);

        assert_eq!(options.len(), 5);
        assert_eq!(options[0].0, BrowseAction::Open("1".to_string()));
        assert_eq!(options[0].1, "Drink 1");
        assert_eq!(options[2].0, BrowseAction::Refresh);
        assert_eq!(options[3].0, BrowseAction::NewSearch);
        assert_eq!(options[4].0, BrowseAction::Quit);
    }
}
