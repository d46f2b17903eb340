//! Single cocktail detail view

use crate::cache::{CacheEntry, QueryData, QueryStatus};
use crate::cli::args::OutputFormat;
use crate::drink::Drink;
use crate::error::CocktailResult;
use crate::ui::{self, UiContext};

/// What the item view shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemState {
    Loading,
    Error(String),
    /// The id matched nothing; go back to the landing page
    RedirectHome,
    Detail(Box<Drink>),
}

/// Renders one cocktail
pub struct ItemView {
    ctx: UiContext,
    format: OutputFormat,
}

impl ItemView {
    pub fn new(ctx: UiContext, format: OutputFormat) -> Self {
        Self { ctx, format }
    }

    /// Render state for the entry of an item key
    pub fn state(entry: Option<&CacheEntry>) -> ItemState {
        let Some(entry) = entry else {
            return ItemState::Loading;
        };

        match entry.status {
            QueryStatus::Idle | QueryStatus::Loading => ItemState::Loading,
            QueryStatus::Error => ItemState::Error(
                entry
                    .error
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "Something went wrong...".to_string()),
            ),
            QueryStatus::Success => match entry.data.as_ref().and_then(QueryData::as_item) {
                Some(Some(drink)) => ItemState::Detail(Box::new(drink.clone())),
                Some(None) => ItemState::RedirectHome,
                None => ItemState::Error("cached data is not a cocktail".to_string()),
            },
        }
    }

    pub fn render(&self, state: &ItemState) -> CocktailResult<()> {
        match state {
            ItemState::Detail(drink) => self.render_drink(drink)?,
            ItemState::Loading => ui::loading(&self.ctx),
            ItemState::Error(message) => ui::load_failed(&self.ctx, message),
            // The router navigates home instead of rendering this state
            ItemState::RedirectHome => {}
        }
        Ok(())
    }

    fn render_drink(&self, drink: &Drink) -> CocktailResult<()> {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(drink)?),
            OutputFormat::Plain => {
                println!("{}", drink.name);
                for ingredient in &drink.ingredients {
                    println!("{}", ingredient);
                }
            }
            OutputFormat::Table => {
                ui::heading(&self.ctx, &drink.name);
                ui::drink_card(&self.ctx, drink);
                ui::back_home(&self.ctx);
            }
        }
        Ok(())
    }
}
