//! Search results (card list) view

use crate::cache::{CacheEntry, QueryData, QueryStatus};
use crate::cli::args::OutputFormat;
use crate::drink::Drink;
use crate::error::CocktailResult;
use crate::ui::{self, UiContext};
use console::style;

/// What the search view shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchState {
    Loading,
    Error(String),
    Empty,
    List(Vec<Drink>),
}

/// Renders search results
pub struct SearchView {
    ctx: UiContext,
    format: OutputFormat,
}

impl SearchView {
    pub fn new(ctx: UiContext, format: OutputFormat) -> Self {
        Self { ctx, format }
    }

    /// Render state for the entry of a search key
    pub fn state(entry: Option<&CacheEntry>) -> SearchState {
        let Some(entry) = entry else {
            return SearchState::Loading;
        };

        match entry.status {
            QueryStatus::Idle | QueryStatus::Loading => SearchState::Loading,
            QueryStatus::Error => SearchState::Error(
                entry
                    .error
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "Something went wrong...".to_string()),
            ),
            QueryStatus::Success => match entry.data.as_ref().and_then(QueryData::as_drinks) {
                Some([]) => SearchState::Empty,
                Some(drinks) => SearchState::List(drinks.to_vec()),
                None => SearchState::Error("cached data is not a search result".to_string()),
            },
        }
    }

    pub fn render(&self, term: &str, state: &SearchState) -> CocktailResult<()> {
        match (state, self.format) {
            (SearchState::List(drinks), OutputFormat::Json) => {
                println!("{}", serde_json::to_string_pretty(drinks)?);
            }
            (SearchState::Empty, OutputFormat::Json) => println!("[]"),
            (SearchState::List(drinks), OutputFormat::Plain) => {
                for drink in drinks {
                    println!("{}\t{}", drink.id, drink.name);
                }
            }
            (SearchState::Empty, OutputFormat::Plain) => {}
            (SearchState::List(drinks), OutputFormat::Table) => self.print_table(term, drinks),
            (SearchState::Empty, OutputFormat::Table) => ui::no_results(&self.ctx, term),
            (SearchState::Loading, _) => ui::loading(&self.ctx),
            (SearchState::Error(message), _) => ui::load_failed(&self.ctx, message),
        }
        Ok(())
    }

    fn print_table(&self, term: &str, drinks: &[Drink]) {
        ui::heading(&self.ctx, &format!("Cocktails matching \"{}\"", term));

        println!(
            "{:<8} {:<30} {:<18} {:<24}",
            style("ID").bold(),
            style("NAME").bold(),
            style("INFO").bold(),
            style("GLASS").bold()
        );
        println!("{}", "-".repeat(80));

        for drink in drinks {
            let info = match drink.info.as_deref() {
                Some("Alcoholic") => style("Alcoholic").yellow(),
                Some(other) => style(other).green(),
                None => style("-").dim(),
            };
            println!(
                "{:<8} {:<30} {:<18} {:<24}",
                drink.id,
                truncate(&drink.name, 30),
                info,
                drink.glass.as_deref().unwrap_or("-")
            );
        }

        println!();
        println!("{} cocktail(s)", drinks.len());
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let cut: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", cut)
}
