//! Cocktails - cocktail recipe search
//!
//! Loads recipes from TheCocktailDB through a shared query cache. Route
//! loaders fill the cache before a page is shown; views read it back by key.

pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod drink;
pub mod error;
pub mod loader;
pub mod query;
pub mod router;
pub mod ui;
pub mod views;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{CocktailError, CocktailResult};
