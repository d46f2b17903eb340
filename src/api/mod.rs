//! Remote data source for cocktail recipes
//!
//! - `DrinkSource`: the async lookup interface
//! - `CocktailDb`: HTTP implementation against TheCocktailDB

mod cocktaildb;
mod source;

pub use cocktaildb::{CocktailDb, DEFAULT_BASE_URL};
pub use source::DrinkSource;

use crate::config::Config;
use crate::error::CocktailResult;
use std::sync::Arc;

/// Create the recipe source described by the configuration
pub fn create_source(config: &Config) -> CocktailResult<Arc<dyn DrinkSource>> {
    let client = CocktailDb::new(&config.api.base_url, config.api_timeout())?;
    Ok(Arc::new(client))
}
