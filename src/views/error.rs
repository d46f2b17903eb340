//! Error page shown when navigation fails

use crate::error::CocktailError;
use crate::ui::{self, UiContext};

/// Renders loader and routing failures
pub struct ErrorView {
    ctx: UiContext,
}

impl ErrorView {
    pub fn new(ctx: UiContext) -> Self {
        Self { ctx }
    }

    /// Title and body for an error page; the error itself is reported by the caller
    pub fn page(err: &CocktailError) -> (&'static str, String) {
        match err {
            CocktailError::RouteNotFound(_) => (
                "Oops!",
                "We can't seem to find the page you are looking for".to_string(),
            ),
            CocktailError::Fetch(_) => (
                "Something went wrong!",
                "The recipe service could not be reached".to_string(),
            ),
            other => ("Something went wrong!", other.to_string()),
        }
    }

    pub fn render(&self, err: &CocktailError) {
        let (title, body) = Self::page(err);
        ui::error_page(&self.ctx, title, &body);
    }
}
