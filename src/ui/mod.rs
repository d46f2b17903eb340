//! UI module for consistent CLI output
//!
//! Uses `cliclack` for prompts and spinners with automatic fallback to plain
//! output in CI/non-interactive environments.
//!
//! # Example
//!
//! ```rust,ignore
//! use cocktails::ui::{self, UiContext, TaskSpinner};
//!
//! let ctx = UiContext::detect();
//!
//! let mut spinner = TaskSpinner::new(&ctx);
//! spinner.start("Loading...");
//! // ... run the loader ...
//! spinner.clear();
//!
//! ui::heading(&ctx, &drink.name);
//! ui::drink_card(&ctx, &drink);
//! ```

mod context;
mod output;
mod progress;
mod prompts;
mod theme;

pub use context::UiContext;
pub use output::{
    back_home, done, drink_card, error_page, farewell, heading, load_failed, loading, no_results,
    notice, notice_hint,
};
pub use progress::TaskSpinner;
pub use prompts::{input, select};
pub use theme::{accent, init_theme, CocktailTheme};
