//! Prompt theme and brand colour

use cliclack::ThemeState;
use console::Style;

/// Brand colour shared by prompts and page headings
pub fn accent() -> Style {
    Style::new().magenta()
}

/// Prompt bars follow the accent; submitted answers turn green
#[derive(Debug, Clone, Default)]
pub struct CocktailTheme;

impl cliclack::Theme for CocktailTheme {
    fn bar_color(&self, state: &ThemeState) -> Style {
        match state {
            ThemeState::Active => accent(),
            ThemeState::Submit => accent().dim(),
            ThemeState::Error(_) => Style::new().red(),
            ThemeState::Cancel => Style::new().dim(),
        }
    }

    fn state_symbol_color(&self, state: &ThemeState) -> Style {
        match state {
            ThemeState::Submit => Style::new().green(),
            other => self.bar_color(other),
        }
    }
}

/// Install the theme for every prompt in the process
pub fn init_theme() {
    cliclack::set_theme(CocktailTheme);
}
