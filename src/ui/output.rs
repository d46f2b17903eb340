//! Terminal output for pages and command results
//!
//! Each helper prints through cliclack on an interactive terminal and falls
//! back to tagged plain lines for pipes and CI.

use super::context::UiContext;
use super::theme::accent;
use crate::drink::Drink;
use console::{style, StyledObject};

/// Where the error page and detail view point the user
pub const HOME_HINT: &str = "Back home: cocktails open /";

#[derive(Debug, Clone, Copy)]
enum Tone {
    Done,
    Notice,
    Failure,
}

impl Tone {
    fn tag(self) -> StyledObject<&'static str> {
        match self {
            Self::Done => style("[OK]").green(),
            Self::Notice => style("[WARN]").yellow(),
            Self::Failure => style("[FAIL]").red(),
        }
    }
}

fn status(ctx: &UiContext, tone: Tone, message: &str) {
    if ctx.use_fancy_output() {
        let _ = match tone {
            Tone::Done => cliclack::log::success(message),
            Tone::Notice => cliclack::log::warning(message),
            Tone::Failure => cliclack::log::error(message),
        };
    } else {
        println!("  {} {}", tone.tag(), message);
    }
}

fn dim_line(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::remark(message).ok();
    } else {
        println!("  {}", style(message).dim());
    }
}

/// Page heading: a search term, a drink name, or the browser banner
pub fn heading(ctx: &UiContext, title: &str) {
    let title = accent().bold().apply_to(title);
    if ctx.use_fancy_output() {
        cliclack::intro(title).ok();
    } else {
        println!("{}", title);
        println!();
    }
}

/// Closing line of an interactive session
pub fn farewell(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::outro(accent().apply_to(message)).ok();
    } else {
        println!();
        println!("{}", message);
    }
}

pub fn done(ctx: &UiContext, message: &str) {
    status(ctx, Tone::Done, message);
}

pub fn notice(ctx: &UiContext, message: &str) {
    status(ctx, Tone::Notice, message);
}

/// Notice with a suggested next step
pub fn notice_hint(ctx: &UiContext, message: &str, hint: &str) {
    notice(ctx, &format!("{} - {}", message, hint));
}

/// Placeholder for a view whose data has not arrived yet
pub fn loading(ctx: &UiContext) {
    dim_line(ctx, "Loading...");
}

/// A search that matched nothing
pub fn no_results(ctx: &UiContext, term: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::info("No matching items found...").ok();
    } else {
        println!("  No matching items found for \"{}\"...", term);
    }
}

/// A view whose query failed
pub fn load_failed(ctx: &UiContext, reason: &str) {
    status(ctx, Tone::Failure, &format!("Something went wrong: {}", reason));
}

/// Full-page error with the way back home
pub fn error_page(ctx: &UiContext, title: &str, body: &str) {
    if ctx.use_fancy_output() {
        cliclack::outro(style(title).red().bold()).ok();
    } else {
        println!();
        println!("{} {}", style("[ERROR]").red(), title);
    }
    dim_line(ctx, body);
    back_home(ctx);
}

pub fn back_home(ctx: &UiContext) {
    dim_line(ctx, HOME_HINT);
}

/// Detail block for one drink; missing fields show as `-`
pub fn drink_card(ctx: &UiContext, drink: &Drink) {
    let ingredients = drink.ingredients.join(", ");
    let fields = [
        ("category", drink.category.as_deref()),
        ("info", drink.info.as_deref()),
        ("glass", drink.glass.as_deref()),
        ("ingredients", Some(ingredients.as_str()).filter(|s| !s.is_empty())),
        ("instructions", drink.instructions.as_deref()),
        ("image", drink.image.as_deref()),
    ];

    for (label, value) in fields {
        let value = value.unwrap_or("-");
        if ctx.use_fancy_output() {
            println!("  {:<13} {}", style(label).dim(), value);
        } else {
            println!("  {:<13} {}", label, value);
        }
    }
    println!();
}
