//! Interactive prompts with CI/non-interactive fallback

use super::context::UiContext;
use crate::error::{CocktailError, CocktailResult};
use std::io;

/// `None` when the user cancelled the prompt (Esc or Ctrl-C)
fn answered<T>(result: io::Result<T>, prompt: &str) -> CocktailResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(None),
        Err(e) => Err(CocktailError::User(format!("{} failed: {}", prompt, e))),
    }
}

/// Prompt for free text; an empty answer is returned as-is and a cancelled
/// prompt as `None`
pub async fn input(
    ctx: &UiContext,
    message: &str,
    placeholder: &str,
) -> CocktailResult<Option<String>> {
    if !ctx.is_interactive() {
        return Err(CocktailError::User(
            "This command needs an interactive terminal".to_string(),
        ));
    }

    let message = message.to_string();
    let placeholder = placeholder.to_string();
    let result = tokio::task::spawn_blocking(move || {
        cliclack::input(&message)
            .placeholder(&placeholder)
            .required(false)
            .interact::<String>()
    })
    .await
    .map_err(|e| CocktailError::User(format!("Prompt task failed: {}", e)))?;

    answered(result, "Prompt")
}

/// Prompt for selection from a list of options.
///
/// Returns the first option when non-interactive, `None` when cancelled.
pub async fn select<T: Clone + Send + Eq + 'static>(
    ctx: &UiContext,
    message: &str,
    options: &[(T, String, String)], // (value, label, hint)
) -> CocktailResult<Option<T>> {
    let first = options
        .first()
        .map(|(value, _, _)| value.clone())
        .ok_or_else(|| CocktailError::Internal("select called without options".to_string()))?;

    if !ctx.is_interactive() {
        return Ok(Some(first));
    }

    let message = message.to_string();
    let items = options.to_vec();

    let result: io::Result<T> = tokio::task::spawn_blocking(move || {
        let mut select = cliclack::select(&message);
        for (value, label, hint) in items {
            select = select.item(value, label, hint);
        }
        select.interact()
    })
    .await
    .map_err(|e| CocktailError::User(format!("Select task failed: {}", e)))?;

    answered(result, "Select")
}
