//! Loading placeholder with CI fallback

use super::context::UiContext;
use console::style;

/// A task spinner with CI fallback
pub struct TaskSpinner {
    spinner: Option<cliclack::ProgressBar>,
    interactive: bool,
}

impl TaskSpinner {
    /// Create a new spinner (nothing is shown until `start`)
    pub fn new(ctx: &UiContext) -> Self {
        Self {
            spinner: None,
            interactive: ctx.use_fancy_output(),
        }
    }

    /// Start the spinner with a message
    pub fn start(&mut self, message: &str) {
        if self.interactive {
            let spinner = cliclack::spinner();
            spinner.start(message);
            self.spinner = Some(spinner);
        }
        // Plain mode stays silent so piped output is only the page
    }

    /// Stop with error message
    pub fn stop_error(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.error(message);
        } else if !self.interactive {
            eprintln!("{} {}", style("[FAIL]").red(), message);
        }
    }

    /// Clear the spinner without any message
    pub fn clear(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.clear();
        }
    }
}

impl Drop for TaskSpinner {
    fn drop(&mut self) {
        self.clear();
    }
}
