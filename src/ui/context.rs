//! UI context for detecting interactive vs CI environments

use std::io::IsTerminal;

/// UI context that determines output behavior
#[derive(Debug, Clone)]
pub struct UiContext {
    /// Whether running in an interactive terminal
    interactive: bool,
}

impl UiContext {
    /// Detect the current environment
    pub fn detect() -> Self {
        Self {
            interactive: Self::detect_interactive(),
        }
    }

    /// Create a non-interactive context (for testing or piped output)
    pub fn non_interactive() -> Self {
        Self { interactive: false }
    }

    /// Check if we're in an interactive terminal
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Check if we should use fancy output (spinners, prompts)
    pub fn use_fancy_output(&self) -> bool {
        self.interactive
    }

    fn detect_interactive() -> bool {
        if !std::io::stdout().is_terminal() || !std::io::stdin().is_terminal() {
            return false;
        }

        // Explicit opt-out, then common CI indicators
        let plain_vars = [
            "COCKTAILS_PLAIN",
            "CI",
            "GITHUB_ACTIONS",
            "GITLAB_CI",
            "CIRCLECI",
            "BUILDKITE",
            "TF_BUILD",
        ];

        !plain_vars.iter().any(|var| std::env::var_os(var).is_some())
    }
}
