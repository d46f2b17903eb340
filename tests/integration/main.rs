//! Integration tests for cocktails

mod queries;

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use tempfile::TempDir;

    /// Binary with an isolated config file and an API URL nothing listens on
    fn cocktails(temp: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("cocktails");
        cmd.env("COCKTAILS_CONFIG", temp.path().join("config.toml"))
            .env("COCKTAILS_API_URL", "http://127.0.0.1:9/api/json/v1/1")
            .env("CI", "1");
        cmd
    }

    #[test]
    fn help_displays() {
        let temp = TempDir::new().unwrap();
        cocktails(&temp)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("search cocktail recipes"));
    }

    #[test]
    fn version_displays() {
        let temp = TempDir::new().unwrap();
        cocktails(&temp)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("cocktails"));
    }

    #[test]
    fn config_path() {
        let temp = TempDir::new().unwrap();
        cocktails(&temp)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let temp = TempDir::new().unwrap();
        cocktails(&temp)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[cache]"))
            .stdout(predicate::str::contains("stale_after_secs = 300"));
    }

    #[test]
    fn config_set_then_show() {
        let temp = TempDir::new().unwrap();
        cocktails(&temp)
            .args(["config", "set", "search.default_term", "mint"])
            .assert()
            .success();

        cocktails(&temp)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("default_term = \"mint\""));
    }

    #[test]
    fn config_set_unknown_key() {
        let temp = TempDir::new().unwrap();
        cocktails(&temp)
            .args(["config", "set", "cache.ttl", "1"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown config key"));
    }

    #[test]
    fn open_unknown_page() {
        let temp = TempDir::new().unwrap();
        cocktails(&temp)
            .args(["open", "/newsletter"])
            .assert()
            .failure()
            .stdout(predicate::str::contains("can't seem to find the page"))
            .stderr(predicate::str::contains("Page not found"));
    }

    #[test]
    fn unreachable_api_renders_error_page() {
        let temp = TempDir::new().unwrap();
        cocktails(&temp)
            .args(["search", "vodka"])
            .assert()
            .failure()
            .stdout(predicate::str::contains("Something went wrong!"))
            .stderr(predicate::str::contains("Could not load data"));
    }

    #[test]
    fn invalid_api_url() {
        let temp = TempDir::new().unwrap();
        cocktails(&temp)
            .args(["show", "11007", "--api-url", "not a url"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid API URL"));
    }

    #[test]
    fn browse_needs_terminal() {
        let temp = TempDir::new().unwrap();
        cocktails(&temp)
            .arg("browse")
            .assert()
            .failure()
            .stderr(predicate::str::contains("interactive terminal"));
    }
}
