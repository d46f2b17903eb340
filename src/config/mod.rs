//! Configuration for cocktails
//!
//! The file lives at `<config dir>/cocktails/config.toml` unless `--config`
//! (or `COCKTAILS_CONFIG`) points elsewhere. A missing file means defaults.
//! The effective configuration for a run is the file plus `--api-url`.

pub mod schema;

pub use schema::{Config, LogFormat};

use crate::error::{CocktailError, CocktailResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Where the config file path came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// Platform config directory
    Default,
    /// `--config` flag or `COCKTAILS_CONFIG`
    Explicit,
}

/// Outcome of `config init`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Created,
    Overwritten,
    /// A file already existed and `force` was not given
    Kept,
}

/// Reads and writes the config file
pub struct ConfigManager {
    path: PathBuf,
    origin: ConfigOrigin,
}

impl ConfigManager {
    /// Use `explicit` when given, otherwise the platform location
    pub fn locate(explicit: Option<PathBuf>) -> Self {
        match explicit {
            Some(path) => Self {
                path,
                origin: ConfigOrigin::Explicit,
            },
            None => Self {
                path: Self::default_path(),
                origin: ConfigOrigin::Default,
            },
        }
    }

    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cocktails")
            .join("config.toml")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn origin(&self) -> ConfigOrigin {
        self.origin
    }

    /// The file as written, or defaults when it does not exist
    pub async fn load(&self) -> CocktailResult<Config> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", self.path.display());
                return Ok(Config::default());
            }
            Err(e) => {
                return Err(CocktailError::io(
                    format!("reading config from {}", self.path.display()),
                    e,
                ))
            }
        };

        toml::from_str(&content).map_err(|e| CocktailError::ConfigInvalid {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    /// Configuration for this run: the file, then an `--api-url` override
    pub async fn resolve(&self, api_url: Option<&str>) -> CocktailResult<Config> {
        let mut config = self.load().await?;
        if let Some(url) = api_url {
            config.set("api.base_url", url)?;
        }
        Ok(config)
    }

    /// Write the default configuration
    pub async fn init(&self, force: bool) -> CocktailResult<InitOutcome> {
        let exists = fs::try_exists(&self.path).await.unwrap_or(false);
        if exists && !force {
            return Ok(InitOutcome::Kept);
        }

        self.write(&Config::default()).await?;
        Ok(if exists {
            InitOutcome::Overwritten
        } else {
            InitOutcome::Created
        })
    }

    /// Change one key in the file, leaving other settings as written
    pub async fn set(&self, key: &str, value: &str) -> CocktailResult<Config> {
        let mut config = self.load().await?;
        config.set(key, value)?;
        self.write(&config).await?;
        Ok(config)
    }

    async fn write(&self, config: &Config) -> CocktailResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| CocktailError::ConfigDirCreate {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.path, content).await.map_err(|e| {
            CocktailError::io(format!("writing config to {}", self.path.display()), e)
        })?;

        info!("Configuration saved to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manager(temp: &TempDir) -> ConfigManager {
        ConfigManager::locate(Some(temp.path().join("nested").join("config.toml")))
    }

    #[tokio::test]
    async fn missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = manager(&temp);

        assert_eq!(manager.origin(), ConfigOrigin::Explicit);
        let config = manager.load().await.unwrap();
        assert_eq!(config.search.default_term, "lemon");
    }

    #[test]
    fn default_location() {
        let manager = ConfigManager::locate(None);
        assert_eq!(manager.origin(), ConfigOrigin::Default);
        assert!(manager.path().ends_with("cocktails/config.toml"));
    }

    #[tokio::test]
    async fn set_keeps_other_settings() {
        let temp = TempDir::new().unwrap();
        let manager = manager(&temp);

        manager.set("search.default_term", "mint").await.unwrap();
        manager.set("cache.stale_after_secs", "30").await.unwrap();

        let loaded = manager.load().await.unwrap();
        assert_eq!(loaded.search.default_term, "mint");
        assert_eq!(loaded.cache.stale_after_secs, 30);
    }

    #[tokio::test]
    async fn rejected_set_leaves_file_alone() {
        let temp = TempDir::new().unwrap();
        let manager = manager(&temp);

        assert!(manager.set("api.timeout_secs", "soon").await.is_err());
        assert!(!manager.path().exists());
    }

    #[tokio::test]
    async fn init_respects_force() {
        let temp = TempDir::new().unwrap();
        let manager = manager(&temp);

        assert_eq!(manager.init(false).await.unwrap(), InitOutcome::Created);
        manager.set("search.default_term", "mint").await.unwrap();
        assert_eq!(manager.init(false).await.unwrap(), InitOutcome::Kept);
        assert_eq!(manager.load().await.unwrap().search.default_term, "mint");

        assert_eq!(manager.init(true).await.unwrap(), InitOutcome::Overwritten);
        assert_eq!(manager.load().await.unwrap().search.default_term, "lemon");
    }

    #[tokio::test]
    async fn api_url_override_is_validated() {
        let temp = TempDir::new().unwrap();
        let manager = manager(&temp);

        let config = manager.resolve(Some("http://localhost:9000/api")).await.unwrap();
        assert_eq!(config.api.base_url, "http://localhost:9000/api");

        let err = manager.resolve(Some("not a url")).await.unwrap_err();
        assert!(matches!(err, CocktailError::ApiUrlInvalid { .. }));
    }

    #[tokio::test]
    async fn invalid_file_is_reported() {
        let temp = TempDir::new().unwrap();
        let manager = manager(&temp);
        std::fs::create_dir_all(manager.path().parent().unwrap()).unwrap();
        std::fs::write(manager.path(), "[cache]\nstale_after_secs = \"soon\"\n").unwrap();

        let err = manager.load().await.unwrap_err();
        assert!(matches!(err, CocktailError::ConfigInvalid { .. }));
    }
}
