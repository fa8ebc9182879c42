use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{
    DEFAULT_QUERY_PATH, DEFAULT_SERVICE_URL, DEFAULT_TYPING_CHARS_PER_TICK, DEFAULT_UPLOAD_PATH,
    DEFAULT_USER_FILE, HTTP_REQUEST_TIMEOUT_SECS,
};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Remote question-answering service
    #[serde(default)]
    pub service: ServiceConfig,

    /// Where the user record comes from
    #[serde(default)]
    pub identity: IdentityConfig,

    /// UI configuration
    #[serde(default)]
    pub ui: UiConfig,
}

/// Remote service endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub base_url: String,
    pub upload_path: String,
    pub query_path: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SERVICE_URL.to_string(),
            upload_path: DEFAULT_UPLOAD_PATH.to_string(),
            query_path: DEFAULT_QUERY_PATH.to_string(),
            timeout_secs: HTTP_REQUEST_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// User record file; defaults to `user.json` in the config directory
    pub user_file: Option<PathBuf>,
}

impl IdentityConfig {
    /// Resolve the user record path
    pub fn user_file_path(&self) -> Result<PathBuf> {
        match &self.user_file {
            Some(path) => Ok(path.clone()),
            None => Ok(get_config_dir()?.join(DEFAULT_USER_FILE)),
        }
    }
}

/// UI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Characters revealed per UI tick by the typing animation (0 disables it)
    pub typing_chars_per_tick: usize,
    /// Show citations under answers
    pub show_citations: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            typing_chars_per_tick: DEFAULT_TYPING_CHARS_PER_TICK,
            show_citations: true,
        }
    }
}

/// Load configuration from multiple sources
pub fn load_config() -> Result<Config> {
    let global_config = get_config_dir()?.join("config.toml");
    let local_config = PathBuf::from(".prajna/config.toml");
    load_config_from(&[global_config, local_config])
}

/// Layer defaults, the given TOML files (when present) and `PRAJNA_` env vars
pub fn load_config_from(files: &[PathBuf]) -> Result<Config> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    for file in files {
        if file.exists() {
            figment = figment.merge(Toml::file(file));
        }
    }

    // PRAJNA_SERVICE__BASE_URL -> service.base_url
    figment = figment.merge(Env::prefixed("PRAJNA_").split("__"));

    figment
        .extract()
        .context("Failed to load configuration")
}

/// Load a single config file over the defaults, skipping the other layers
pub fn load_config_file(path: &Path) -> Result<Config> {
    if !path.exists() {
        anyhow::bail!("Config file not found: {}", path.display());
    }

    Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .extract()
        .with_context(|| format!("Invalid config {}", path.display()))
}

/// Get the configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "prajna") {
        let config_dir = proj_dirs.config_dir();
        std::fs::create_dir_all(config_dir)?;
        Ok(config_dir.to_path_buf())
    } else {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .context("Could not determine home directory")?;
        let config_dir = PathBuf::from(home).join(".config").join("prajna");
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }
}

/// Save configuration to file
pub fn save_config(config: &Config, path: Option<PathBuf>) -> Result<()> {
    let path = if let Some(p) = path {
        p
    } else {
        get_config_dir()?.join("config.toml")
    };

    let toml_string = toml::to_string_pretty(config)?;
    std::fs::write(&path, toml_string)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    Ok(())
}

/// Create a default configuration file if it doesn't exist
pub fn init_config() -> Result<PathBuf> {
    let config_file = get_config_dir()?.join("config.toml");

    if !config_file.exists() {
        save_config(&Config::default(), Some(config_file.clone()))?;
    }

    Ok(config_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.service.base_url, "https://prajna-ai.onrender.com");
        assert_eq!(config.service.upload_path, "/upload");
        assert_eq!(config.service.query_path, "/handle_query");
        assert!(config.ui.show_citations);
    }

    #[test]
    fn test_layered_files() {
        let temp_dir = TempDir::new().unwrap();
        let global = temp_dir.path().join("global.toml");
        let local = temp_dir.path().join("local.toml");
        std::fs::write(
            &global,
            "[service]\nbase_url = \"http://global:5000\"\ntimeout_secs = 30\n",
        )
        .unwrap();
        std::fs::write(&local, "[service]\nbase_url = \"http://local:5000\"\n").unwrap();

        let config = load_config_from(&[global, local, temp_dir.path().join("missing.toml")]).unwrap();
        assert_eq!(config.service.base_url, "http://local:5000");
        assert_eq!(config.service.timeout_secs, 30);
        assert_eq!(config.service.query_path, "/handle_query");
    }

    #[test]
    fn test_save_and_load_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let mut config = Config::default();
        config.ui.typing_chars_per_tick = 0;
        config.identity.user_file = Some(PathBuf::from("/tmp/me.json"));

        save_config(&config, Some(path.clone())).unwrap();
        assert_eq!(load_config_file(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[service]\nbase_url = \"http://localhost:5000\"\n\n[ui]\nshow_citations = false\n",
        )
        .unwrap();

        let config = load_config_file(&path).unwrap();
        assert_eq!(config.service.base_url, "http://localhost:5000");
        assert_eq!(config.service.upload_path, "/upload");
        assert_eq!(config.service.query_path, "/handle_query");
        assert_eq!(config.service.timeout_secs, HTTP_REQUEST_TIMEOUT_SECS);
        assert!(!config.ui.show_citations);
        assert_eq!(config.ui.typing_chars_per_tick, DEFAULT_TYPING_CHARS_PER_TICK);
    }

    #[test]
    fn test_partial_section_parses_with_toml() {
        let config: Config = toml::from_str("[ui]\ntyping_chars_per_tick = 0\n").unwrap();
        assert_eq!(config.ui.typing_chars_per_tick, 0);
        assert!(config.ui.show_citations);
        assert_eq!(config.service, ServiceConfig::default());
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        assert!(load_config_file(&temp_dir.path().join("nope.toml")).is_err());
    }

    #[test]
    fn test_explicit_user_file() {
        let identity = IdentityConfig {
            user_file: Some(PathBuf::from("/srv/user.json")),
        };
        assert_eq!(identity.user_file_path().unwrap(), PathBuf::from("/srv/user.json"));
    }
}
