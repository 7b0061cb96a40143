//! Configuration for the BugPilot client.
//!
//! Settings are read from `bugpilot.toml` in the user's config directory
//! and layered file → environment → CLI:
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:5000/api"
//! timeout_secs = 30
//!
//! [board]
//! show_descriptions = true
//! ```
//!
//! `BUGPILOT_BACKEND_URL` (also picked up from a `.env` file in the working
//! directory) overrides `api.base_url`; `--base-url` overrides both.
//! `BUGPILOT_SESSION_FILE` relocates the persisted session.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
pub const BASE_URL_ENV: &str = "BUGPILOT_BACKEND_URL";
/// Overrides where the session is persisted.
pub const SESSION_FILE_ENV: &str = "BUGPILOT_SESSION_FILE";
const CONFIG_FILE: &str = "bugpilot.toml";
const SESSION_FILE: &str = "session.json";
const APP_DIR: &str = "bugpilot";

/// `[api]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSection {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// `[board]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSection {
    /// Print ticket descriptions under titles on the board
    #[serde(default = "default_show_descriptions")]
    pub show_descriptions: bool,
}

fn default_show_descriptions() -> bool {
    true
}

impl Default for BoardSection {
    fn default() -> Self {
        Self {
            show_descriptions: default_show_descriptions(),
        }
    }
}

/// The complete bugpilot.toml structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BugpilotToml {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub board: BoardSection,
}

impl BugpilotToml {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse bugpilot.toml")
    }

    /// Returns the default configuration if the file doesn't exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize bugpilot.toml")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if !is_http_url(&self.api.base_url) {
            warnings.push(format!(
                "Invalid api.base_url '{}': should start with http:// or https://",
                self.api.base_url
            ));
        }
        if self.api.timeout_secs == 0 {
            warnings.push("api.timeout_secs is 0: every request would time out".to_string());
        }
        warnings
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Default path of bugpilot.toml (`~/.config/bugpilot/bugpilot.toml` on Linux).
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(CONFIG_FILE)
}

/// Default path of the persisted session.
pub fn default_session_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(SESSION_FILE)
}

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub config_path: PathBuf,
    pub session_path: PathBuf,
    pub base_url: String,
    pub timeout: Duration,
    pub show_descriptions: bool,
    pub verbose: bool,
    toml: BugpilotToml,
}

impl Config {
    /// Load from disk and the environment, then apply CLI overrides.
    pub fn load(config_path: Option<PathBuf>, cli_base_url: Option<&str>, verbose: bool) -> Result<Self> {
        // A missing .env is the normal case.
        let _ = dotenvy::dotenv();

        let config_path = config_path.unwrap_or_else(default_config_path);
        let toml = BugpilotToml::load_or_default(&config_path)?;
        let env_base_url = std::env::var(BASE_URL_ENV).ok();

        let mut config = Self::from_sources(toml, env_base_url.as_deref(), cli_base_url);
        config.config_path = config_path;
        config.verbose = verbose;
        if let Some(path) = std::env::var_os(SESSION_FILE_ENV).filter(|p| !p.is_empty()) {
            config.session_path = PathBuf::from(path);
        }
        Ok(config)
    }

    /// Merge file settings with already-read env and CLI values (CLI → env → file).
    pub fn from_sources(toml: BugpilotToml, env_base_url: Option<&str>, cli_base_url: Option<&str>) -> Self {
        let base_url = cli_base_url
            .or(env_base_url)
            .filter(|u| !u.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| toml.api.base_url.clone());

        Self {
            config_path: default_config_path(),
            session_path: default_session_path(),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(toml.api.timeout_secs),
            show_descriptions: toml.board.show_descriptions,
            verbose: false,
            toml,
        }
    }

    pub fn toml(&self) -> &BugpilotToml {
        &self.toml
    }

    pub fn validate(&self) -> Vec<String> {
        self.toml.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::tempdir;

    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn test_defaults() {
        let toml = BugpilotToml::default();
        assert_eq!(toml.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(toml.api.timeout_secs, 30);
        assert!(toml.board.show_descriptions);
        assert!(toml.validate().is_empty());
    }

    #[test]
    fn test_parse_partial_file() {
        let toml = BugpilotToml::parse(
            r#"
            [api]
            base_url = "https://bugpilot.example.com/api"
            "#,
        )
        .unwrap();
        assert_eq!(toml.api.base_url, "https://bugpilot.example.com/api");
        assert_eq!(toml.api.timeout_secs, 30);
        assert!(toml.board.show_descriptions);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(BugpilotToml::parse("[api\nbase_url = ").is_err());
    }

    #[test]
    fn test_validate_flags_bad_values() {
        let mut toml = BugpilotToml::default();
        toml.api.base_url = "localhost:5000".to_string();
        toml.api.timeout_secs = 0;
        let warnings = toml.validate();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("localhost:5000"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);
        let mut toml = BugpilotToml::default();
        toml.board.show_descriptions = false;
        toml.save(&path).unwrap();

        let loaded = BugpilotToml::load(&path).unwrap();
        assert!(!loaded.board.show_descriptions);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempdir().unwrap();
        let toml = BugpilotToml::load_or_default(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(toml.api.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_layering_cli_over_env_over_file() {
        let mut toml = BugpilotToml::default();
        toml.api.base_url = "http://file/api".to_string();

        let file_only = Config::from_sources(toml.clone(), None, None);
        assert_eq!(file_only.base_url, "http://file/api");

        let env = Config::from_sources(toml.clone(), Some("http://env/api/"), None);
        assert_eq!(env.base_url, "http://env/api");

        let cli = Config::from_sources(toml, Some("http://env/api"), Some("http://cli/api"));
        assert_eq!(cli.base_url, "http://cli/api");
    }

    #[test]
    fn test_blank_override_falls_back_to_file() {
        let config = Config::from_sources(BugpilotToml::default(), Some("  "), None);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_load_reads_env_var() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let dir = tempdir().unwrap();
        let saved = std::env::var(BASE_URL_ENV).ok();
        unsafe { std::env::set_var(BASE_URL_ENV, "http://from-env:9000/api") };

        let config = Config::load(Some(dir.path().join(CONFIG_FILE)), None, true).unwrap();
        assert_eq!(config.base_url, "http://from-env:9000/api");
        assert!(config.verbose);

        match saved {
            Some(val) => unsafe { std::env::set_var(BASE_URL_ENV, val) },
            None => unsafe { std::env::remove_var(BASE_URL_ENV) },
        }
    }
}
