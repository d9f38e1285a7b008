use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_LOG_FILTER: &str = "letterbox=info";
const CONFIG_FILE: &str = "config.toml";

/// Resolve the data directory (config file and logs) based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. LETTERBOX_PATH environment variable (with tilde expansion)
/// 3. XDG data directory
/// 4. ~/.letterbox (fallback for systems without XDG)
pub fn resolve_data_dir(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var("LETTERBOX_PATH") {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join("letterbox"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".letterbox"));
    }

    Err(Error::Config(
        "Could not determine data directory: no HOME directory or XDG data directory found"
            .to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationConfig {
    #[serde(default = "default_diary_page_size")]
    pub diary_page_size: usize,
    /// Reviews, similar films and social lists
    #[serde(default = "default_details_page_size")]
    pub details_page_size: usize,
}

fn default_diary_page_size() -> usize {
    15
}

fn default_details_page_size() -> usize {
    5
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            diary_page_size: default_diary_page_size(),
            details_page_size: default_details_page_size(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Searched before every built-in executable location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executables_dir: Option<PathBuf>,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    #[serde(default)]
    pub pagination: PaginationConfig,
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

fn default_tick_rate_ms() -> u64 {
    100
}

impl Default for Config {
    fn default() -> Self {
        Self {
            executables_dir: None,
            log_filter: default_log_filter(),
            tick_rate_ms: default_tick_rate_ms(),
            pagination: PaginationConfig::default(),
        }
    }
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.normalize();
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Location of the config file inside `data_dir`.
    pub fn path_in(data_dir: &Path) -> PathBuf {
        data_dir.join(CONFIG_FILE)
    }

    // A zero page size would make every page empty and the page count undefined.
    fn normalize(&mut self) {
        if self.pagination.diary_page_size == 0 {
            self.pagination.diary_page_size = default_diary_page_size();
        }
        if self.pagination.details_page_size == 0 {
            self.pagination.details_page_size = default_details_page_size();
        }
        if self.tick_rate_ms == 0 {
            self.tick_rate_ms = default_tick_rate_ms();
        }
        if let Some(dir) = &self.executables_dir {
            self.executables_dir = Some(expand_tilde(&dir.to_string_lossy()));
        }
    }
}
