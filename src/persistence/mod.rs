use crate::config::Configuration;
use crate::error::Result;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "PRATAC_CONFIG";
pub const CONFIG_DIR_NAME: &str = "pratac";
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const FALLBACK_CONFIG_FILE: &str = "pratac.json";

pub trait ConfigStore {
    fn path(&self) -> &Path;
    fn exists(&self) -> bool;
    fn load(&self) -> Result<Configuration>;
    fn save(&self, config: &Configuration) -> Result<()>;
}

/// Picks the config file location: explicit path, `PRATAC_CONFIG`,
/// `$XDG_CONFIG_HOME/pratac`, `$HOME/.config/pratac`, then the working dir.
pub fn resolve_config_path<F>(explicit: Option<&Path>, env: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    let non_empty = |key: &str| env(key).filter(|v| !v.trim().is_empty());
    if let Some(path) = non_empty(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    if let Some(dir) = non_empty("XDG_CONFIG_HOME") {
        return PathBuf::from(dir)
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME);
    }
    if let Some(home) = non_empty("HOME") {
        return PathBuf::from(home)
            .join(".config")
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME);
    }
    PathBuf::from(FALLBACK_CONFIG_FILE)
}

pub fn default_config_path() -> PathBuf {
    resolve_config_path(None, |key| std::env::var(key).ok())
}

pub mod file;

pub use file::{JsonConfigStore, save_plan_to_csv, save_plan_to_json};
