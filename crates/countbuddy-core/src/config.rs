//! Configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::timeline::Timings;

/// Top-level countbuddy configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountbuddyConfig {
    /// Where the profile list is stored.
    #[serde(default = "default_profiles_path")]
    pub profiles_path: PathBuf,
    /// Reveal and feedback delays.
    #[serde(default)]
    pub timings: Timings,
    /// Progress service settings.
    #[serde(default)]
    pub server: ServerConfig,
}

/// Progress service settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the service listens on.
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_profiles_path() -> PathBuf {
    PathBuf::from("./countbuddy-profiles.json")
}

fn default_bind() -> String {
    "127.0.0.1:5000".to_string()
}

impl Default for CountbuddyConfig {
    fn default() -> Self {
        Self {
            profiles_path: default_profiles_path(),
            timings: Timings::default(),
            server: ServerConfig::default(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let var_name = &result[start + 2..start + end];
        let value = std::env::var(var_name).unwrap_or_default();
        result = format!("{}{}{}", &result[..start], value, &result[start + end + 1..]);
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `countbuddy.toml` in the current directory
/// 2. `~/.config/countbuddy/config.toml`
///
/// Environment variable overrides: `COUNTBUDDY_PROFILES`, `COUNTBUDDY_BIND`.
pub fn load_config() -> Result<CountbuddyConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<CountbuddyConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("countbuddy.toml");
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|dir| dir.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<CountbuddyConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => CountbuddyConfig::default(),
    };

    if let Ok(path) = std::env::var("COUNTBUDDY_PROFILES") {
        config.profiles_path = PathBuf::from(path);
    }
    if let Ok(bind) = std::env::var("COUNTBUDDY_BIND") {
        config.server.bind = bind;
    }

    config.profiles_path = PathBuf::from(resolve_env_vars(&config.profiles_path.to_string_lossy()));
    config.server.bind = resolve_env_vars(&config.server.bind);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("countbuddy"))
}
