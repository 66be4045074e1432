// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf, str::FromStr};

use tokio::fs;

use sittersync_client::ClientConfig;
use sittersync_core::{APP_NAME, Config as CoreConfig};

const CONFIG_ENV: &str = "SITTERSYNC_CONFIG";

/// Resolve and read the configuration: `--config`, then `$SITTERSYNC_CONFIG`, then the
/// per-user config directory.
#[tracing::instrument]
pub async fn parse_config(path: Option<PathBuf>) -> Result<Config, Box<dyn Error>> {
    let path = if let Some(path) = path {
        path
    } else if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        PathBuf::from(env_path)
    } else {
        let config = get_config_dir()?.join(format!("{APP_NAME}/config.toml"));
        if !config.exists() {
            return Err(format!("No config found at: {}", config.display()).into());
        }
        config
    };

    fs::read_to_string(&path)
        .await
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
        .parse()
}

/// Configuration of the command line.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    /// Controller settings.
    #[serde(default)]
    pub core: CoreConfig,

    /// Where the schedule service lives and how to authenticate.
    pub server: ClientConfig,

    /// The signed-in account.
    #[serde(default)]
    pub account: Account,
}

/// The signed-in account.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct Account {
    /// Email the bearer token was issued for.
    pub email: Option<String>,
}

impl FromStr for Config {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut config: Config = toml::from_str(s)?;
        config.core.normalize()?;
        Ok(config)
    }
}

fn get_config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(windows)]
    let config_dir = dirs::config_dir();
    config_dir.ok_or_else(|| "User-specific home directory not found".into())
}
