// ⚙️ Configuration - startup settings read from the environment

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const CSV_PATH_VAR: &str = "UFO_CSV_PATH";
pub const BIND_ADDR_VAR: &str = "UFO_BIND_ADDR";
pub const STATIC_DIR_VAR: &str = "UFO_STATIC_DIR";

pub const DEFAULT_CSV_PATH: &str = "Cleaned.csv";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8050";
pub const DEFAULT_STATIC_DIR: &str = "web";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `;`-delimited sightings file
    pub csv_path: PathBuf,
    /// Local address the dashboard listens on
    pub bind_addr: SocketAddr,
    /// Directory served under /static
    pub static_dir: PathBuf,
}

impl Config {
    /// Read settings from the process environment, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys use defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let bind = get(BIND_ADDR_VAR, DEFAULT_BIND_ADDR);
        let bind_addr = bind
            .parse()
            .with_context(|| format!("Invalid {} value: {}", BIND_ADDR_VAR, bind))?;

        Ok(Self {
            csv_path: PathBuf::from(get(CSV_PATH_VAR, DEFAULT_CSV_PATH)),
            bind_addr,
            static_dir: PathBuf::from(get(STATIC_DIR_VAR, DEFAULT_STATIC_DIR)),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from(DEFAULT_CSV_PATH),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8050)),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}
