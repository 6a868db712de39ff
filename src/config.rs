// src/config.rs
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path, path::PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config/podium.toml";

pub const ENV_CONFIG_PATH: &str = "PODIUM_CONFIG_PATH";
pub const ENV_JOLPICA_BASE_URL: &str = "JOLPICA_BASE_URL";
pub const ENV_JOLPICA_TIMEOUT_SECS: &str = "JOLPICA_TIMEOUT_SECS";
pub const ENV_UI_DIR: &str = "PODIUM_UI_DIR";

fn default_base_url() -> String {
    "http://api.jolpi.ca".to_string()
}
fn default_request_timeout_secs() -> u64 {
    10
}
fn default_connect_timeout_secs() -> u64 {
    4
}
fn default_page_limit() -> u32 {
    100
}
fn default_user_agent() -> String {
    format!("podium-predictor/{}", env!("CARGO_PKG_VERSION"))
}
fn default_ui_dir() -> String {
    "ui".to_string()
}

/// Service configuration. Every field has a default, so an empty file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictorConfig {
    /// Host of the Ergast-compatible API; `/ergast/f1` is appended per request.
    #[serde(default = "default_base_url")]
    pub jolpica_base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// `limit` query parameter sent with every upstream call.
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Directory with the static race picker UI.
    #[serde(default = "default_ui_dir")]
    pub ui_dir: String,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            jolpica_base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            page_limit: default_page_limit(),
            user_agent: default_user_agent(),
            ui_dir: default_ui_dir(),
        }
    }
}

impl PredictorConfig {
    /// Load from an explicit TOML file, then apply env overrides.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        let mut cfg: PredictorConfig = toml::from_str(&data)
            .with_context(|| format!("parsing config {}", path.display()))?;
        cfg.apply_env_overrides();
        cfg.sanitize();
        Ok(cfg)
    }

    /// Load using env var + fallbacks:
    /// 1) $PODIUM_CONFIG_PATH
    /// 2) config/podium.toml
    /// 3) built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
            return Self::load_from_file(&pb);
        }
        let default_path = PathBuf::from(DEFAULT_CONFIG_PATH);
        if default_path.exists() {
            return Self::load_from_file(&default_path);
        }
        let mut cfg = Self::default();
        cfg.apply_env_overrides();
        cfg.sanitize();
        Ok(cfg)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = env::var(ENV_JOLPICA_BASE_URL) {
            if !url.trim().is_empty() {
                self.jolpica_base_url = url.trim().to_string();
            }
        }
        if let Some(secs) = env::var(ENV_JOLPICA_TIMEOUT_SECS)
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
        {
            self.request_timeout_secs = secs;
        }
        if let Ok(dir) = env::var(ENV_UI_DIR) {
            if !dir.trim().is_empty() {
                self.ui_dir = dir.trim().to_string();
            }
        }
    }

    fn sanitize(&mut self) {
        while self.jolpica_base_url.ends_with('/') {
            self.jolpica_base_url.pop();
        }
        if self.request_timeout_secs == 0 {
            self.request_timeout_secs = default_request_timeout_secs();
        }
        if self.connect_timeout_secs == 0 {
            self.connect_timeout_secs = default_connect_timeout_secs();
        }
        self.page_limit = self.page_limit.clamp(1, 1000);
    }
}
