use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Element names used by the export producer. Matched case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagNames {
    /// One recorded exchange.
    pub item: String,
    /// Full request URL.
    pub url: String,
    /// Raw request message (headers + body), usually base64.
    pub request: String,
    /// Raw response message (headers + body), usually base64.
    pub response: String,
}

impl Default for TagNames {
    fn default() -> Self {
        Self {
            item: "item".to_string(),
            url: "url".to_string(),
            request: "request".to_string(),
            response: "response".to_string(),
        }
    }
}

/// Global configuration loaded from `~/.config/burpsluice/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SluiceConfig {
    /// Also record object keys of JSON request bodies and JSON responses as parameters.
    pub extract_json_keys: bool,
    /// Tag names of the capture export.
    pub tags: TagNames,
}

impl Default for SluiceConfig {
    fn default() -> Self {
        Self {
            extract_json_keys: true,
            tags: TagNames::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("burpsluice")
        .context("locate XDG config directory")?;
    Ok(xdg_dirs.get_config_file("config.toml"))
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SluiceConfig> {
    load_or_init_at(&config_path()?)
}

/// Load configuration from `path`, writing the defaults there first if it does not exist.
pub fn load_or_init_at(path: &Path) -> Result<SluiceConfig> {
    if !path.exists() {
        let default_cfg = SluiceConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create config dir {}", parent.display()))?;
        }
        fs::write(path, toml).with_context(|| format!("write config {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: SluiceConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
