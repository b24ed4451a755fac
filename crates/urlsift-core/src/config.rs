use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::engine::listing::{DEFAULT_PAGE_SIZE, EXPORT_PAGE_SIZE};
use crate::Error;

/// Global configuration loaded from `~/.config/urlsift/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlsiftConfig {
    /// Rows per page when a listing does not ask for a page size.
    pub default_page_size: u32,
    /// Page size used by export-all (a single page covering everything).
    pub export_page_size: u32,
    /// Optional database location; defaults to `~/.local/state/urlsift/links.db`.
    #[serde(default)]
    pub database_path: Option<PathBuf>,
}

impl Default for UrlsiftConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            export_page_size: EXPORT_PAGE_SIZE,
            database_path: None,
        }
    }
}

impl UrlsiftConfig {
    /// Rejects page sizes of zero; everything else is accepted as-is.
    pub fn validate(&self) -> crate::Result<()> {
        if self.default_page_size == 0 {
            return Err(Error::Validation(
                "default_page_size must be at least 1".into(),
            ));
        }
        if self.export_page_size == 0 {
            return Err(Error::Validation(
                "export_page_size must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("urlsift")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<UrlsiftConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = UrlsiftConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: UrlsiftConfig = toml::from_str(&data)?;
    cfg.validate()?;
    Ok(cfg)
}
