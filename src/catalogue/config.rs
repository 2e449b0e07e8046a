//! # Configuration
//!
//! Settings live in `config.json` inside the config directory. The CLI uses
//! `./.catalogue` when that directory exists and the per-user data directory otherwise.
//! A missing file means defaults.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `metadata-path` | unset | Metadata CSV used when `--metadata` is not given |
//! | `data-path` | unset | Data CSV used when `--data` is not given |
//! | `doi-base-url` | `https://doi.org/` | Prefix for DOI links |
//! | `cell-width` | `40` | Maximum width of a table cell (at least 4) |
//! | `default-sort` | unset | Column to sort `list` by when `--sort` is not given |

use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
pub const DEFAULT_DOI_BASE_URL: &str = "https://doi.org/";
pub const DEFAULT_CELL_WIDTH: usize = 40;
pub const MIN_CELL_WIDTH: usize = 4;

/// Every key understood by [`CatalogConfig::get`] and [`CatalogConfig::set`].
pub const CONFIG_KEYS: [&str; 5] = [
    "metadata-path",
    "data-path",
    "doi-base-url",
    "cell-width",
    "default-sort",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_path: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_path: Option<PathBuf>,

    #[serde(default = "default_doi_base_url")]
    pub doi_base_url: String,

    #[serde(default = "default_cell_width")]
    pub cell_width: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_sort: Option<String>,
}

fn default_doi_base_url() -> String {
    DEFAULT_DOI_BASE_URL.to_string()
}

fn default_cell_width() -> usize {
    DEFAULT_CELL_WIDTH
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            metadata_path: None,
            data_path: None,
            doi_base_url: default_doi_base_url(),
            cell_width: DEFAULT_CELL_WIDTH,
            default_sort: None,
        }
    }
}

impl CatalogConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: CatalogConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    /// Cell width, never below the minimum.
    pub fn cell_width(&self) -> usize {
        self.cell_width.max(MIN_CELL_WIDTH)
    }

    /// Display value of a key. Unset optional keys read as an empty string.
    pub fn get(&self, key: &str) -> Option<String> {
        let path = |p: &Option<PathBuf>| {
            p.as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        };
        match key {
            "metadata-path" => Some(path(&self.metadata_path)),
            "data-path" => Some(path(&self.data_path)),
            "doi-base-url" => Some(self.doi_base_url.clone()),
            "cell-width" => Some(self.cell_width.to_string()),
            "default-sort" => Some(self.default_sort.clone().unwrap_or_default()),
            _ => None,
        }
    }

    /// Sets a key from its string form. An empty value unsets optional keys and restores
    /// the default of the others.
    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        let value = value.trim();
        let optional = |v: &str| (!v.is_empty()).then(|| v.to_string());
        match key {
            "metadata-path" => self.metadata_path = optional(value).map(PathBuf::from),
            "data-path" => self.data_path = optional(value).map(PathBuf::from),
            "doi-base-url" => {
                self.doi_base_url = optional(value).unwrap_or_else(default_doi_base_url)
            }
            "cell-width" => {
                self.cell_width = if value.is_empty() {
                    DEFAULT_CELL_WIDTH
                } else {
                    let width: usize = value
                        .parse()
                        .map_err(|_| format!("cell-width must be a number, got '{}'", value))?;
                    if width < MIN_CELL_WIDTH {
                        return Err(format!("cell-width must be at least {}", MIN_CELL_WIDTH));
                    }
                    width
                }
            }
            "default-sort" => self.default_sort = optional(value),
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }
}

/// Resolves the config directory: `./.catalogue` when present, else the user data
/// directory.
pub fn config_dir(cwd: &Path) -> Result<PathBuf> {
    let local = cwd.join(".catalogue");
    if local.is_dir() {
        return Ok(local);
    }
    directories::ProjectDirs::from("com", "catalogue", "catalogue")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| CatalogError::Config("Could not determine config dir".to_string()))
}
