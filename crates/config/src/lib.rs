//! Game configuration - TOML file support
//!
//! The game reads a TOML file (default `config.toml`) describing the tile
//! catalog, the board size, the generation seed and, optionally, the address
//! of the read-only network view.
//!
//! # Loading Rules
//!
//! - Missing or unreadable file: the defaults are used and written to the path
//!   so the player has a file to edit. A failed write is only a warning.
//! - Unparsable file: the defaults are used and the parse error is a warning.
//! - The game never refuses to start because of its configuration file.
//!
//! # Environment Variables
//!
//! - `REVEAL_VIEW_ADDR`: overrides `addr`
//! - `REVEAL_VIEW_DISABLED`: set to "1" or "true" to disable the network view
//!
//! # Example Configuration
//!
//! ```toml
//! seed = 0
//! width = 20
//! height = 20
//! addr = "127.0.0.1:8080"
//!
//! [[tile_types]]
//! glyph = "*"
//! color = "#ffff00"
//! points = 1
//!
//! [[tile_types]]
//! glyph = "X"
//! color = "#88ff00"
//! points = 2
//! ```

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use tui_reveal_types::{TileCatalog, TileType, DEFAULT_HEIGHT, DEFAULT_TILE_POINTS, DEFAULT_WIDTH};

pub use tui_reveal_types as types;

/// Default configuration file name
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Overrides the view address
pub const ENV_VIEW_ADDR: &str = "REVEAL_VIEW_ADDR";

/// Disables the view entirely
pub const ENV_VIEW_DISABLED: &str = "REVEAL_VIEW_DISABLED";

/// Errors that can occur when loading or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("failed to read config file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write config file
    #[error("failed to write config file at {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse TOML config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("failed to serialize TOML config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Invalid configuration value
    #[error("invalid configuration: {0}")]
    Validation(String),
}

/// One `[[tile_types]]` entry
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileTypeToml {
    /// Single display character
    pub glyph: String,
    /// Display color, `#rrggbb`
    pub color: String,
    /// Points awarded on first hit
    #[serde(default = "default_points")]
    pub points: u32,
}

fn default_points() -> u32 {
    DEFAULT_TILE_POINTS
}

/// Complete game configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub seed: u32,
    pub width: u16,
    pub height: u16,
    /// Address of the network view; `None` keeps it off
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addr: Option<String>,
    pub tile_types: Vec<TileTypeToml>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: 0,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            addr: None,
            tile_types: vec![
                TileTypeToml {
                    glyph: "*".to_string(),
                    color: "#ffff00".to_string(),
                    points: 1,
                },
                TileTypeToml {
                    glyph: "X".to_string(),
                    color: "#88ff00".to_string(),
                    points: 2,
                },
                TileTypeToml {
                    glyph: "O".to_string(),
                    color: "#0088ff".to_string(),
                    points: 3,
                },
            ],
        }
    }
}

/// Outcome of [`read_config`]: always a usable config, plus what went wrong
#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warning: Option<ConfigError>,
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load and parse a file, failing on any error
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Write this configuration to `path`
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let text = self.to_toml_string()?;
        std::fs::write(path, text).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "configuration saved");
        Ok(())
    }

    /// Check values the game can not work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Validation(format!(
                "board must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        for (i, tile) in self.tile_types.iter().enumerate() {
            if tile.glyph.chars().count() != 1 {
                return Err(ConfigError::Validation(format!(
                    "tile_types[{}].glyph must be exactly one character, got {:?}",
                    i, tile.glyph
                )));
            }
        }
        if self.tile_types.len() > u16::MAX as usize {
            return Err(ConfigError::Validation(format!(
                "at most {} tile types are supported",
                u16::MAX
            )));
        }
        // A blank address means the view is off, same as no address.
        self.view_addr()?;
        Ok(())
    }

    fn parse_addr(&self, addr: &str) -> Result<SocketAddr, ConfigError> {
        addr.parse()
            .map_err(|_| ConfigError::Validation(format!("invalid view address {:?}", addr)))
    }

    /// Socket address of the network view, if enabled and valid
    pub fn view_addr(&self) -> Result<Option<SocketAddr>, ConfigError> {
        self.addr
            .as_deref()
            .filter(|a| !a.trim().is_empty())
            .map(|a| self.parse_addr(a.trim()))
            .transpose()
    }

    /// Build the tile catalog; call [`Config::validate`] first.
    pub fn catalog(&self) -> TileCatalog {
        TileCatalog::new(
            self.tile_types
                .iter()
                .filter_map(|t| {
                    t.glyph
                        .chars()
                        .next()
                        .map(|glyph| TileType::new(glyph, t.color.clone(), t.points))
                })
                .collect(),
        )
    }

    /// Apply `REVEAL_VIEW_*` environment overrides
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary lookup (testable without touching the process env)
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(addr) = lookup(ENV_VIEW_ADDR) {
            let addr = addr.trim().to_string();
            if !addr.is_empty() {
                self.addr = Some(addr);
            }
        }
        let disabled = lookup(ENV_VIEW_DISABLED)
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        if disabled {
            self.addr = None;
        }
    }
}

/// Read the configuration at `path`, falling back to the defaults.
///
/// When the file can not be read, the defaults are written to `path`; a write
/// failure is returned as the warning. A file that exists but does not parse
/// or validate is left alone.
pub fn read_config(path: &Path) -> ConfigLoad {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            tracing::info!(path = %path.display(), error = %err, "config not readable, using defaults");
            let config = Config::default();
            let warning = config.save(path).err();
            return ConfigLoad { config, warning };
        }
    };

    match Config::from_toml_str(&text).and_then(|c| c.validate().map(|()| c)) {
        Ok(config) => ConfigLoad {
            config,
            warning: None,
        },
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "invalid config, using defaults");
            ConfigLoad {
                config: Config::default(),
                warning: Some(err),
            }
        }
    }
}
