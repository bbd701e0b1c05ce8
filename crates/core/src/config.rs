//! Engine configuration
//!
//! Built from defaults, environment variables or JSON. Environment values that
//! fail to parse fall back to the defaults.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::pieces::{CatalogPreset, Piece, PieceCatalog};
use crate::types::{DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DESCENT_INTERVAL_MS, MAX_BOARD_SIDE};

/// Who supplies the periodic "down" ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriveMode {
    /// A GUI or AI controller issues every action, including gravity
    #[default]
    External,
    /// A background driver moves the piece down on a fixed interval
    Autonomous,
}

impl DriveMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "external" => Some(DriveMode::External),
            "autonomous" | "auto" => Some(DriveMode::Autonomous),
            _ => None,
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub board_width: usize,
    pub board_height: usize,
    pub catalog: CatalogPreset,
    /// Custom templates; replace `catalog` when non-empty
    pub templates: Vec<Piece>,
    /// Seed for a reproducible piece sequence
    pub seed: Option<u64>,
    pub mode: DriveMode,
    pub descent_interval_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            board_width: DEFAULT_BOARD_WIDTH,
            board_height: DEFAULT_BOARD_HEIGHT,
            catalog: CatalogPreset::SquareOnly,
            templates: Vec::new(),
            seed: None,
            mode: DriveMode::External,
            descent_interval_ms: DESCENT_INTERVAL_MS,
        }
    }
}

impl EngineConfig {
    /// Create from environment variables
    ///
    /// - `TETRIS_BOARD_WIDTH`, `TETRIS_BOARD_HEIGHT`: board size
    /// - `TETRIS_CATALOG`: `square` or `classic`
    /// - `TETRIS_SEED`: piece sequence seed
    /// - `TETRIS_MODE`: `external` or `autonomous`
    /// - `TETRIS_DESCENT_MS`: autonomous descent interval
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`EngineConfig::from_env`] with a custom variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let parsed = |key: &str| lookup(key).map(|s| s.trim().to_string());

        let board_width = parsed("TETRIS_BOARD_WIDTH")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.board_width);
        let board_height = parsed("TETRIS_BOARD_HEIGHT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.board_height);
        let catalog = parsed("TETRIS_CATALOG")
            .and_then(|s| CatalogPreset::from_str(&s))
            .unwrap_or(defaults.catalog);
        let seed = parsed("TETRIS_SEED").and_then(|s| s.parse().ok());
        let mode = parsed("TETRIS_MODE")
            .and_then(|s| DriveMode::from_str(&s))
            .unwrap_or(defaults.mode);
        let descent_interval_ms = parsed("TETRIS_DESCENT_MS")
            .and_then(|s| s.parse().ok())
            .filter(|&ms| ms > 0)
            .unwrap_or(defaults.descent_interval_ms);

        Self {
            board_width,
            board_height,
            catalog,
            templates: Vec::new(),
            seed,
            mode,
            descent_interval_ms,
        }
    }

    /// Parse from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| EngineError::Configuration(format!("invalid config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Catalog selected by this configuration
    pub fn piece_catalog(&self) -> Result<PieceCatalog> {
        if self.templates.is_empty() {
            Ok(self.catalog.catalog())
        } else {
            PieceCatalog::new(self.templates.clone())
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_board_size(self.board_width, self.board_height)?;
        if self.descent_interval_ms == 0 {
            return Err(EngineError::Configuration(
                "descent interval must be positive".to_string(),
            ));
        }
        self.piece_catalog()?
            .validate_for(self.board_width, self.board_height)
    }
}

/// Board sides must lie in `2..=MAX_BOARD_SIDE`
pub(crate) fn check_board_size(width: usize, height: usize) -> Result<()> {
    let side = 2..=MAX_BOARD_SIDE;
    if !side.contains(&width) || !side.contains(&height) {
        return Err(EngineError::Configuration(format!(
            "board sides must be within 2..={}, got {}x{}",
            MAX_BOARD_SIDE, width, height
        )));
    }
    Ok(())
}
