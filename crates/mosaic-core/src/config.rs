//! Render and interaction settings.
//!
//! The values mirror the host's controls. They are read on every tick, so
//! the host can replace the whole struct at any time.

use serde::{Deserialize, Serialize};

use crate::geometry::parse_ratio;

/// Grid size used when the host supplies zero or an unparseable value.
pub const DEFAULT_GRID: u32 = 16;

/// Smallest allowed number of columns or rows.
pub const MIN_GRID: u32 = 2;

/// How the sampled region is placed into the mosaic grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AspectMode {
    /// Letterbox the region inside the grid, leaving background bands.
    #[default]
    Fit,
    /// Crop the region to the target ratio and stretch it over the grid.
    Fill,
}

impl AspectMode {
    /// Parse a mode name. Only `"fit"` selects `Fit`; anything else is `Fill`.
    pub fn from_name(name: &str) -> Self {
        if name == "fit" {
            Self::Fit
        } else {
            Self::Fill
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fit => "fit",
            Self::Fill => "fill",
        }
    }
}

impl From<String> for AspectMode {
    fn from(value: String) -> Self {
        Self::from_name(&value)
    }
}

impl From<AspectMode> for String {
    fn from(mode: AspectMode) -> Self {
        mode.as_str().to_string()
    }
}

/// Mosaic resolution in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub cols: u32,
    pub rows: u32,
}

impl Grid {
    /// Build a grid, flooring both sides at [`MIN_GRID`].
    pub fn new(cols: u32, rows: u32) -> Self {
        Self {
            cols: cols.max(MIN_GRID),
            rows: rows.max(MIN_GRID),
        }
    }

    /// Build a grid from raw control values: zero means [`DEFAULT_GRID`].
    pub fn from_raw(cols: u32, rows: u32) -> Self {
        let or_default = |v: u32| if v == 0 { DEFAULT_GRID } else { v };
        Self::new(or_default(cols), or_default(rows))
    }

    /// Parse a `"COLSxROWS"` preset such as `"32x18"`.
    pub fn parse_preset(text: &str) -> Option<Self> {
        let (cols, rows) = text.trim().split_once(['x', 'X'])?;
        let cols = cols.trim().parse::<u32>().ok()?;
        let rows = rows.trim().parse::<u32>().ok()?;
        Some(Self::from_raw(cols, rows))
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(DEFAULT_GRID, DEFAULT_GRID)
    }
}

/// Settings consumed by the session on every tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MosaicConfig {
    /// Mosaic columns (0 = default, values below 2 are raised to 2).
    pub matrix_cols: u32,
    /// Mosaic rows (0 = default, values below 2 are raised to 2).
    pub matrix_rows: u32,
    /// Output ratio as `"W:H"`, or `"original"` for the source ratio.
    pub target_ratio: String,
    /// Fit or fill placement into the grid.
    pub aspect_mode: AspectMode,
    /// Whether the manual crop selection is used and editable.
    pub crop_enabled: bool,
    /// Whether drawn and resized selections keep the output ratio.
    pub aspect_lock_enabled: bool,
    /// Whether cell separator lines are drawn over the mosaic.
    pub show_grid: bool,
    /// Whether rendering pauses while the source is playing.
    pub freeze_frame: bool,
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            matrix_cols: DEFAULT_GRID,
            matrix_rows: DEFAULT_GRID,
            target_ratio: "original".to_string(),
            aspect_mode: AspectMode::Fit,
            crop_enabled: true,
            aspect_lock_enabled: false,
            show_grid: false,
            freeze_frame: false,
        }
    }
}

impl MosaicConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Effective grid after defaulting and flooring.
    pub fn grid(&self) -> Grid {
        Grid::from_raw(self.matrix_cols, self.matrix_rows)
    }

    /// Parsed output ratio, `None` for the source ratio.
    pub fn target_aspect(&self) -> Option<f64> {
        parse_ratio(&self.target_ratio)
    }

    /// Apply a `"COLSxROWS"` preset. Empty or malformed presets are ignored.
    ///
    /// Returns whether the grid changed.
    pub fn apply_preset(&mut self, preset: &str) -> bool {
        let Some(grid) = Grid::parse_preset(preset) else {
            return false;
        };
        let changed = grid != self.grid();
        self.matrix_cols = grid.cols;
        self.matrix_rows = grid.rows;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_mode_parsing() {
        assert_eq!(AspectMode::from_name("fit"), AspectMode::Fit);
        assert_eq!(AspectMode::from_name("fill"), AspectMode::Fill);
        assert_eq!(AspectMode::from_name("stretch"), AspectMode::Fill);
        assert_eq!(AspectMode::from_name("FIT"), AspectMode::Fill);
    }

    #[test]
    fn test_grid_floors_and_defaults() {
        assert_eq!(Grid::from_raw(0, 0), Grid::new(16, 16));
        assert_eq!(Grid::from_raw(1, 40), Grid { cols: 2, rows: 40 });
        assert_eq!(Grid::new(0, 1), Grid { cols: 2, rows: 2 });
    }

    #[test]
    fn test_grid_presets() {
        assert_eq!(Grid::parse_preset("32x18"), Some(Grid::new(32, 18)));
        assert_eq!(Grid::parse_preset(" 8 X 8 "), Some(Grid::new(8, 8)));
        assert_eq!(Grid::parse_preset(""), None);
        assert_eq!(Grid::parse_preset("32"), None);
        assert_eq!(Grid::parse_preset("ax4"), None);
    }

    #[test]
    fn test_config_defaults() {
        let config = MosaicConfig::new();
        assert_eq!(config.grid(), Grid::new(16, 16));
        assert_eq!(config.target_aspect(), None);
        assert!(config.crop_enabled);
        assert!(!config.freeze_frame);
    }

    #[test]
    fn test_config_apply_preset() {
        let mut config = MosaicConfig::new();
        assert!(config.apply_preset("64x36"));
        assert_eq!(config.grid(), Grid::new(64, 36));
        assert!(!config.apply_preset("64x36"));
        assert!(!config.apply_preset("bogus"));
        assert_eq!(config.grid(), Grid::new(64, 36));
    }

    #[test]
    fn test_config_target_aspect() {
        let mut config = MosaicConfig::new();
        config.target_ratio = "4:3".to_string();
        assert_eq!(config.target_aspect(), Some(4.0 / 3.0));
        config.target_ratio = "nonsense".to_string();
        assert_eq!(config.target_aspect(), None);
    }

    #[test]
    fn test_aspect_mode_string_round_trip() {
        let name: String = AspectMode::Fill.into();
        assert_eq!(name, "fill");
        assert_eq!(AspectMode::from(name), AspectMode::Fill);
    }
}
