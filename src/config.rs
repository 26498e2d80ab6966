use crate::geometry::RegionLayout;
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(default = "default_column_count")]
    pub column_count: usize,
    #[serde(default = "default_grid_region_size")]
    pub grid_region_size: usize,
    #[serde(default = "default_tray_size")]
    pub tray_size: usize,
    #[serde(default = "default_animation_duration_ms")]
    pub animation_duration_ms: u64,
    #[serde(default = "default_tray_bottom_margin")]
    pub tray_bottom_margin: f32,
    #[serde(default = "default_long_press_ms")]
    pub long_press_ms: u64,
    #[serde(default = "default_press_move_tolerance")]
    pub press_move_tolerance: f32,
    #[serde(default)]
    pub last_size: Option<(f32, f32)>,
}

fn default_column_count() -> usize {
    4
}

fn default_grid_region_size() -> usize {
    10
}

fn default_tray_size() -> usize {
    4
}

fn default_animation_duration_ms() -> u64 {
    150
}

fn default_tray_bottom_margin() -> f32 {
    48.0
}

fn default_long_press_ms() -> u64 {
    260
}

fn default_press_move_tolerance() -> f32 {
    18.0
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            column_count: default_column_count(),
            grid_region_size: default_grid_region_size(),
            tray_size: default_tray_size(),
            animation_duration_ms: default_animation_duration_ms(),
            tray_bottom_margin: default_tray_bottom_margin(),
            long_press_ms: default_long_press_ms(),
            press_move_tolerance: default_press_move_tolerance(),
            last_size: None,
        }
    }
}

impl BoardConfig {
    pub fn config_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "springboard", "springboard")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads the user config, falling back to defaults when it is missing or
    /// unreadable.
    pub fn load() -> Self {
        let Some(dir) = Self::config_dir() else {
            return Self::default();
        };
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                warn!("{err}; using default config");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: BoardConfig =
            serde_json::from_reader(file).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(config.sanitized())
    }

    pub fn save(&self) {
        let Some(dir) = Self::config_dir() else {
            return;
        };
        if let Err(err) = self.save_to(&dir.join(CONFIG_FILE)) {
            warn!("{err}");
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source: std::io::Error| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let file = std::fs::File::create(path).map_err(io_err)?;
        serde_json::to_writer_pretty(file, self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn sanitized(mut self) -> Self {
        self.column_count = self.column_count.max(1);
        if !self.tray_bottom_margin.is_finite() || self.tray_bottom_margin < 0.0 {
            self.tray_bottom_margin = default_tray_bottom_margin();
        }
        if !self.press_move_tolerance.is_finite() || self.press_move_tolerance < 0.0 {
            self.press_move_tolerance = default_press_move_tolerance();
        }
        self
    }

    pub fn capacity(&self) -> usize {
        self.grid_region_size + self.tray_size
    }

    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    pub fn long_press(&self) -> Duration {
        Duration::from_millis(self.long_press_ms)
    }

    pub fn layout_for(
        &self,
        container_width: f32,
        container_height: f32,
        grid_count: usize,
        tray_count: usize,
    ) -> RegionLayout {
        RegionLayout::new(
            container_width,
            container_height,
            self.column_count,
            grid_count,
            tray_count,
            self.tray_bottom_margin,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_config_path(tag: &str) -> PathBuf {
        let uniq = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time error")
            .as_nanos();
        std::env::temp_dir()
            .join(format!("springboard_config_{tag}_{uniq}"))
            .join(CONFIG_FILE)
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config: BoardConfig =
            serde_json::from_str(r#"{ "column_count": 5 }"#).expect("parse");
        assert_eq!(config.column_count, 5);
        assert_eq!(config.grid_region_size, 10);
        assert_eq!(config.tray_size, 4);
        assert_eq!(config.animation_duration(), Duration::from_millis(150));
        assert_eq!(config.tray_bottom_margin, 48.0);
        assert_eq!(config.last_size, None);
    }

    #[test]
    fn save_then_load_keeps_values() {
        let path = temp_config_path("roundtrip");
        let config = BoardConfig {
            column_count: 3,
            animation_duration_ms: 90,
            last_size: Some((420.0, 760.0)),
            ..BoardConfig::default()
        };
        config.save_to(&path).expect("save");
        let loaded = BoardConfig::load_from(&path).expect("load");
        assert_eq!(loaded, config);

        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn zero_columns_are_clamped_on_load() {
        let path = temp_config_path("clamp");
        std::fs::create_dir_all(path.parent().expect("parent")).expect("create dir");
        std::fs::write(&path, r#"{ "column_count": 0 }"#).expect("write");
        let loaded = BoardConfig::load_from(&path).expect("load");
        assert_eq!(loaded.column_count, 1);

        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn malformed_file_reports_parse_error() {
        let path = temp_config_path("bad");
        std::fs::create_dir_all(path.parent().expect("parent")).expect("create dir");
        std::fs::write(&path, "not json").expect("write");
        let err = BoardConfig::load_from(&path).expect_err("should fail");
        assert!(matches!(err, ConfigError::Parse { .. }));

        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn layout_uses_configured_columns() {
        let config = BoardConfig::default();
        let layout = config.layout_for(480.0, 800.0, 10, 4);
        assert_eq!(layout.cell_size, 120.0);
        assert_eq!(layout.position_of(10).y, 800.0 - 120.0 - 48.0);
    }
}
