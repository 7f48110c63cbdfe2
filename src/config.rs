//! Startup configuration for the overlay window and indicators
//!
//! The file is only ever read. Axis assignments made in binding mode live for
//! the process lifetime and are never written back.

use crate::mapping::InversionFlags;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const CONFIG_ENV: &str = "CONTROLLER_OVERLAY_CONFIG";
const CONFIG_DIR: &str = "controller-overlay";
const CONFIG_FILE: &str = "overlay.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct OverlayConfig {
    pub window_width: u32,
    pub window_height: u32,
    pub window_x: i32,
    pub window_y: i32,

    /// Background removed by the downstream chroma key
    pub chroma_color: (u8, u8, u8),

    /// Crosshair span in pixels; the indicator radius is half of it
    pub stick_size: u32,
    pub frame_rate: u32,
    pub keep_on_top_interval_ms: u64,
    pub invert: InversionFlags,

    /// Draws the left stick on the right-hand side and vice versa
    pub mirror_sticks: bool,
    pub throttle_bar: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            window_width: 600,
            window_height: 500,
            window_x: 50,
            window_y: 50,
            chroma_color: (0, 255, 0),
            stick_size: 180,
            frame_rate: 60,
            keep_on_top_interval_ms: 1000,
            invert: InversionFlags::default(),
            mirror_sticks: true,
            throttle_bar: true,
        }
    }
}

impl OverlayConfig {
    /// `$CONTROLLER_OVERLAY_CONFIG`, else `<config dir>/controller-overlay/overlay.toml`
    pub fn default_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return PathBuf::from(path);
        }
        let mut path = dirs::config_dir().unwrap_or_else(|| {
            warn!("Could not determine config directory, using current directory");
            PathBuf::from(".")
        });
        path.push(CONFIG_DIR);
        path.push(CONFIG_FILE);
        path
    }

    pub async fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config.sanitized())
    }

    /// Loads the config, falling back to defaults on any problem
    pub async fn load_or_default(path: &Path) -> Self {
        match tokio::fs::try_exists(path).await {
            Ok(true) => {}
            Ok(false) => {
                warn!("Config file {} does not exist, using defaults", path.display());
                return Self::default();
            }
            Err(e) => {
                warn!("Failed to check config file {}: {}", path.display(), e);
                return Self::default();
            }
        }

        match Self::from_file(path).await {
            Ok(config) => {
                info!("Loaded overlay config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    pub fn stick_radius(&self) -> f32 {
        self.stick_size as f32 / 2.0
    }

    pub fn frame_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / self.frame_rate as f64)
    }

    // Zero values would stall pacing or collapse the canvas
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.frame_rate == 0 {
            warn!("frame_rate must be positive, using {}", defaults.frame_rate);
            self.frame_rate = defaults.frame_rate;
        }
        if self.keep_on_top_interval_ms == 0 {
            self.keep_on_top_interval_ms = defaults.keep_on_top_interval_ms;
        }
        if self.window_width == 0 || self.window_height == 0 {
            warn!("Window size must be positive, using defaults");
            self.window_width = defaults.window_width;
            self.window_height = defaults.window_height;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = OverlayConfig::load_or_default(&dir.path().join("nope.toml")).await;
        assert_eq!(config, OverlayConfig::default());
    }

    #[tokio::test]
    async fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "stick_size = 120\nchroma_color = [255, 0, 255]\n\n[invert]\nleft_y = false"
        )
        .unwrap();

        let config = OverlayConfig::from_file(file.path()).await.unwrap();
        assert_eq!(config.stick_size, 120);
        assert_eq!(config.stick_radius(), 60.0);
        assert_eq!(config.chroma_color, (255, 0, 255));
        assert!(!config.invert.left_y);
        assert!(config.invert.right_y);
        assert_eq!(config.window_width, 600);
        assert_eq!(config.frame_rate, 60);
    }

    #[tokio::test]
    async fn malformed_file_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "stick_size = \"huge\"").unwrap();

        assert!(matches!(
            OverlayConfig::from_file(file.path()).await,
            Err(ConfigError::Parse { .. })
        ));
        let config = OverlayConfig::load_or_default(file.path()).await;
        assert_eq!(config, OverlayConfig::default());
    }

    #[tokio::test]
    async fn zero_frame_rate_is_replaced() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "frame_rate = 0\nkeep_on_top_interval_ms = 0").unwrap();

        let config = OverlayConfig::from_file(file.path()).await.unwrap();
        assert_eq!(config.frame_rate, 60);
        assert_eq!(config.keep_on_top_interval_ms, 1000);
    }
}
