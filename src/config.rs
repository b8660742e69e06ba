// Configuration management
//
// Handles frontend video settings and their TOML persistence.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::video::FilterMode;

/// Video configuration
///
/// Stores all user-configurable settings for the video frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoConfig {
    /// Surface sampling mode (nearest or linear)
    pub filter_mode: FilterMode,

    /// Window scale factor (1-8)
    pub scale: u32,

    /// Enable VSync
    pub vsync: bool,

    /// Target FPS (usually 60)
    pub fps: u32,
}

impl VideoConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self {
            filter_mode: FilterMode::Nearest,
            scale: 3,
            vsync: true,
            fps: 60,
        }
    }

    /// Load configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the TOML configuration file
    ///
    /// # Returns
    /// Result containing VideoConfig or error message
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let config: VideoConfig = toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config file: {}", e))?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    ///
    /// # Arguments
    /// * `path` - Path where the TOML configuration file will be saved
    ///
    /// # Returns
    /// Result indicating success or error message
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        fs::write(path, toml_string).map_err(|e| format!("Failed to write config file: {}", e))?;

        Ok(())
    }

    /// Try to load configuration from file, or create default if it doesn't exist
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// VideoConfig (either loaded or default)
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load_from_file(&path).unwrap_or_else(|e| {
            eprintln!("Could not load config ({}), using defaults", e);
            let config = Self::new();
            // Try to save default config
            if let Err(e) = config.save_to_file(&path) {
                eprintln!("Warning: Could not save default config: {}", e);
            } else {
                println!("Created default configuration file");
            }
            config
        })
    }
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = VideoConfig::new();
        assert_eq!(config.filter_mode, FilterMode::Nearest);
        assert_eq!(config.scale, 3);
        assert!(config.vsync);
        assert_eq!(config.fps, 60);
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = VideoConfig::new();
        config.filter_mode = FilterMode::Linear;
        config.scale = 2;
        config.vsync = false;

        let toml_string = toml::to_string_pretty(&config).unwrap();
        let parsed: VideoConfig = toml::from_str(&toml_string).unwrap();
        assert_eq!(parsed.filter_mode, FilterMode::Linear);
        assert_eq!(parsed.scale, 2);
        assert!(!parsed.vsync);
        assert_eq!(parsed.fps, 60);
    }
}
