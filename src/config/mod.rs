//! Application Configuration
//!
//! User settings and preferences stored in TOML format.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// General settings
    pub general: GeneralConfig,
    /// Camera settings
    pub camera: CameraSettings,
    /// Recognition settings
    pub recognition: RecognitionSettings,
    /// Speech output settings
    pub speech: SpeechSettings,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Open the Recognize view instead of Home on startup
    pub start_on_recognize: bool,
    /// Show the signing tips card in the Recognize view
    pub show_tips: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            start_on_recognize: false,
            show_tips: true,
        }
    }
}

/// Camera-related settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraSettings {
    /// Capture device index (0 = first camera)
    pub device_index: u32,
    /// Preferred capture width
    pub width: u32,
    /// Preferred capture height
    pub height: u32,
    /// Preferred capture frame rate
    pub frame_rate: u32,
    /// Mirror the preview horizontally (selfie view)
    pub mirror_preview: bool,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            device_index: 0,
            width: 1280,
            height: 720,
            frame_rate: 30,
            mirror_preview: true,
        }
    }
}

/// Recognition loop settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionSettings {
    /// Milliseconds between recognition ticks
    pub interval_ms: u64,
    /// Minimum confidence (percent) for a candidate to be accepted
    pub accept_threshold: u8,
    /// How long an accepted candidate is displayed before it is appended
    pub accept_display_ms: u64,
    /// How long a rejected candidate is displayed before it is discarded
    pub reject_display_ms: u64,
}

impl Default for RecognitionSettings {
    fn default() -> Self {
        Self {
            interval_ms: 2500,
            accept_threshold: 85,
            accept_display_ms: 1500,
            reject_display_ms: 800,
        }
    }
}

/// Speech output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechSettings {
    /// Speaking rate relative to the platform's normal rate
    pub rate_scale: f32,
    /// Pitch relative to the platform's normal pitch
    pub pitch_scale: f32,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            rate_scale: 0.9,
            pitch_scale: 1.0,
        }
    }
}

/// Get the configuration directory, creating it if needed
pub fn get_config_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "silenttalk", "SilentTalk")
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    let config_dir = proj_dirs.config_dir().to_path_buf();
    std::fs::create_dir_all(&config_dir)?;

    Ok(config_dir)
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Save configuration to file
pub fn save_config(config: &AppConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_app_config() {
        let config = AppConfig::default();

        // Check general defaults
        assert!(!config.general.start_on_recognize);
        assert!(config.general.show_tips);

        // Check camera defaults
        assert_eq!(config.camera.device_index, 0);
        assert_eq!(config.camera.width, 1280);
        assert_eq!(config.camera.height, 720);
        assert_eq!(config.camera.frame_rate, 30);
        assert!(config.camera.mirror_preview);

        // Check recognition defaults
        assert_eq!(config.recognition.interval_ms, 2500);
        assert_eq!(config.recognition.accept_threshold, 85);
        assert_eq!(config.recognition.accept_display_ms, 1500);
        assert_eq!(config.recognition.reject_display_ms, 800);

        // Check speech defaults
        assert!((config.speech.rate_scale - 0.9).abs() < 0.01);
        assert!((config.speech.pitch_scale - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = AppConfig::default();

        // Serialize to TOML
        let toml_str = toml::to_string_pretty(&config).unwrap();

        // Deserialize back
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();

        // Verify values match
        assert_eq!(config.general.show_tips, parsed.general.show_tips);
        assert_eq!(config.camera.width, parsed.camera.width);
        assert_eq!(config.recognition.interval_ms, parsed.recognition.interval_ms);
        assert_eq!(config.recognition.accept_threshold, parsed.recognition.accept_threshold);
    }

    #[test]
    fn test_config_with_custom_values() {
        let mut config = AppConfig::default();
        config.camera.device_index = 2;
        config.recognition.interval_ms = 1000;
        config.speech.rate_scale = 1.2;

        // Serialize and deserialize
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(parsed.camera.device_index, 2);
        assert_eq!(parsed.recognition.interval_ms, 1000);
        assert!((parsed.speech.rate_scale - 1.2).abs() < 0.01);
    }

    #[test]
    fn test_save_and_load_config() {
        let config = AppConfig::default();

        // Create a temporary file
        let temp_file = NamedTempFile::new().unwrap();

        // Save config
        save_config(&config, temp_file.path()).unwrap();

        // Load config
        let loaded = load_config(temp_file.path()).unwrap();

        // Verify
        assert_eq!(config.camera.width, loaded.camera.width);
        assert_eq!(config.recognition.accept_threshold, loaded.recognition.accept_threshold);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/path/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "this is not valid toml {{{{").unwrap();

        let result = load_config(temp_file.path());
        assert!(result.is_err());
    }
}
