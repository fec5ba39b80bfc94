//! Configuration system
//!
//! TOML and RON configuration files behind one trait, used by demo apps
//! to configure animation playback without recompiling.

pub use serde::{Deserialize, Serialize};

use crate::animation::{AnimationComponent, Interpolation};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Animation playback settings for demo applications
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Accumulator step per tick
    pub tempo: f32,
    /// Key-frame time boundaries `[t0, t1, t2]`
    pub boundaries: [f32; 3],
    /// Rotation interpolation mode (`SLERP` or `LERP`)
    pub interpolation: Interpolation,
    /// Number of frames the demo runs
    pub frames: u32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tempo: 2.0,
            boundaries: [0.0, 100.0, 200.0],
            interpolation: Interpolation::Slerp,
            frames: 120,
        }
    }
}

impl Config for PlaybackConfig {}

impl PlaybackConfig {
    /// Build animation playback state from these settings
    pub fn to_animation(&self) -> AnimationComponent {
        AnimationComponent::new(self.tempo, self.boundaries, self.interpolation)
    }
}
