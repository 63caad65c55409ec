//! Configuration system
//!
//! File-backed configuration (TOML or RON, chosen by extension) and the
//! settings-provider contract the screen builders read their layout inputs
//! from.

pub use serde::{Serialize, Deserialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

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

/// A single setting value as seen by the UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    /// On/off switch
    Bool(bool),
    /// Whole number
    Int(i64),
    /// Free text (difficulty names and similar)
    Text(String),
    /// Display resolution in pixels
    Resolution(u32, u32),
}

impl std::fmt::Display for SettingValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingValue::Bool(true) => write!(f, "On"),
            SettingValue::Bool(false) => write!(f, "Off"),
            SettingValue::Int(value) => write!(f, "{value}"),
            SettingValue::Text(text) => write!(f, "{text}"),
            SettingValue::Resolution(width, height) => write!(f, "{width}x{height}"),
        }
    }
}

/// Read-only view of the game settings used while (re)building interfaces
///
/// Interfaces bake absolute pixel positions into their components, so any
/// change to the resolution or fullscreen flag requires a rebuild.
pub trait SettingsProvider {
    /// Look up a setting by key; unknown keys yield `None`
    fn get_setting(&self, key: &str) -> Option<SettingValue>;

    /// Current display resolution (width, height)
    fn get_resolution(&self) -> (u32, u32);
}
