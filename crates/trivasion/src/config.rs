//! Game settings
//!
//! Persisted as TOML (or RON) through [`Config`]. Missing keys fall back to
//! defaults, and [`GameSettings::load_or_create`] writes the merged file back
//! so the on-disk copy is always complete.

use std::path::Path;

use game_ui::config::{Config, ConfigError, SettingValue, SettingsProvider};
use serde::{Deserialize, Serialize};

/// Wave counts offered in the options menu
pub const WAVE_OPTIONS: [u32; 4] = [5, 10, 15, 20];
/// Volume steps offered in the options menu
pub const VOLUME_OPTIONS: [u32; 11] = [0, 10, 20, 30, 40, 50, 60, 70, 80, 90, 100];
/// Display resolutions offered in the options menu
pub const RESOLUTION_OPTIONS: [(u32, u32); 4] = [(800, 600), (1280, 720), (1600, 900), (1920, 1080)];
/// Frame rate caps offered in the options menu
pub const FPS_OPTIONS: [u32; 4] = [30, 60, 120, 144];

/// Option rows shown in the menu: display label and settings key
pub const OPTION_ROWS: [(&str, &str); 6] = [
    ("Waves", "waves"),
    ("Difficulty", "difficulty"),
    ("Volume", "volume"),
    ("Fullscreen", "fullscreen"),
    ("Resolution", "resolution"),
    ("Fps", "fps"),
];

/// Game difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    /// Forgiving
    Easy,
    /// Standard
    #[default]
    Normal,
    /// Punishing
    Hard,
}

impl Difficulty {
    /// Every difficulty, in menu order
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        };
        write!(f, "{name}")
    }
}

/// Persistent game settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Waves per level
    pub waves: u32,
    /// Difficulty
    pub difficulty: Difficulty,
    /// Master volume in percent
    pub volume: u32,
    /// Fullscreen display
    pub fullscreen: bool,
    /// Display resolution (width, height)
    pub resolution: (u32, u32),
    /// Frame rate cap
    pub fps: u32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            waves: 10,
            difficulty: Difficulty::Normal,
            volume: 50,
            fullscreen: false,
            resolution: (800, 600),
            fps: 60,
        }
    }
}

impl Config for GameSettings {}

impl GameSettings {
    /// Load settings, creating the file from defaults when absent
    ///
    /// Keys missing from an existing TOML or RON file are filled from
    /// defaults and the completed file is written back.
    pub fn load_or_create(path: &str) -> Result<Self, ConfigError> {
        if !Path::new(path).exists() {
            log::info!("No settings at {}, writing defaults", path);
            let settings = Self::default();
            settings.save_to_file(path)?;
            return Ok(settings);
        }

        let settings = Self::load_from_file(path)?;
        let missing = Self::missing_keys(path)?;
        if !missing.is_empty() {
            log::warn!("Settings file {} was missing {:?}; filling from defaults", path, missing);
            settings.save_to_file(path)?;
        }
        Ok(settings)
    }

    fn missing_keys(path: &str) -> Result<Vec<&'static str>, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let present: Vec<String> = if path.ends_with(".toml") {
            let table: toml::Table = toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
            table.keys().cloned().collect()
        } else if path.ends_with(".ron") {
            match ron::from_str::<ron::Value>(&contents).map_err(|e| ConfigError::Parse(e.to_string()))? {
                ron::Value::Map(map) => map
                    .iter()
                    .filter_map(|(key, _)| match key {
                        ron::Value::String(key) => Some(key.clone()),
                        _ => None,
                    })
                    .collect(),
                _ => Vec::new(),
            }
        } else {
            return Ok(Vec::new());
        };
        Ok(OPTION_ROWS
            .iter()
            .map(|(_, key)| *key)
            .filter(|key| !present.iter().any(|found| found == key))
            .collect())
    }

    /// Step the setting under `key` through its option list, wrapping around
    ///
    /// A current value that is not in the list restarts from the first
    /// option. Returns the new value, or `None` for an unknown key.
    pub fn cycle(&mut self, key: &str, step: i32) -> Option<SettingValue> {
        match key {
            "waves" => self.waves = cycle_option(&WAVE_OPTIONS, &self.waves, step),
            "difficulty" => self.difficulty = cycle_option(&Difficulty::ALL, &self.difficulty, step),
            "volume" => self.volume = cycle_option(&VOLUME_OPTIONS, &self.volume, step),
            "fullscreen" => self.fullscreen = !self.fullscreen,
            "resolution" => self.resolution = cycle_option(&RESOLUTION_OPTIONS, &self.resolution, step),
            "fps" => self.fps = cycle_option(&FPS_OPTIONS, &self.fps, step),
            _ => {
                log::warn!("Cannot cycle unknown setting '{}'", key);
                return None;
            }
        }
        self.get_setting(key)
    }

    /// Whether switching to `other` changes the display mode
    pub fn display_changed(&self, other: &Self) -> bool {
        self.resolution != other.resolution || self.fullscreen != other.fullscreen
    }
}

fn cycle_option<T: Copy + PartialEq>(options: &[T], current: &T, step: i32) -> T {
    let len = i64::try_from(options.len()).unwrap_or(i64::MAX);
    let next = options.iter().position(|option| option == current).map_or(0, |index| {
        let index = i64::try_from(index).unwrap_or(0);
        usize::try_from((index + i64::from(step)).rem_euclid(len)).unwrap_or(0)
    });
    options[next]
}

impl SettingsProvider for GameSettings {
    fn get_setting(&self, key: &str) -> Option<SettingValue> {
        match key {
            "waves" => Some(SettingValue::Int(i64::from(self.waves))),
            "difficulty" => Some(SettingValue::Text(self.difficulty.to_string())),
            "volume" => Some(SettingValue::Int(i64::from(self.volume))),
            "fullscreen" => Some(SettingValue::Bool(self.fullscreen)),
            "resolution" => Some(SettingValue::Resolution(self.resolution.0, self.resolution.1)),
            "fps" => Some(SettingValue::Int(i64::from(self.fps))),
            _ => {
                log::warn!("Unknown setting '{}'", key);
                None
            }
        }
    }

    fn get_resolution(&self) -> (u32, u32) {
        self.resolution
    }
}
