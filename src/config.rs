use crate::error::Result;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub title: String,
    pub style: StyleConfig,
    /// Auto-repeated keys arriving faster than this are dropped
    pub repeat_throttle_ms: u64,
    pub theme: Theme,
}

/// Popup spacing, in terminal cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub padding_horizontal: u16,
    pub padding_vertical: u16,
    pub gap: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "Quick Folder".to_string(),
            style: StyleConfig::default(),
            repeat_throttle_ms: 100,
            theme: Theme::default(),
        }
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            padding_horizontal: 3,
            padding_vertical: 1,
            gap: 0,
        }
    }
}

impl Config {
    /// Load a JSON style file, falling back to defaults for missing fields
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Load the style file if one was given, defaults otherwise
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                log::info!("Loading style config from {:?}", path);
                Self::load_from_file(path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Height of one menu row including the gap below it
    pub fn row_height(&self) -> u16 {
        1 + self.style.gap
    }
}
