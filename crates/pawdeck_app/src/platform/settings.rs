//! Optional `pawdeck.ron` settings next to the working directory; missing
//! or malformed files fall back to defaults with a logged warning.

use std::fs;
use std::path::Path;

use deck_logging::{deck_info, deck_warn};
use serde::{Deserialize, Serialize};

const SETTINGS_FILENAME: &str = "pawdeck.ron";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// How many cards one session asks the loader for.
    pub card_count: u32,
    /// Image endpoint; width/height/random go in the query string.
    pub endpoint: String,
    /// Per-attempt preload deadline in milliseconds.
    pub attempt_timeout_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            card_count: 10,
            endpoint: pawdeck_engine::DEFAULT_ENDPOINT.to_string(),
            attempt_timeout_ms: 7000,
        }
    }
}

pub fn load(dir: &Path) -> Settings {
    let path = dir.join(SETTINGS_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Settings::default();
        }
        Err(err) => {
            deck_warn!("Failed to read settings from {:?}: {}", path, err);
            return Settings::default();
        }
    };

    match ron::from_str(&content) {
        Ok(settings) => {
            deck_info!("Loaded settings from {:?}", path);
            settings
        }
        Err(err) => {
            deck_warn!("Failed to parse settings from {:?}: {}", path, err);
            Settings::default()
        }
    }
}
