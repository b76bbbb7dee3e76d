//! Startup settings, read from a JSON file.
//!
//! ```json
//! {
//!     "window": {
//!         "title": "Cubes",
//!         "size": { "x": 1024, "y": 768 },
//!         "camera": { "speed": 0.1 }
//!     }
//! }
//! ```
//!
//! Missing fields take their default values.

use std::fs;
use std::path::Path;

use crate::errors::*;
use crate::window::WindowParams;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window: WindowParams,
}

impl Settings {
    pub fn from_str(text: &str) -> Result<Self> {
        let settings = serde_json::from_str(text)?;
        Ok(settings)
    }

    pub fn to_string_pretty(&self) -> Result<String> {
        let text = serde_json::to_string_pretty(self)?;
        Ok(text)
    }

    pub fn load<T: AsRef<Path>>(path: T) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let settings = Self::from_str(&text)?;
        info!("Loaded settings from {:?}.", path);
        Ok(settings)
    }

    /// Loads the settings at `path`, falling back to the defaults when the
    /// file is missing or malformed.
    pub fn load_or_default<T: AsRef<Path>>(path: T) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Settings::default();
        }

        match Self::load(path) {
            Ok(settings) => settings,
            Err(err) => {
                warn!("Failed to load settings from {:?}, using defaults. {}", path, err);
                Settings::default()
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn partial() {
        let settings = Settings::from_str(r#"{ "window": { "title": "Cubes" } }"#).unwrap();
        assert_eq!(settings.window.title, "Cubes");
        assert_eq!(settings.window.size, WindowParams::default().size);
        assert_eq!(settings.window.camera.sensitivity, 0.1);
    }

    #[test]
    fn malformed() {
        match Settings::from_str("{ window: 1 }") {
            Err(Error::Settings(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }
}
