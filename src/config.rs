use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::errors::ConfigError;


/// Animation speed in 0..=100, higher is faster
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(from = "u32")]
pub struct Speed(u8);

impl Speed {
    pub const MAX: u8 = 100;

    /// Values above 100 are clamped
    pub fn new(value: u32) -> Self {
        Self(value.min(u32::from(Self::MAX)) as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Pause between two settled nodes: 1000 - 9 * speed milliseconds
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(1000 - 9 * u64::from(self.0))
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self(50)
    }
}

impl From<u32> for Speed {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}


/// User-tunable settings, every key optional
/// ```toml
/// speed = 80
/// show_weights = false
/// default_weight = 3
/// hit_radius = 20.0
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub speed: Speed,
    pub show_weights: bool,
    pub default_weight: u32, // initial content of the edge weight input
    pub hit_radius: f64, // pointer distance that still counts as a click on a node
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            speed: Speed::default(),
            show_weights: true,
            default_weight: 1,
            hit_radius: 20.0,
        }
    }
}

impl Settings {

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_delay() {
        assert_eq!(Speed::new(0).step_delay(), Duration::from_millis(1000));
        assert_eq!(Speed::default().step_delay(), Duration::from_millis(550));
        assert_eq!(Speed::new(100).step_delay(), Duration::from_millis(100));
        assert_eq!(Speed::new(250).value(), 100);
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        assert_eq!(Settings::from_toml_str("").unwrap(), Settings::default());
    }

    #[test]
    fn test_partial_toml() {
        let settings = Settings::from_toml_str("speed = 120\nshow_weights = false\n").unwrap();
        assert_eq!(settings.speed.value(), 100);
        assert!(!settings.show_weights);
        assert_eq!(settings.default_weight, 1);
        assert_eq!(settings.hit_radius, 20.0);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = Settings::from_toml_str("sped = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
