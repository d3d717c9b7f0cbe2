use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::audio::synthesizer::SAMPLE_RATE;
use crate::types::waveform::Waveform;

/// Demo playback configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DemoConfig {
    /// Oscillator frequency in Hz
    #[serde(default = "default_frequency")]
    pub frequency: f32,

    /// Output volume in dB (0 is unity gain)
    #[serde(default = "default_volume", rename = "volume")]
    pub volume_db: f32,

    #[serde(default)]
    pub wave: Waveform,

    /// Playback duration in seconds
    #[serde(default = "default_duration")]
    pub duration: f32,
}

impl DemoConfig {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: DemoConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let nyquist = SAMPLE_RATE as f32 / 2.0;
        if self.frequency <= 0.0 || self.frequency > nyquist {
            return Err(anyhow!(
                "Frequency must be between 0 and {} Hz (exclusive of 0)",
                nyquist
            ));
        }
        if self.volume_db < -60.0 || self.volume_db > 20.0 {
            return Err(anyhow!("Volume must be between -60 and 20 dB"));
        }
        if self.duration <= 0.0 {
            return Err(anyhow!("Duration must be positive"));
        }

        Ok(())
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            frequency: default_frequency(),
            volume_db: default_volume(),
            wave: Waveform::default(),
            duration: default_duration(),
        }
    }
}

// Default value functions for serde

fn default_frequency() -> f32 {
    440.0
}

fn default_volume() -> f32 {
    -12.0
}

fn default_duration() -> f32 {
    2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_config() {
        let yaml = r#"
frequency: 220.0
volume: -6.0
wave: square
duration: 1.5
"#;

        let config: DemoConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.frequency, 220.0);
        assert_eq!(config.volume_db, -6.0);
        assert_eq!(config.wave, Waveform::Square);
        assert_eq!(config.duration, 1.5);
    }

    #[test]
    fn test_defaults() {
        let config: DemoConfig = serde_yaml::from_str("{}").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.frequency, 440.0);
        assert_eq!(config.volume_db, -12.0);
        assert_eq!(config.wave, Waveform::Sine);
        assert_eq!(config.duration, 2.0);
    }

    #[test]
    fn test_validate_frequency_range() {
        let config: DemoConfig = serde_yaml::from_str("frequency: 0.0").unwrap();
        assert!(config.validate().is_err());

        let config: DemoConfig = serde_yaml::from_str("frequency: 30000.0").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_volume_range() {
        let config: DemoConfig = serde_yaml::from_str("volume: -80.0").unwrap();
        assert!(config.validate().is_err());

        let config: DemoConfig = serde_yaml::from_str("volume: 30.0").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_duration() {
        let config: DemoConfig = serde_yaml::from_str("duration: -1.0").unwrap();
        assert!(config.validate().is_err());
    }
}
