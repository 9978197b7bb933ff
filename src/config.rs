//! Playback configuration.

use crate::builtin;
use crate::error::{Error, Result};
use crate::telemetry::DEFAULT_DROPPED_FRAME_THRESHOLD_MS;

/// Interval used when none is configured (ms).
pub const DEFAULT_INTERVAL_MS: u32 = 100;

/// Playback settings, typically read from a `morph.toml` file.
///
/// All fields are optional; missing values resolve to the defaults
/// through the accessor methods.
///
/// ```toml
/// sequence = "loading"
/// interval_ms = 1000
/// dropped_frame_threshold_ms = 20.0
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlaybackConfig {
    pub sequence: Option<String>,
    pub interval_ms: Option<u32>,
    pub dropped_frame_threshold_ms: Option<f64>,
}

impl PlaybackConfig {
    /// Parse and validate a TOML string.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    #[cfg(feature = "toml")]
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Reject values playback cannot use.
    pub fn validate(&self) -> Result<()> {
        if self.interval_ms == Some(0) {
            return Err(Error::config("interval_ms must be positive"));
        }
        if let Some(t) = self.dropped_frame_threshold_ms {
            if !t.is_finite() || t <= 0.0 {
                return Err(Error::config(format!(
                    "dropped_frame_threshold_ms must be a positive number, got {t}"
                )));
            }
        }
        if matches!(self.sequence.as_deref(), Some(s) if s.trim().is_empty()) {
            return Err(Error::config("sequence name must not be blank"));
        }
        Ok(())
    }

    /// Sequence to play, defaulting to the identity sequence.
    pub fn sequence(&self) -> &str {
        self.sequence.as_deref().unwrap_or(builtin::IDENTITY)
    }

    /// Frame interval in milliseconds.
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
            .filter(|&ms| ms > 0)
            .unwrap_or(DEFAULT_INTERVAL_MS)
    }

    /// Gap above which a callback counts as dropped.
    pub fn dropped_frame_threshold_ms(&self) -> f64 {
        self.dropped_frame_threshold_ms
            .filter(|t| t.is_finite() && *t > 0.0)
            .unwrap_or(DEFAULT_DROPPED_FRAME_THRESHOLD_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = PlaybackConfig::default();
        assert_eq!(config.sequence(), "identity");
        assert_eq!(config.interval_ms(), 100);
        assert_eq!(config.dropped_frame_threshold_ms(), 20.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_interval_rejected() {
        let config = PlaybackConfig {
            interval_ms: Some(0),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
        assert_eq!(config.interval_ms(), DEFAULT_INTERVAL_MS);
    }

    #[test]
    fn bad_threshold_rejected() {
        for t in [0.0, -5.0, f64::INFINITY] {
            let config = PlaybackConfig {
                dropped_frame_threshold_ms: Some(t),
                ..Default::default()
            };
            assert!(config.validate().is_err(), "{t} accepted");
        }
    }

    #[test]
    fn blank_sequence_rejected() {
        let config = PlaybackConfig {
            sequence: Some("  ".into()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "toml")]
    #[test]
    fn from_toml() {
        let config = PlaybackConfig::from_toml_str(
            "sequence = \"concepts\"\ninterval_ms = 1500\n",
        )
        .unwrap();
        assert_eq!(config.sequence(), "concepts");
        assert_eq!(config.interval_ms(), 1500);
        assert_eq!(config.dropped_frame_threshold_ms(), 20.0);
    }

    #[cfg(feature = "toml")]
    #[test]
    fn from_toml_invalid() {
        assert!(matches!(
            PlaybackConfig::from_toml_str("interval_ms = \"fast\""),
            Err(Error::Toml(_))
        ));
        assert!(matches!(
            PlaybackConfig::from_toml_str("interval_ms = 0"),
            Err(Error::Config(_))
        ));
    }
}
