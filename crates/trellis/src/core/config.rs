//! Engine tuning parameters.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Tunable gesture and kinetic-scroll parameters.
///
/// The kinetic coefficients are feel parameters rather than physics: the
/// speed ceiling is `kinetic_range` viewport diagonals per second, and each
/// second of decay removes `kinetic_deceleration` times that ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Motion threshold for promoting a press to a drag, as a fraction of one
    /// text unit.
    pub motion_threshold: f32,
    /// Pointer-move samples closer together than this are dropped while
    /// dragging.
    #[serde(with = "millis")]
    pub min_sample_interval: Duration,
    /// Speed ceiling in viewport diagonals per second.
    pub kinetic_range: f32,
    /// Deceleration as a multiple of the speed ceiling, per second.
    pub kinetic_deceleration: f32,
    /// Residual speed in pixels per second below which velocity snaps to zero.
    pub kinetic_epsilon: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            motion_threshold: 0.25,
            min_sample_interval: Duration::from_millis(8),
            kinetic_range: 1.0,
            kinetic_deceleration: 2.0,
            kinetic_epsilon: 1.0,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that every coefficient is finite and non-negative, and that the
    /// deceleration is positive so a fling always comes to rest.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("motion_threshold", self.motion_threshold),
            ("kinetic_range", self.kinetic_range),
            ("kinetic_deceleration", self.kinetic_deceleration),
            ("kinetic_epsilon", self.kinetic_epsilon),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::Config(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        if self.kinetic_deceleration <= 0.0 {
            return Err(Error::Config(
                "kinetic_deceleration must be positive, got 0".into(),
            ));
        }
        Ok(())
    }
}

/// Serialize a duration as whole milliseconds.
mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    /// Write the duration as milliseconds.
    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    /// Read a millisecond count.
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(d)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = EngineConfig::default();
        assert_eq!(c.motion_threshold, 0.25);
        assert_eq!(c.min_sample_interval, Duration::from_millis(8));
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() -> Result<()> {
        let c = EngineConfig::from_json(r#"{"kinetic_deceleration": 4.0, "min_sample_interval": 16}"#)?;
        assert_eq!(c.kinetic_deceleration, 4.0);
        assert_eq!(c.min_sample_interval, Duration::from_millis(16));
        assert_eq!(c.kinetic_range, 1.0);
        Ok(())
    }

    #[test]
    fn json_round_trip() -> Result<()> {
        let c = EngineConfig {
            kinetic_epsilon: 0.5,
            ..EngineConfig::default()
        };
        assert_eq!(EngineConfig::from_json(&c.to_json()?)?, c);
        Ok(())
    }

    #[test]
    fn rejects_negative() {
        let err = EngineConfig::from_json(r#"{"kinetic_range": -1.0}"#);
        assert!(matches!(err, Err(Error::Config(msg)) if msg.contains("kinetic_range")));
    }

    #[test]
    fn rejects_zero_deceleration() {
        let err = EngineConfig::from_json(r#"{"kinetic_deceleration": 0.0}"#);
        assert!(matches!(err, Err(Error::Config(msg)) if msg.contains("kinetic_deceleration")));
        assert!(matches!(
            EngineConfig::from_json(r#"{"kinetic_deceleration": 0.001}"#),
            Ok(_)
        ));
    }

    #[test]
    fn rejects_unknown_and_malformed() {
        assert!(matches!(
            EngineConfig::from_json(r#"{"bogus": 1}"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            EngineConfig::from_json("{"),
            Err(Error::Config(_))
        ));
    }
}
