//! Data-driven world constants
//!
//! Every physics constant the resolver reads lives here so a level can be
//! re-tuned from JSON without recompiling. Missing keys fall back to defaults.

use serde::{Deserialize, Serialize};

/// Errors raised while loading or validating tuning data
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("Could not parse tuning JSON, reason='{0}'")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid tuning value: {field}={value} ({reason})")]
    Invalid {
        field: &'static str,
        value: f32,
        reason: &'static str,
    },
}

/// World constants for one play session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Total level length in world units
    pub world_width: f32,
    /// Downward acceleration per tick
    pub gravity: f32,
    /// Instantaneous upward velocity applied on jump
    pub jump_impulse: f32,
    /// Horizontal speed cap
    pub max_speed: f32,
    /// Horizontal acceleration per tick while a direction is held
    pub run_accel: f32,
    /// Velocity multiplier per tick when no direction is held
    pub friction: f32,
    /// Thickness of the ground strip below the ground line
    pub ground_thickness: f32,
    /// Fraction of the remaining distance the camera covers each tick
    pub camera_smoothing: f32,
    /// Max distance between player bottom and enemy top that counts as a stomp
    pub stomp_threshold: f32,
    /// Upward velocity after picking up a coin from above
    pub coin_bounce: f32,
    /// |vx| above which the player counts as running
    pub run_threshold: f32,
    /// Renderer zoom; the logical viewport is the physical one divided by this
    pub zoom: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: 8000.0,
            gravity: 0.5,
            jump_impulse: 12.0,
            max_speed: 5.0,
            run_accel: 0.5,
            friction: 0.8,
            ground_thickness: 32.0,
            camera_smoothing: 0.1,
            stomp_threshold: 10.0,
            coin_bounce: 4.0,
            run_threshold: 0.1,
            zoom: 1.0,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from a JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Upward velocity given to the player after stomping an enemy
    pub fn stomp_bounce(&self) -> f32 {
        self.jump_impulse / 1.5
    }

    /// Check that every constant is usable by the resolver
    pub fn validate(&self) -> Result<(), TuningError> {
        positive("world_width", self.world_width)?;
        positive("gravity", self.gravity)?;
        positive("jump_impulse", self.jump_impulse)?;
        positive("max_speed", self.max_speed)?;
        positive("run_accel", self.run_accel)?;
        positive("zoom", self.zoom)?;
        unit_interval("friction", self.friction)?;
        unit_interval("camera_smoothing", self.camera_smoothing)?;
        non_negative("ground_thickness", self.ground_thickness)?;
        non_negative("stomp_threshold", self.stomp_threshold)?;
        non_negative("coin_bounce", self.coin_bounce)?;
        non_negative("run_threshold", self.run_threshold)?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::Invalid {
            field,
            value,
            reason: "must be > 0",
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(TuningError::Invalid {
            field,
            value,
            reason: "must be >= 0",
        })
    }
}

fn unit_interval(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(TuningError::Invalid {
            field,
            value,
            reason: "must be in (0, 1]",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.8, "zoom": 2.0 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.8);
        assert_eq!(tuning.zoom, 2.0);
        assert_eq!(tuning.world_width, Tuning::default().world_width);
    }

    #[test]
    fn test_rejects_bad_friction() {
        let err = Tuning::from_json(r#"{ "friction": 1.5 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "friction",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Tuning::from_json("{ gravity: "),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_stomp_bounce() {
        let tuning = Tuning {
            jump_impulse: 12.0,
            ..Default::default()
        };
        assert!((tuning.stomp_bounce() - 8.0).abs() < 1e-6);
    }
}
