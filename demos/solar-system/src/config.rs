/// Game configuration, optionally loaded from JSON before init.
/// Every field has a default, so `{}` is a valid document.

use serde::Deserialize;
use orrery_engine::{EngineError, EngineResult};

/// Upper bound on `star_count`. Each star is one SDF instance per frame.
pub const MAX_STAR_COUNT: usize = 100_000;
/// Upper bound on `orbit_segments`. Eight orbits at this count still fit the
/// default vector vertex budget.
pub const MAX_ORBIT_SEGMENTS: usize = 512;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OrreryConfig {
    /// Largest frame delta fed to the update loop, seconds.
    pub max_frame_dt: f32,
    pub star_count: usize,
    /// Stars are scattered in a cube of ± this many units.
    pub star_half_extent: f32,
    pub star_seed: u64,
    /// Line segments per orbit path.
    pub orbit_segments: usize,
    pub camera_position: [f32; 3],
}

impl Default for OrreryConfig {
    fn default() -> Self {
        Self {
            max_frame_dt: 0.1,
            star_count: 2000,
            star_half_extent: 200.0,
            star_seed: 0x5eed,
            orbit_segments: 64,
            camera_position: [0.0, 30.0, 80.0],
        }
    }
}

impl OrreryConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> EngineResult<()> {
        if !(self.max_frame_dt.is_finite() && self.max_frame_dt > 0.0) {
            return Err(EngineError::InvalidConfig(format!(
                "max_frame_dt must be positive, got {}",
                self.max_frame_dt
            )));
        }
        if !(self.star_half_extent.is_finite() && self.star_half_extent > 0.0) {
            return Err(EngineError::InvalidConfig(format!(
                "star_half_extent must be positive, got {}",
                self.star_half_extent
            )));
        }
        if self.star_count > MAX_STAR_COUNT {
            return Err(EngineError::InvalidConfig(format!(
                "star_count must be at most {}, got {}",
                MAX_STAR_COUNT, self.star_count
            )));
        }
        if !(3..=MAX_ORBIT_SEGMENTS).contains(&self.orbit_segments) {
            return Err(EngineError::InvalidConfig(format!(
                "orbit_segments must be in 3..={}, got {}",
                MAX_ORBIT_SEGMENTS, self.orbit_segments
            )));
        }
        if self.camera_position.iter().any(|v| !v.is_finite())
            || self.camera_position == [0.0; 3]
        {
            return Err(EngineError::InvalidConfig(
                "camera_position must be finite and away from the origin".into(),
            ));
        }
        Ok(())
    }
}
