use crate::wheel::Point;
use serde::{Deserialize, Serialize};
use serde_with::{DurationMilliSeconds, serde_as};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid wheel geometry: {reason}")]
    InvalidGeometry { reason: String },
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    fn geometry(reason: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            reason: reason.into(),
        }
    }
}

/// Per-axis radius of an elliptical ring.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Radii {
    pub x: f64,
    pub y: f64,
}

impl Radii {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn circular(r: f64) -> Self {
        Self { x: r, y: r }
    }
}

/// Distance offsets for ring bands and expansion hysteresis.
///
/// All values are in elliptical-distance units (normalised to the outer
/// ring's X radius).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Inner ring is eligible below `inner.x + band_offset`, outer ring
    /// between that and `outer.x + band_offset`.
    pub band_offset: f64,
    /// Expand once the drag passes `inner.x + expand_offset`.
    pub expand_offset: f64,
    /// Collapse once the drag comes back under this distance.
    pub collapse_distance: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            band_offset: 40.0,
            expand_offset: 50.0,
            collapse_distance: 80.0,
        }
    }
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelConfig {
    pub center: Point,
    pub inner_radius: Radii,
    pub outer_radius: Radii,
    pub dead_zone: f64,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub activation_delay: Duration,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub hide_animation: Duration,
    #[serde(default)]
    pub thresholds: Thresholds,
}

impl WheelConfig {
    /// Checks `outer >= inner > dead_zone >= 0` on both axes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (inner, outer) = (self.inner_radius, self.outer_radius);
        let values = [
            self.center.x,
            self.center.y,
            inner.x,
            inner.y,
            outer.x,
            outer.y,
            self.dead_zone,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::geometry("values must be finite"));
        }
        if self.dead_zone < 0.0 {
            return Err(ConfigError::geometry(format!(
                "dead zone {} is negative",
                self.dead_zone
            )));
        }
        if inner.x <= self.dead_zone || inner.y <= self.dead_zone {
            return Err(ConfigError::geometry(format!(
                "inner radius {:?} must exceed dead zone {}",
                inner, self.dead_zone
            )));
        }
        if outer.x < inner.x || outer.y < inner.y {
            return Err(ConfigError::geometry(format!(
                "outer radius {:?} is smaller than inner radius {:?}",
                outer, inner
            )));
        }
        Ok(())
    }
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            center: Point::new(200.0, 200.0),
            inner_radius: Radii::circular(100.0),
            outer_radius: Radii::circular(180.0),
            dead_zone: 30.0,
            activation_delay: Duration::from_millis(300),
            hide_animation: Duration::from_millis(150),
            thresholds: Thresholds::default(),
        }
    }
}
