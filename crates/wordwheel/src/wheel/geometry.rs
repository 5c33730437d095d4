use super::{COLLAPSED_WINDOW, EXPANDED_WINDOW, INNER_SLOTS, OUTER_SLOTS, START_OFFSET};
use crate::candidate::Candidate;
use crate::config::WheelConfig;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use strum::{Display, IntoStaticStr};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn offset_from(&self, origin: Point) -> (f64, f64) {
        (self.x - origin.x, self.y - origin.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
pub enum Ring {
    Inner,
    Outer,
}

impl Ring {
    pub fn of(index: usize) -> Self {
        if index < INNER_SLOTS {
            Self::Inner
        } else {
            Self::Outer
        }
    }

    /// Whether a touch at elliptical distance `d` may land on this ring
    /// while the wheel is expanded.
    pub fn admits(&self, d: f64, config: &WheelConfig) -> bool {
        let boundary = config.inner_radius.x + config.thresholds.band_offset;
        match self {
            Self::Inner => d < boundary,
            Self::Outer => d >= boundary && d < config.outer_radius.x + config.thresholds.band_offset,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotGeometry {
    pub ring: Ring,
    pub ring_index: usize,
    pub ring_size: usize,
    pub angle: f64,
    pub center: Point,
}

impl SlotGeometry {
    pub fn angle(ring_index: usize, ring_size: usize) -> f64 {
        START_OFFSET + (2.0 * PI / ring_size as f64) * ring_index as f64
    }

    pub fn angle_difference(a: f64, b: f64) -> f64 {
        // Normalize the difference to [-PI, PI] to find the shortest path around the circle
        ((a - b + PI).rem_euclid(2.0 * PI) - PI).abs()
    }

    /// Places slot `index` of a window holding `total` candidates.
    ///
    /// Ring sizes shrink to the number of candidates actually present, so
    /// three words still spread evenly around the inner ring.
    pub fn calculate(index: usize, total: usize, config: &WheelConfig) -> Option<Self> {
        if index >= total {
            return None;
        }

        let ring = Ring::of(index);
        let (ring_index, ring_size, radii) = match ring {
            Ring::Inner => (index, total.min(INNER_SLOTS), config.inner_radius),
            Ring::Outer => (
                index - INNER_SLOTS,
                (total - INNER_SLOTS).min(OUTER_SLOTS),
                config.outer_radius,
            ),
        };

        let angle = Self::angle(ring_index, ring_size);
        let center = Point::new(
            config.center.x + radii.x * angle.cos(),
            config.center.y + radii.y * angle.sin(),
        );

        Some(Self {
            ring,
            ring_index,
            ring_size,
            angle,
            center,
        })
    }
}

/// Result of resolving a touch point against the visible window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub index: usize,
    pub ring: Ring,
}

pub fn visible_count(total: usize, expanded: bool) -> usize {
    total.min(if expanded {
        EXPANDED_WINDOW
    } else {
        COLLAPSED_WINDOW
    })
}

pub fn visible_window(candidates: &[Candidate], expanded: bool) -> &[Candidate] {
    &candidates[..visible_count(candidates.len(), expanded)]
}

pub fn layout(total: usize, expanded: bool, config: &WheelConfig) -> Vec<SlotGeometry> {
    let count = visible_count(total, expanded);
    (0..count)
        .filter_map(|i| SlotGeometry::calculate(i, count, config))
        .collect()
}

/// Distance from the center with each axis normalised by the outer ring,
/// scaled back to the outer X radius.
pub fn elliptical_distance(point: Point, config: &WheelConfig) -> f64 {
    let (dx, dy) = point.offset_from(config.center);
    let (rx, ry) = (config.outer_radius.x, config.outer_radius.y);
    (dx / rx).hypot(dy / ry) * rx
}

pub fn touch_angle(point: Point, config: &WheelConfig) -> f64 {
    let (dx, dy) = point.offset_from(config.center);
    dy.atan2(dx)
}

pub fn hit_test(
    point: Point,
    candidates: &[Candidate],
    expanded: bool,
    config: &WheelConfig,
) -> Option<Hit> {
    let d = elliptical_distance(point, config);

    // dead zone
    if d < config.dead_zone {
        return None;
    }

    let touch = touch_angle(point, config);

    layout(candidates.len(), expanded, config)
        .into_iter()
        .enumerate()
        .filter(|(_, slot)| !expanded || slot.ring.admits(d, config))
        .min_by(|(_, a), (_, b)| {
            SlotGeometry::angle_difference(touch, a.angle)
                .total_cmp(&SlotGeometry::angle_difference(touch, b.angle))
        })
        .map(|(index, slot)| Hit {
            index,
            ring: slot.ring,
        })
}

/// Expansion flag after a drag to elliptical distance `d`.
///
/// The expand and collapse thresholds differ so a finger resting near one
/// boundary does not flip the wheel back and forth.
pub fn next_expansion(d: f64, candidate_count: usize, expanded: bool, config: &WheelConfig) -> bool {
    let t = &config.thresholds;
    if !expanded && d > config.inner_radius.x + t.expand_offset && candidate_count > INNER_SLOTS {
        true
    } else if expanded && d < t.collapse_distance {
        false
    } else {
        expanded
    }
}
