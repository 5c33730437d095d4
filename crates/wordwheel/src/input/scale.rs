use crate::wheel::{Point, Size};

/// Maps points from the measured render surface into the wheel's logical space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceScale {
    pub x: f64,
    pub y: f64,
}

impl SurfaceScale {
    pub const IDENTITY: Self = Self { x: 1.0, y: 1.0 };

    /// Scale taking `measured` surface coordinates to `configured` ones.
    /// A degenerate axis on either side keeps a factor of 1.
    pub fn between(configured: Size, measured: Size) -> Self {
        Self {
            x: factor(configured.width, measured.width),
            y: factor(configured.height, measured.height),
        }
    }

    pub fn apply(&self, point: Point) -> Point {
        Point::new(point.x * self.x, point.y * self.y)
    }
}

impl Default for SurfaceScale {
    fn default() -> Self {
        Self::IDENTITY
    }
}

fn factor(configured: f64, measured: f64) -> f64 {
    let usable = |v: f64| v.is_finite() && v > 0.0;
    if usable(configured) && usable(measured) {
        configured / measured
    } else {
        1.0
    }
}
