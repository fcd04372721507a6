/// A 2-D pair of values.
///
/// Besides positions, this carries per-axis factors (scales) and per-axis angles (skews).
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn to_euclid(self) -> euclid::default::Point2D<f64> {
        euclid::point2(self.x, self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<euclid::default::Point2D<f64>> for Point {
    fn from(p: euclid::default::Point2D<f64>) -> Self {
        Self::new(p.x, p.y)
    }
}
