use svganim_geometry::{Color, Point};

/// Linear interpolation between two keyframe samples.
///
/// `t` is expected to be in `0..=1`. Implementations reproduce `from` at `t == 0` and `to` at
/// `t == 1` exactly.
pub trait Interpolatable: Clone {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self;
}

impl Interpolatable for f64 {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        // `from + (to - from)` may be off by an ulp, so the ends are pinned.
        if t <= 0.0 {
            return *from;
        }
        if t >= 1.0 {
            return *to;
        }
        from + (to - from) * t
    }
}

impl Interpolatable for Point {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        let x = f64::interpolate(&from.x, &to.x, t);
        let y = f64::interpolate(&from.y, &to.y, t);
        (x, y).into()
    }
}

/// Every channel is interpolated on its own and truncated toward zero.
impl Interpolatable for Color {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        let channel = |a: u8, b: u8| f64::interpolate(&(a as f64), &(b as f64), t);
        Color::from_channels(
            channel(from.red, to.red),
            channel(from.green, to.green),
            channel(from.blue, to.blue),
            channel(from.alpha, to.alpha),
        )
    }
}

pub fn interpolate<T>(from: &T, to: &T, t: f64) -> T
where
    T: Interpolatable,
{
    T::interpolate(from, to, t)
}
