//! 2-D geometry primitives for animating vector graphics: colors, points and affine matrices.

mod color;
mod matrix;
mod point;
mod unit_interval;

pub use color::*;
pub use matrix::*;
pub use point::*;
pub use unit_interval::*;
