use crate::Point;

/// A 2-D affine transform in row-vector convention.
///
/// A point maps as `p' = p * M`, so `a.then(&b)` applies `a` first, then `b`.
pub type Matrix = euclid::default::Transform2D<f64>;

pub trait MatrixExt: Sized {
    /// A shear, mapping `(x, y)` to `(x + sh * y, y + sv * x)`.
    fn shearing(sh: f64, sv: f64) -> Self;

    /// A rotation by `degrees`, exact at multiples of 90 degrees.
    fn rotation_degrees(degrees: f64) -> Self;

    /// Prepends a shear, so that it applies to points before `self`.
    fn pre_shear(&self, sh: f64, sv: f64) -> Self;

    fn pre_scale_by(&self, sx: f64, sy: f64) -> Self;

    fn pre_rotate_degrees(&self, degrees: f64) -> Self;

    fn pre_translate_by(&self, dx: f64, dy: f64) -> Self;

    /// Prepends a rotation around `center`: translate to the center, rotate, translate back.
    fn pre_rotate_about(&self, center: Point, degrees: f64) -> Self {
        self.pre_translate_by(center.x, center.y)
            .pre_rotate_degrees(degrees)
            .pre_translate_by(-center.x, -center.y)
    }

    fn map(&self, point: Point) -> Point;
}

impl MatrixExt for Matrix {
    fn shearing(sh: f64, sv: f64) -> Self {
        Matrix::new(1.0, sv, sh, 1.0, 0.0, 0.0)
    }

    fn rotation_degrees(degrees: f64) -> Self {
        // Exact, so equivalent quarter turns stay exact.
        let degrees = degrees.rem_euclid(360.0);
        let (sin, cos) = if degrees == 90.0 {
            (1.0, 0.0)
        } else if degrees == 180.0 {
            (0.0, -1.0)
        } else if degrees == 270.0 {
            (-1.0, 0.0)
        } else {
            degrees.to_radians().sin_cos()
        };
        Matrix::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    fn pre_shear(&self, sh: f64, sv: f64) -> Self {
        Matrix::shearing(sh, sv).then(self)
    }

    fn pre_scale_by(&self, sx: f64, sy: f64) -> Self {
        Matrix::scale(sx, sy).then(self)
    }

    fn pre_rotate_degrees(&self, degrees: f64) -> Self {
        Matrix::rotation_degrees(degrees).then(self)
    }

    fn pre_translate_by(&self, dx: f64, dy: f64) -> Self {
        Matrix::translation(dx, dy).then(self)
    }

    fn map(&self, point: Point) -> Point {
        self.transform_point(point.to_euclid()).into()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn prepended_operations_apply_to_points_first() {
        let m = Matrix::identity()
            .pre_scale_by(2.0, 1.0)
            .pre_translate_by(10.0, 0.0);
        // Translated first, then scaled.
        assert_eq!(m.map(Point::new(1.0, 0.0)), Point::new(22.0, 0.0));
    }

    #[test]
    fn quarter_rotation_is_exact() {
        let m = Matrix::rotation_degrees(90.0);
        assert_eq!(m.map(Point::new(1.0, 0.0)), Point::new(0.0, 1.0));
    }

    #[test]
    fn quarter_rotations_past_a_full_turn_are_exact() {
        assert_eq!(Matrix::rotation_degrees(450.0), Matrix::rotation_degrees(90.0));
        assert_eq!(Matrix::rotation_degrees(-450.0), Matrix::rotation_degrees(270.0));
        assert_eq!(Matrix::rotation_degrees(-180.0), Matrix::new(-1.0, 0.0, -0.0, -1.0, 0.0, 0.0));
        assert_eq!(
            Matrix::rotation_degrees(-90.0).map(Point::new(1.0, 0.0)),
            Point::new(0.0, -1.0)
        );
    }

    #[test]
    fn rotation_about_center_keeps_center_fixed() {
        let center = Point::new(5.0, 5.0);
        let m = Matrix::identity().pre_rotate_about(center, 37.0);
        let mapped = m.map(center);
        assert_abs_diff_eq!(mapped.x, 5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(mapped.y, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn shear_mixes_axes() {
        let m = Matrix::shearing(0.5, 0.0);
        assert_eq!(m.map(Point::new(0.0, 2.0)), Point::new(1.0, 2.0));
    }
}
