//! Affine 2D transforms for orientation compensation and event mapping

use crate::geometry::Point;

/// A 2x3 affine transform mapping `(x, y)` to
/// `(a*x + c*y + tx, b*x + d*y + ty)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    pub const fn translation(dx: f32, dy: f32) -> Self {
        Self {
            tx: dx,
            ty: dy,
            ..Self::IDENTITY
        }
    }

    /// Rotation about the origin. Positive degrees turn the positive
    /// x-axis toward the positive y-axis.
    pub fn rotation(degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            tx: 0.0,
            ty: 0.0,
        }
    }

    /// Prepends a translation: points are translated before this transform.
    pub fn pre_translate(&mut self, dx: f32, dy: f32) {
        self.tx += self.a * dx + self.c * dy;
        self.ty += self.b * dx + self.d * dy;
    }

    /// Appends a translation: points are translated after this transform.
    pub fn post_translate(&mut self, dx: f32, dy: f32) {
        self.tx += dx;
        self.ty += dy;
    }

    pub fn apply(&self, point: Point) -> Point {
        Point::new(
            self.a * point.x + self.c * point.y + self.tx,
            self.b * point.x + self.d * point.y + self.ty,
        )
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Point, expected: Point) {
        assert!(
            (actual.x - expected.x).abs() < 1e-4 && (actual.y - expected.y).abs() < 1e-4,
            "{actual:?} !~ {expected:?}"
        );
    }

    #[test]
    fn quarter_turn_maps_axes() {
        let rotation = Transform::rotation(90.0);
        assert_close(rotation.apply(Point::new(1.0, 0.0)), Point::new(0.0, 1.0));
        assert_close(rotation.apply(Point::new(0.0, 1.0)), Point::new(-1.0, 0.0));
    }

    #[test]
    fn pre_translate_runs_before_rotation() {
        let mut transform = Transform::rotation(90.0);
        transform.pre_translate(2.0, 0.0);
        assert_close(transform.apply(Point::ZERO), Point::new(0.0, 2.0));
    }

    #[test]
    fn post_translate_runs_after_rotation() {
        let mut transform = Transform::rotation(90.0);
        transform.post_translate(2.0, 0.0);
        assert_close(transform.apply(Point::ZERO), Point::new(2.0, 0.0));
    }

    #[test]
    fn rotation_about_a_center() {
        // Pivot (50, 50): pre-translate into the pivot frame, rotate,
        // post-translate back.
        let mut transform = Transform::rotation(180.0);
        transform.pre_translate(-50.0, -50.0);
        transform.post_translate(50.0, 50.0);
        assert_close(transform.apply(Point::new(10.0, 20.0)), Point::new(90.0, 80.0));
        assert_close(transform.apply(Point::new(50.0, 50.0)), Point::new(50.0, 50.0));
    }

    #[test]
    fn identity_checks() {
        assert!(Transform::IDENTITY.is_identity());
        assert!(!Transform::translation(1.0, 0.0).is_identity());
        assert_eq!(Transform::default(), Transform::IDENTITY);
    }
}
