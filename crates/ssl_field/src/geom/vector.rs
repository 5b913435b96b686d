//! 2D vector type used by all field queries
//!
//! `Vector` is nalgebra's `Vector2<f64>` (pure value, `Copy`). The extra
//! operations robot-soccer code needs on top of nalgebra live in [`VectorExt`].
//!
//! ## Conventions
//! - Angles are counterclockwise radians, `heading()` is in [-pi, +pi]
//! - `perpendicular()` rotates clockwise: (x, y) -> (y, -x)

use nalgebra::Rotation2;

use super::intersect::intersect_line_line;

/// Position or direction in meters
pub type Vector = nalgebra::Vector2<f64>;

/// Squared length below which a line defined by two points is treated as a point
const DEGENERATE_LINE_SQ: f64 = 0.00001 * 0.00001;

pub trait VectorExt: Sized {
    /// Unit vector pointing at `angle`
    fn from_angle(angle: f64) -> Self;
    fn from_polar(angle: f64, length: f64) -> Self;

    /// Perpendicular reached first when rotating clockwise
    fn perpendicular(&self) -> Self;
    fn rotated(&self, angle: f64) -> Self;
    /// Direction angle. nalgebra already uses `angle` for the angle between two vectors.
    fn heading(&self) -> f64;

    /// Signed angle from `self` to `other`, 0 if either vector is zero
    fn angle_to(&self, other: &Self) -> f64;

    fn distance_to(&self, other: &Self) -> f64;
    fn distance_to_sq(&self, other: &Self) -> f64;

    /// Same direction, given length. The zero vector stays zero.
    fn with_length(&self, length: f64) -> Self;
    fn normalized_or_zero(&self) -> Self;

    /// Foot point on the line through `p1`/`p2` and the signed distance to it.
    /// The distance is positive when `self` is on the left of `p1 -> p2`.
    fn orthogonal_projection(&self, p1: &Self, p2: &Self) -> (Self, f64);
    fn orthogonal_distance(&self, p1: &Self, p2: &Self) -> f64;

    fn distance_to_line_segment(&self, start: &Self, end: &Self) -> f64;
    fn nearest_pos_on_line(&self, start: &Self, end: &Self) -> Self;

    /// Whether `self` lies in the sector swept counterclockwise from `start` to `end`
    fn inside_sector(&self, start: &Self, end: &Self) -> bool;
}

impl VectorExt for Vector {
    #[inline]
    fn from_angle(angle: f64) -> Self {
        Vector::new(angle.cos(), angle.sin())
    }

    #[inline]
    fn from_polar(angle: f64, length: f64) -> Self {
        Vector::new(angle.cos() * length, angle.sin() * length)
    }

    #[inline]
    fn perpendicular(&self) -> Self {
        Vector::new(self.y, -self.x)
    }

    #[inline]
    fn rotated(&self, angle: f64) -> Self {
        Rotation2::new(angle) * *self
    }

    #[inline]
    fn heading(&self) -> f64 {
        self.y.atan2(self.x)
    }

    fn angle_to(&self, other: &Self) -> f64 {
        if self.norm_squared() == 0.0 || other.norm_squared() == 0.0 {
            return 0.0;
        }
        super::angle::angle_diff(self.heading(), other.heading())
    }

    #[inline]
    fn distance_to(&self, other: &Self) -> f64 {
        (self - other).norm()
    }

    #[inline]
    fn distance_to_sq(&self, other: &Self) -> f64 {
        (self - other).norm_squared()
    }

    fn with_length(&self, length: f64) -> Self {
        let current = self.norm();
        if current == 0.0 {
            return Vector::zeros();
        }
        self * (length / current)
    }

    fn normalized_or_zero(&self) -> Self {
        self.with_length(1.0)
    }

    fn orthogonal_projection(&self, p1: &Self, p2: &Self) -> (Self, f64) {
        let rv = p2 - p1;
        if rv.norm_squared() < DEGENERATE_LINE_SQ {
            return (*p1, self.distance_to(p1));
        }
        match intersect_line_line(*self, rv.perpendicular(), *p1, rv) {
            Some(hit) => (hit.point, hit.t1 * rv.norm()),
            None => (*self, 0.0),
        }
    }

    fn orthogonal_distance(&self, p1: &Self, p2: &Self) -> f64 {
        self.orthogonal_projection(p1, p2).1
    }

    fn distance_to_line_segment(&self, start: &Self, end: &Self) -> f64 {
        let dir = (end - start).normalized_or_zero();
        let d = self - start;
        if d.dot(&dir) < 0.0 {
            return d.norm();
        }
        let d = self - end;
        if d.dot(&dir) > 0.0 {
            return d.norm();
        }
        (d.x * dir.y - d.y * dir.x).abs()
    }

    fn nearest_pos_on_line(&self, start: &Self, end: &Self) -> Self {
        let dir = end - start;
        if (self - start).dot(&dir) <= 0.0 {
            return *start;
        }
        if (self - end).dot(&dir) >= 0.0 {
            return *end;
        }
        let t = (self - start).dot(&dir) / dir.norm_squared();
        start + dir * t
    }

    fn inside_sector(&self, start: &Self, end: &Self) -> bool {
        let v1 = -start.perpendicular();
        let v2 = end.perpendicular();
        let b1 = self.dot(&v1) >= 0.0;
        let b2 = self.dot(&v2) >= 0.0;
        if v1.dot(end) >= 0.0 {
            b1 && b2
        } else {
            b1 || b2
        }
    }
}
