//! Triangle, polygon and rectangle helpers

use super::vector::{Vector, VectorExt};

/// Winding of three points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Clockwise,
    Collinear,
    CounterClockwise,
}

impl Orientation {
    /// -1 clockwise, 0 collinear, 1 counterclockwise
    pub fn sign(self) -> i8 {
        match self {
            Orientation::Clockwise => -1,
            Orientation::Collinear => 0,
            Orientation::CounterClockwise => 1,
        }
    }
}

/// Signed area (shoelace / 2), positive for counterclockwise corners
pub fn signed_triangle_area(p1: Vector, p2: Vector, p3: Vector) -> f64 {
    let p21 = p2 - p1;
    let p31 = p3 - p1;
    0.5 * (p21.x * p31.y - p21.y * p31.x)
}

pub fn triangle_area(p1: Vector, p2: Vector, p3: Vector) -> f64 {
    signed_triangle_area(p1, p2, p3).abs()
}

pub fn triangle_orientation(p1: Vector, p2: Vector, p3: Vector) -> Orientation {
    let area = signed_triangle_area(p1, p2, p3);
    if area > 0.0 {
        Orientation::CounterClockwise
    } else if area < 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Area of a quadrangle whose corners are ordered (cw or ccw)
pub fn quadrangle_area(p1: Vector, p2: Vector, p3: Vector, p4: Vector) -> f64 {
    triangle_area(p1, p2, p3) + triangle_area(p1, p3, p4)
}

/// Barycentric point-in-triangle test, borders count as inside
pub fn is_in_triangle(a: Vector, b: Vector, c: Vector, p: Vector) -> bool {
    let v0 = c - a;
    let v1 = b - a;
    let v2 = p - a;

    let dot00 = v0.dot(&v0);
    let dot01 = v0.dot(&v1);
    let dot02 = v0.dot(&v2);
    let dot11 = v1.dot(&v1);
    let dot12 = v1.dot(&v2);

    let inv_denom = 1.0 / (dot00 * dot11 - dot01 * dot01);
    let u = (dot11 * dot02 - dot01 * dot12) * inv_denom;
    if u < 0.0 {
        return false;
    }
    let v = (dot00 * dot12 - dot01 * dot02) * inv_denom;
    v >= 0.0 && u + v <= 1.0
}

/// Geometric center of the points, `None` for an empty slice
pub fn center(points: &[Vector]) -> Option<Vector> {
    if points.is_empty() {
        return None;
    }
    let sum = points.iter().fold(Vector::zeros(), |acc, p| acc + p);
    Some(sum / points.len() as f64)
}

/// Inscribed angle theorem: the two circle centers (and shared radius) on
/// which `p1` and `p2` are seen under the angle `theta`.
pub fn inscribed_angle(p1: Vector, p2: Vector, theta: f64) -> (Vector, Vector, f64) {
    let radius = p1.distance_to(&p2) / (2.0 * theta.sin());
    let chord = p2 - p1;
    let first = p1 + chord.rotated(std::f64::consts::FRAC_PI_2 - theta).with_length(radius);
    let second = p1 + chord.rotated(-(std::f64::consts::FRAC_PI_2 - theta)).with_length(radius);
    (first, second, radius)
}

/// Strict containment in the axis-aligned rectangle spanned by two corners
pub fn inside_rect(corner1: Vector, corner2: Vector, p: Vector) -> bool {
    let (min_x, max_x) = (corner1.x.min(corner2.x), corner1.x.max(corner2.x));
    let (min_y, max_y) = (corner1.y.min(corner2.y), corner1.y.max(corner2.y));
    min_x < p.x && p.x < max_x && min_y < p.y && p.y < max_y
}

/// Clamp `pos` into the axis-aligned rectangle spanned by two corners
pub fn bound_rect(corner1: Vector, pos: Vector, corner2: Vector) -> Vector {
    Vector::new(
        pos.x.clamp(corner1.x.min(corner2.x), corner1.x.max(corner2.x)),
        pos.y.clamp(corner1.y.min(corner2.y), corner1.y.max(corner2.y)),
    )
}
