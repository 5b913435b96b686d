//! Line, circle, arc and corridor intersections
//!
//! All functions are pure. A missing intersection is `None` (or an empty
//! list); only the corridor with a zero-length axis is an error.
//!
//! ## Parametrization
//! Lines are given as `offset + lambda * dir`. Unless stated otherwise the
//! returned `lambda` is relative to the given (not normalized) direction.

use super::angle::normalize_angle_positive;
use super::vector::{Vector, VectorExt};
use crate::error::{FieldError, Result};

/// Relative tolerance for treating two directions as parallel
const PARALLEL_EPS: f64 = 0.0001;

/// Discriminant below which a line touches a circle in a single point
const TANGENT_DISCRIMINANT: f64 = 0.00001;

// ============================================================================
// Result types
// ============================================================================

/// Intersection of two lines: `point = p1 + t1 * d1 = p2 + t2 * d2`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineIntersection {
    pub point: Vector,
    pub t1: f64,
    pub t2: f64,
}

/// A point on a line together with its (normalized) line parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineHit {
    pub point: Vector,
    pub lambda: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineCircleIntersection {
    /// The line touches the circle
    Tangent(LineHit),
    /// Two crossings, the first one has the larger lambda
    Secant(LineHit, LineHit),
}

impl LineCircleIntersection {
    pub fn hits(self) -> impl Iterator<Item = LineHit> {
        let (first, second) = match self {
            LineCircleIntersection::Tangent(hit) => (hit, None),
            LineCircleIntersection::Secant(a, b) => (a, Some(b)),
        };
        std::iter::once(first).chain(second)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CircleCircleIntersection {
    Touching(Vector),
    /// Two crossings, ordered by descending x
    Crossing(Vector, Vector),
}

impl CircleCircleIntersection {
    pub fn points(self) -> impl Iterator<Item = Vector> {
        let (first, second) = match self {
            CircleCircleIntersection::Touching(p) => (p, None),
            CircleCircleIntersection::Crossing(a, b) => (a, Some(b)),
        };
        std::iter::once(first).chain(second)
    }
}

/// Forward hit of a ray with a circular arc
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcHit {
    pub point: Vector,
    /// Angle between the arc start and the hit, in [0, arc interval)
    pub angle_offset: f64,
    /// Distance along the (normalized) ray
    pub lambda: f64,
}

/// Intersection of a line with a corridor (strip between two parallel lines)
///
/// When the whole line runs inside the corridor there are no boundary points
/// and all parameters are `-inf`/`+inf`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorridorIntersection {
    /// Entry and exit point, `None` if the line lies inside the corridor
    pub points: Option<(Vector, Vector)>,
    /// Line parameters of both points, sorted ascending
    pub line_lambdas: (f64, f64),
    /// Parameters of both points along the corridor axis
    pub corridor_lambdas: (f64, f64),
}

impl CorridorIntersection {
    fn inside() -> Self {
        Self {
            points: None,
            line_lambdas: (f64::NEG_INFINITY, f64::INFINITY),
            corridor_lambdas: (f64::NEG_INFINITY, f64::INFINITY),
        }
    }

    pub fn is_inside(&self) -> bool {
        self.points.is_none()
    }
}

// ============================================================================
// Lines
// ============================================================================

/// Intersects the lines `p1 + t1 * d1` and `p2 + t2 * d2`.
///
/// Parallel lines have no intersection, except identical lines which return
/// `p1` with `t1 = t2 = 0` (any point would do).
pub fn intersect_line_line(p1: Vector, d1: Vector, p2: Vector, d2: Vector) -> Option<LineIntersection> {
    let len1 = d1.norm();
    let len2 = d2.norm();
    if len1 == 0.0 || len2 == 0.0 {
        return None;
    }

    let normal1 = d1.perpendicular();
    let normal2 = d2.perpendicular();
    let diff = p2 - p1;

    if (normal1.dot(&d2) / (len1 * len2)).abs() < PARALLEL_EPS {
        // distance of p2 to line 1
        if (normal1.dot(&diff) / len1).abs() < PARALLEL_EPS {
            return Some(LineIntersection { point: p1, t1: 0.0, t2: 0.0 });
        }
        return None;
    }

    let t1 = normal2.dot(&diff) / normal2.dot(&d1);
    let t2 = -normal1.dot(&diff) / normal1.dot(&d2);
    Some(LineIntersection { point: p1 + d1 * t1, t1, t2 })
}

/// Intersects the line through `p1`/`p2` with the line through `q1`/`q2`
pub fn intersect_lines_by_points(p1: Vector, p2: Vector, q1: Vector, q2: Vector) -> Option<LineIntersection> {
    intersect_line_line(p1, p2 - p1, q1, q2 - q1)
}

// ============================================================================
// Circles
// ============================================================================

/// Intersects a line with a circle. Lambdas refer to the normalized direction.
pub fn intersect_line_circle(
    offset: Vector,
    dir: Vector,
    center: Vector,
    radius: f64,
) -> Option<LineCircleIntersection> {
    let dir = dir.normalized_or_zero();
    if dir == Vector::zeros() {
        return None;
    }
    let const_part = offset - center;

    // |offset + lambda * dir - center| = radius, with |dir| = 1
    let b = 2.0 * dir.dot(&const_part);
    let c = const_part.dot(&const_part) - radius * radius;
    let det = b * b - 4.0 * c;

    if det < 0.0 {
        return None;
    }
    if det < TANGENT_DISCRIMINANT {
        let lambda = -b / 2.0;
        return Some(LineCircleIntersection::Tangent(LineHit { point: offset + dir * lambda, lambda }));
    }

    let root = det.sqrt();
    let lambda1 = (-b + root) / 2.0;
    let lambda2 = (-b - root) / 2.0;
    Some(LineCircleIntersection::Secant(
        LineHit { point: offset + dir * lambda1, lambda: lambda1 },
        LineHit { point: offset + dir * lambda2, lambda: lambda2 },
    ))
}

/// Intersects two circles
pub fn intersect_circle_circle(c1: Vector, r1: f64, c2: Vector, r2: f64) -> Option<CircleCircleIntersection> {
    let dist = c1.distance_to(&c2);
    if dist > r1 + r2 {
        return None;
    }
    if dist == r1 + r2 {
        return Some(CircleCircleIntersection::Touching(c1 + (c2 - c1) * 0.5));
    }
    if dist == 0.0 {
        return None;
    }

    // distance from c1 to the radical line, then half chord length
    let a = (r1 * r1 - r2 * r2 + dist * dist) / (2.0 * dist);
    let h_sq = r1 * r1 - a * a;
    if h_sq < 0.0 {
        // one circle lies inside the other
        return None;
    }
    let axis = (c2 - c1) / dist;
    let base = c1 + axis * a;
    let offset = axis.perpendicular() * h_sq.sqrt();
    let (p, q) = (base + offset, base - offset);
    if p.x >= q.x {
        Some(CircleCircleIntersection::Crossing(p, q))
    } else {
        Some(CircleCircleIntersection::Crossing(q, p))
    }
}

/// Points where the tangents from `point` touch the circle
pub fn tangents_to_circle(point: Vector, center: Vector, radius: f64) -> Option<CircleCircleIntersection> {
    intersect_circle_circle(center, radius, center + (point - center) * 0.5, 0.5 * center.distance_to(&point))
}

/// Inner tangents of two separate circles.
///
/// Returns the point where both inner tangents cross and the point where the
/// first tangent touches circle 1, `None` if the circles overlap.
pub fn inner_tangents_to_circles(c1: Vector, r1: f64, c2: Vector, r2: f64) -> Option<(Vector, Option<Vector>)> {
    let d = c2 - c1;
    if d.norm() <= r1 + r2 {
        return None;
    }
    let crossing = c1 + d * (r1 / (r1 + r2));
    let touch = tangents_to_circle(crossing, c1, r1).and_then(|t| t.points().next());
    Some((crossing, touch))
}

// ============================================================================
// Arcs and corridors
// ============================================================================

/// Forward hits (lambda >= 0) of a ray with the arc of the circle around
/// `center` from `min_angle` counterclockwise to `max_angle` (end exclusive).
pub fn intersect_ray_arc(
    pos: Vector,
    dir: Vector,
    center: Vector,
    radius: f64,
    min_angle: f64,
    max_angle: f64,
) -> Vec<ArcHit> {
    let Some(intersection) = intersect_line_circle(pos, dir, center, radius) else {
        return Vec::new();
    };
    let interval = normalize_angle_positive(max_angle - min_angle);
    intersection
        .hits()
        .filter(|hit| hit.lambda >= 0.0)
        .filter_map(|hit| {
            let angle_offset = normalize_angle_positive((hit.point - center).heading() - min_angle);
            (angle_offset < interval).then_some(ArcHit { point: hit.point, angle_offset, lambda: hit.lambda })
        })
        .collect()
}

/// Intersects the line `offset + lambda * dir` with the corridor of half
/// width `half_width` around the axis `corridor_offset + mu * corridor_dir`.
pub fn intersect_line_corridor(
    offset: Vector,
    dir: Vector,
    corridor_offset: Vector,
    corridor_dir: Vector,
    half_width: f64,
) -> Result<Option<CorridorIntersection>> {
    if corridor_dir == Vector::zeros() {
        return Err(FieldError::DegenerateCorridor);
    }
    let side = corridor_dir.perpendicular().with_length(half_width);
    let left = corridor_offset + side;
    let right = corridor_offset - side;

    let left_hit = intersect_line_line(offset, dir, left, corridor_dir);
    let (Some(left_hit), false) = (left_hit, dir == Vector::zeros()) else {
        let left_distance = offset.orthogonal_distance(&left, &(left + corridor_dir));
        let right_distance = offset.orthogonal_distance(&right, &(right + corridor_dir));
        if left_distance.abs() <= half_width * 2.0 && right_distance.abs() <= half_width * 2.0 {
            return Ok(Some(CorridorIntersection::inside()));
        }
        return Ok(None);
    };
    let Some(right_hit) = intersect_line_line(offset, dir, right, corridor_dir) else {
        return Ok(None);
    };

    let (first, second) = if right_hit.t1 < left_hit.t1 { (right_hit, left_hit) } else { (left_hit, right_hit) };
    Ok(Some(CorridorIntersection {
        points: Some((first.point, second.point)),
        line_lambdas: (first.t1, second.t1),
        corridor_lambdas: (first.t2, second.t2),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const EPS: f64 = 1e-9;

    fn v(x: f64, y: f64) -> Vector {
        Vector::new(x, y)
    }

    #[test]
    fn test_line_line_crossing() {
        let hit = intersect_line_line(v(0.0, 0.0), v(1.0, 0.0), v(2.0, -1.0), v(0.0, 2.0)).unwrap();
        assert!((hit.point - v(2.0, 0.0)).norm() < EPS);
        assert!((hit.t1 - 2.0).abs() < EPS);
        assert!((hit.t2 - 0.5).abs() < EPS);
    }

    #[test]
    fn test_line_line_identical_lines() {
        let p1 = v(1.0, 1.0);
        let hit = intersect_line_line(p1, v(1.0, 1.0), v(3.0, 3.0), v(-2.0, -2.0)).unwrap();
        assert_eq!(hit.point, p1);
        assert_eq!(hit.t1, 0.0);
        assert_eq!(hit.t2, 0.0);
    }

    #[test]
    fn test_line_line_parallel_distinct() {
        assert!(intersect_line_line(v(0.0, 0.0), v(1.0, 0.0), v(0.0, 1.0), v(1.0, 0.0)).is_none());
        assert!(intersect_line_line(v(0.0, 0.0), v(0.0, 0.0), v(0.0, 1.0), v(1.0, 0.0)).is_none());
    }

    #[test]
    fn test_lines_by_points() {
        let hit = intersect_lines_by_points(v(0.0, 0.0), v(2.0, 2.0), v(0.0, 2.0), v(2.0, 0.0)).unwrap();
        assert!((hit.point - v(1.0, 1.0)).norm() < EPS);
        assert!((hit.t1 - 0.5).abs() < EPS);
    }

    #[test]
    fn test_line_circle_secant_order() {
        let result = intersect_line_circle(v(-5.0, 0.0), v(2.0, 0.0), v(0.0, 0.0), 1.0).unwrap();
        let LineCircleIntersection::Secant(first, second) = result else {
            panic!("expected two intersections");
        };
        assert!(first.lambda > second.lambda);
        assert!((first.lambda - 6.0).abs() < EPS);
        assert!((second.point - v(-1.0, 0.0)).norm() < EPS);
        assert_eq!(result.hits().count(), 2);
    }

    #[test]
    fn test_line_circle_tangent_and_miss() {
        let result = intersect_line_circle(v(-5.0, 1.0), v(1.0, 0.0), v(0.0, 0.0), 1.0).unwrap();
        let LineCircleIntersection::Tangent(hit) = result else {
            panic!("expected tangent");
        };
        assert!((hit.point - v(0.0, 1.0)).norm() < 1e-6);
        assert!(intersect_line_circle(v(-5.0, 2.0), v(1.0, 0.0), v(0.0, 0.0), 1.0).is_none());
    }

    #[test]
    fn test_circle_circle() {
        assert!(intersect_circle_circle(v(0.0, 0.0), 1.0, v(5.0, 0.0), 1.0).is_none());

        let touching = intersect_circle_circle(v(0.0, 0.0), 1.0, v(2.0, 0.0), 1.0).unwrap();
        assert_eq!(touching, CircleCircleIntersection::Touching(v(1.0, 0.0)));

        let CircleCircleIntersection::Crossing(a, b) =
            intersect_circle_circle(v(0.0, 0.0), 1.0, v(1.0, 1.0), 1.0).unwrap()
        else {
            panic!("expected two intersections");
        };
        assert!(a.x >= b.x);
        assert!((a - v(1.0, 0.0)).norm() < EPS);
        assert!((b - v(0.0, 1.0)).norm() < EPS);
    }

    #[test]
    fn test_circle_circle_vertical_axis() {
        // centers share the same x coordinate
        let CircleCircleIntersection::Crossing(a, b) =
            intersect_circle_circle(v(0.0, 0.0), 1.0, v(0.0, 1.0), 1.0).unwrap()
        else {
            panic!("expected two intersections");
        };
        let h = (0.75f64).sqrt();
        assert!((a - v(h, 0.5)).norm() < EPS);
        assert!((b - v(-h, 0.5)).norm() < EPS);
    }

    #[test]
    fn test_circle_circle_nested() {
        assert!(intersect_circle_circle(v(0.0, 0.0), 3.0, v(0.5, 0.0), 1.0).is_none());
        assert!(intersect_circle_circle(v(0.0, 0.0), 3.0, v(0.0, 0.0), 1.0).is_none());
    }

    #[test]
    fn test_tangents_to_circle() {
        let touch: Vec<Vector> =
            tangents_to_circle(v(2.0, 0.0), v(0.0, 0.0), 1.0).unwrap().points().collect();
        assert_eq!(touch.len(), 2);
        for p in touch {
            assert!((p.norm() - 1.0).abs() < EPS);
            // radius is orthogonal to the tangent
            assert!(p.dot(&(v(2.0, 0.0) - p)).abs() < EPS);
        }
    }

    #[test]
    fn test_inner_tangents() {
        let (crossing, touch) = inner_tangents_to_circles(v(0.0, 0.0), 1.0, v(6.0, 0.0), 2.0).unwrap();
        assert!((crossing - v(2.0, 0.0)).norm() < EPS);
        let touch = touch.unwrap();
        assert!((touch.norm() - 1.0).abs() < EPS);
        assert!(inner_tangents_to_circles(v(0.0, 0.0), 1.0, v(2.0, 0.0), 2.0).is_none());
    }

    #[test]
    fn test_ray_arc_filters_sector_and_direction() {
        // upper half circle, ray going up along the y axis from below
        let hits = intersect_ray_arc(v(0.0, -3.0), v(0.0, 1.0), v(0.0, 0.0), 1.0, 0.0, PI);
        assert_eq!(hits.len(), 1);
        assert!((hits[0].point - v(0.0, 1.0)).norm() < EPS);
        assert!((hits[0].angle_offset - PI / 2.0).abs() < EPS);
        assert!((hits[0].lambda - 4.0).abs() < EPS);

        // ray pointing away from the circle
        let hits = intersect_ray_arc(v(0.0, 3.0), v(0.0, 1.0), v(0.0, 0.0), 1.0, 0.0, PI);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_ray_arc_wrapping_sector() {
        // sector from 3pi/2 over 0 to pi/2 (right half)
        let hits = intersect_ray_arc(v(-3.0, 0.0), v(1.0, 0.0), v(0.0, 0.0), 1.0, 3.0 * PI / 2.0, PI / 2.0);
        assert_eq!(hits.len(), 1);
        assert!((hits[0].point - v(1.0, 0.0)).norm() < EPS);
        assert!((hits[0].angle_offset - PI / 2.0).abs() < EPS);
    }

    #[test]
    fn test_line_corridor_crossing() {
        let result = intersect_line_corridor(v(-5.0, -5.0), v(0.0, 1.0), v(0.0, 0.0), v(1.0, 0.0), 1.0)
            .unwrap()
            .unwrap();
        let (first, second) = result.points.unwrap();
        assert!(result.line_lambdas.0 <= result.line_lambdas.1);
        assert!((first - v(-5.0, -1.0)).norm() < EPS);
        assert!((second - v(-5.0, 1.0)).norm() < EPS);
        assert!((result.line_lambdas.0 - 4.0).abs() < EPS);
        assert!((result.corridor_lambdas.0 + 5.0).abs() < EPS);
    }

    #[test]
    fn test_line_corridor_parallel() {
        let inside = intersect_line_corridor(v(0.0, 0.5), v(1.0, 0.0), v(0.0, 0.0), v(1.0, 0.0), 1.0)
            .unwrap()
            .unwrap();
        assert!(inside.is_inside());
        assert_eq!(inside.line_lambdas, (f64::NEG_INFINITY, f64::INFINITY));

        let outside = intersect_line_corridor(v(0.0, 5.0), v(1.0, 0.0), v(0.0, 0.0), v(1.0, 0.0), 1.0).unwrap();
        assert!(outside.is_none());
    }

    #[test]
    fn test_line_corridor_zero_axis_is_error() {
        let result = intersect_line_corridor(v(0.0, 0.0), v(1.0, 0.0), v(0.0, 0.0), v(0.0, 0.0), 1.0);
        assert!(matches!(result, Err(FieldError::DegenerateCorridor)));
    }
}
