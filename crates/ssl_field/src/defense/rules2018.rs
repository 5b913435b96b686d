//! Rectangular defense area (rules since 2018)
//!
//! The area itself is a `defense_width` x `defense_height` rectangle on the
//! goal line. Moving the perimeter out by `extra` rounds the two field facing
//! corners with radius `extra`, giving the traversal
//! side line, arc, front line, arc, side line.
//!
//! Ray and way computations are done in opponent coordinates and mirrored
//! with the factor `f = -1` for the friendly side.

use std::f64::consts::{FRAC_PI_2, PI};

use super::{finish_hits, BoundarySegment, DefenseHit, DefenseRules, Side};
use crate::error::Result;
use crate::geom::{bound_rect, inside_rect, intersect_circle_circle, intersect_line_circle, intersect_line_line};
use crate::geom::{intersect_ray_arc, Vector, VectorExt};
use crate::geometry::{FieldGeometry, RuleVersion};

/// Squared distance within which a ray running along an edge counts as
/// starting at that edge's first corner
const EDGE_START_DIST_SQ: f64 = 0.0001;

#[derive(Debug, Clone, PartialEq)]
pub struct Rules2018 {
    width: f64,
    width_half: f64,
    height: f64,
    field_height_half: f64,
}

/// One straight piece of the perimeter in opponent coordinates
struct Edge {
    start: Vector,
    dir: Vector,
    length: f64,
    segment: BoundarySegment,
}

impl Rules2018 {
    pub fn new(geometry: &FieldGeometry) -> Self {
        Self {
            width: geometry.defense_width,
            width_half: geometry.defense_width_half,
            height: geometry.defense_height,
            field_height_half: geometry.field_height_half,
        }
    }

    /// (min, max) corners of the plain rectangle for `side`
    fn rect(&self, side: Side) -> (Vector, Vector) {
        let min = Vector::new(-self.width_half, self.field_height_half - self.height);
        let max = Vector::new(self.width_half, self.field_height_half);
        match side {
            Side::Opponent => (min, max),
            Side::Friendly => (-max, -min),
        }
    }

    /// Side line, front line and side line of the perimeter moved out by `extra`
    fn edges(&self, extra: f64) -> [Edge; 3] {
        let (wh, h, hgt) = (self.width_half, self.field_height_half, self.height);
        [
            Edge {
                start: Vector::new(wh + extra, h),
                dir: Vector::new(0.0, -1.0),
                length: hgt,
                segment: BoundarySegment::StartLine,
            },
            Edge {
                start: Vector::new(wh, h - hgt - extra),
                dir: Vector::new(-1.0, 0.0),
                length: self.width,
                segment: BoundarySegment::FrontLine,
            },
            Edge {
                start: Vector::new(-wh - extra, h - hgt),
                dir: Vector::new(0.0, 1.0),
                length: hgt,
                segment: BoundarySegment::EndLine,
            },
        ]
    }

    /// Center of the rounded corner following edge `i` (0 or 1), opponent coordinates
    fn arc_center(&self, i: usize) -> Vector {
        let x = if i == 0 { self.width_half } else { -self.width_half };
        Vector::new(x, self.field_height_half - self.height)
    }
}

impl DefenseRules for Rules2018 {
    fn version(&self) -> RuleVersion {
        RuleVersion::V2018
    }

    fn is_in_defense_area(&self, pos: Vector, radius: f64, side: Side) -> bool {
        if radius < 0.0 {
            // shrunk rectangle, empty once the shrink exceeds its size
            let min = Vector::new(-self.width_half - radius, self.field_height_half - self.height - radius);
            let max = Vector::new(self.width_half + radius, self.field_height_half + radius);
            let (min, max) = if side.is_friendly() { (-max, -min) } else { (min, max) };
            if min.x > max.x || min.y > max.y {
                return false;
            }
            return inside_rect(min, max, pos);
        }
        self.distance_to_defense_area_sq(pos, side) <= radius * radius
    }

    fn distance_to_defense_area(&self, pos: Vector, radius: f64, side: Side) -> f64 {
        let (min, max) = self.rect(Side::Opponent);
        let pos = if side.is_friendly() { -pos } else { pos };
        if radius < 0.0 && self.is_in_defense_area(pos, 0.0, Side::Opponent) {
            let inner = (max.x - pos.x).min(pos.x - min.x).min(max.y - pos.y).min(pos.y - min.y);
            return (-(inner + radius)).max(0.0);
        }
        (pos.distance_to(&bound_rect(min, pos, max)) - radius).max(0.0)
    }

    fn distance_to_defense_area_sq(&self, pos: Vector, side: Side) -> f64 {
        let (min, max) = self.rect(side);
        pos.distance_to_sq(&bound_rect(min, pos, max))
    }

    fn intersections_ray_defense_area(&self, pos: Vector, dir: Vector, extra: f64, side: Side) -> Vec<DefenseHit> {
        let dir = dir.normalized_or_zero();
        if dir == Vector::zeros() {
            return Vec::new();
        }
        let f = side.goal_sign();
        let rotation = if side.is_friendly() { 0.0 } else { PI };

        let mut hits = Vec::with_capacity(4);
        let mut way = 0.0;
        for (i, edge) in self.edges(extra).iter().enumerate() {
            let start = edge.start * f;
            if let Some(line) = intersect_line_line(pos, dir, start, edge.dir * f) {
                let on_edge = line.t1 >= 0.0 && line.t2 >= 0.0 && line.t2 <= edge.length;
                // collinear rays report the ray origin, only accept it at the edge start
                let collinear = line.t1 == 0.0 && line.t2 == 0.0;
                if on_edge && (!collinear || line.point.distance_to_sq(&start) < EDGE_START_DIST_SQ) {
                    hits.push(DefenseHit {
                        point: line.point,
                        way: way + line.t2,
                        lambda: line.t1,
                        segment: edge.segment,
                    });
                }
            }
            way += edge.length;

            if i < 2 && extra > 0.0 {
                let step = (i + 1) as f64 * FRAC_PI_2;
                let min_angle = PI - step + rotation;
                let max_angle = 1.5 * PI - step + rotation;
                let segment = if i == 0 { BoundarySegment::StartArc } else { BoundarySegment::EndArc };
                for arc in intersect_ray_arc(pos, dir, self.arc_center(i) * f, extra, min_angle, max_angle) {
                    hits.push(DefenseHit {
                        point: arc.point,
                        way: way + (FRAC_PI_2 - arc.angle_offset) * extra,
                        lambda: arc.lambda,
                        segment,
                    });
                }
            }
            way += PI * extra / 2.0;
        }
        finish_hits(hits)
    }

    /// Ways below 0 or above the maximum continue on the extended side lines.
    fn defense_intersection_by_way(&self, way: f64, extra: f64, side: Side) -> Result<Vector> {
        let f = side.goal_sign();
        let mut way = way;
        let [first, front, last] = self.edges(extra);
        for (i, edge) in [first, front].iter().enumerate() {
            if way <= edge.length {
                return Ok((edge.start + edge.dir * way) * f);
            }
            way -= edge.length + FRAC_PI_2 * extra;
            if way < 0.0 && extra > 0.0 {
                let dir = Vector::from_angle(-FRAC_PI_2 * (i + 1) as f64 - way / extra);
                return Ok((self.arc_center(i) + dir * extra) * f);
            }
        }
        Ok((last.start + last.dir * way) * f)
    }

    fn corner_points_between_ways(&self, way1: f64, way2: f64, radius: f64, side: Side) -> Vec<Vector> {
        let smaller = way1.min(way2);
        let larger = way1.max(way2);
        let left_way = self.height + PI * radius / 4.0;
        let right_way = self.height + self.width + 3.0 * PI * radius / 4.0;
        let corner_y = -self.field_height_half + self.height;
        let flip = if side.is_friendly() { 1.0 } else { -1.0 };

        let mut corners = Vec::with_capacity(2);
        if smaller < left_way && left_way < larger {
            let left = Vector::new(-self.width_half, corner_y) + Vector::new(-1.0, 1.0).with_length(radius);
            corners.push(left * flip);
        }
        if smaller < right_way && right_way < larger {
            let right = Vector::new(self.width_half, corner_y) + Vector::new(1.0, 1.0).with_length(radius);
            corners.push(right * flip);
        }
        if corners.len() == 2 && way1 > way2 {
            corners.swap(0, 1);
        }
        corners
    }

    fn max_way(&self, radius: f64) -> f64 {
        2.0 * self.height + self.width + PI * radius
    }

    fn intersect_circle_defense_area(&self, pos: Vector, radius: f64, extra: f64, side: Side) -> Vec<Vector> {
        if !self.is_in_defense_area(pos, radius + extra, side) {
            return Vec::new();
        }
        let (wh, h, hgt) = (self.width_half, self.field_height_half, self.height);
        let corners = [
            Vector::new(wh, h),
            Vector::new(wh, h - hgt),
            Vector::new(-wh, h - hgt),
            Vector::new(-wh, h),
        ];
        let offsets = [
            Vector::new(extra, 0.0),
            Vector::new(0.0, -extra),
            Vector::new(-extra, 0.0),
            Vector::new(0.0, extra),
        ];
        let pos = if side.is_friendly() { -pos } else { pos };

        let mut points = Vec::with_capacity(4);
        let mut dir_prev = corners[0] - corners[3];
        for i in 0..3 {
            let dir = corners[(i + 1) % 4] - corners[i];
            if i > 0 {
                if let Some(arc) = intersect_circle_circle(Vector::zeros(), extra, pos - corners[i], radius) {
                    points.extend(
                        arc.points()
                            .filter(|p| p.inside_sector(&dir_prev, &-dir))
                            .map(|p| p + corners[i]),
                    );
                }
            }
            dir_prev = dir;

            let length_sq = dir.norm_squared();
            if let Some(line) = intersect_line_circle(corners[i] + offsets[i], dir, pos, radius) {
                points.extend(
                    line.hits()
                        .filter(|hit| hit.lambda >= 0.0 && hit.lambda * hit.lambda < length_sq)
                        .map(|hit| hit.point),
                );
            }
        }

        if side.is_friendly() {
            points.iter_mut().for_each(|p| *p = -*p);
        }
        points
    }

    fn push_out_of_defense_area(&self, pos: Vector, extra: f64, side: Side) -> Vector {
        let sign = side.goal_sign();
        let target_y = sign * (self.field_height_half - self.height - extra);
        let target_x = self.width_half + extra;
        // distance to the front line, measured towards the field center
        let dy = (pos.y - target_y) * sign;
        let dx = target_x - pos.x.abs();
        if dx > dy {
            Vector::new(pos.x, target_y)
        } else {
            Vector::new(pos.x.signum() * target_x, pos.y)
        }
    }

    fn baseline_intersection_distance(&self) -> f64 {
        self.width_half
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::GeometryMessage;

    const EPS: f64 = 1e-9;

    /// 2.4 x 1.2 defense area, field 12 x 9
    fn rules() -> Rules2018 {
        Rules2018::new(&FieldGeometry::from_message(&GeometryMessage::division_a()).unwrap())
    }

    fn v(x: f64, y: f64) -> Vector {
        Vector::new(x, y)
    }

    #[test]
    fn test_opponent_area_scenario() {
        let r = rules();
        assert!(r.is_in_defense_area(v(0.0, 5.0), 0.0, Side::Opponent));
        assert!(!r.is_in_defense_area(v(0.0, 4.7), 0.0, Side::Opponent));
        assert!(r.is_in_defense_area(v(0.0, 4.7), 0.35, Side::Opponent));
        assert!(!r.is_in_defense_area(v(0.0, 5.0), 0.0, Side::Friendly));
    }

    #[test]
    fn test_negative_radius_shrinks_rectangle() {
        let r = rules();
        assert!(r.is_in_defense_area(v(0.0, -5.0), -0.1, Side::Friendly));
        assert!(!r.is_in_defense_area(v(0.0, -4.85), -0.1, Side::Friendly));
        assert!(!r.is_in_defense_area(v(1.15, 5.5), -0.1, Side::Opponent));
        // shrunk past its own height
        assert!(!r.is_in_defense_area(v(0.0, 5.5), -0.7, Side::Opponent));
    }

    #[test]
    fn test_distance() {
        let r = rules();
        assert!((r.distance_to_defense_area(v(0.0, 0.0), 0.0, Side::Opponent) - 4.8).abs() < EPS);
        assert!((r.distance_to_defense_area(v(2.2, -4.8), 0.5, Side::Friendly) - 0.5).abs() < EPS);
        assert_eq!(r.distance_to_defense_area(v(0.0, 5.0), 0.0, Side::Opponent), 0.0);
        assert!((r.distance_to_defense_area_sq(v(4.2, 4.8), Side::Opponent) - 9.0).abs() < EPS);
    }

    #[test]
    fn test_distance_negative_radius_inside() {
        let r = rules();
        // 0.2 from the front line, shrinking by 0.5 leaves it 0.3 outside
        assert!((r.distance_to_defense_area(v(0.0, 5.0), -0.5, Side::Opponent) - 0.3).abs() < EPS);
        assert_eq!(r.distance_to_defense_area(v(0.0, 5.0), -0.1, Side::Opponent), 0.0);
    }

    #[test]
    fn test_ray_front_line() {
        let r = rules();
        let hit = r.intersect_ray_defense_area(v(0.3, 0.0), v(0.0, 2.0), 0.0, Side::Opponent).unwrap();
        assert!((hit.point - v(0.3, 4.8)).norm() < EPS);
        assert!((hit.lambda - 4.8).abs() < EPS);
        assert_eq!(hit.segment, BoundarySegment::FrontLine);
        assert!((hit.way - (1.2 + 0.9)).abs() < EPS);
    }

    #[test]
    fn test_ray_picks_first_forward_hit() {
        let r = rules();
        // crosses both side lines of the friendly area
        let hits = r.intersections_ray_defense_area(v(-3.0, -5.5), v(1.0, 0.0), 0.0, Side::Friendly);
        assert_eq!(hits.len(), 2);
        assert!((hits[0].point - v(-1.2, -5.5)).norm() < EPS);
        assert_eq!(hits[0].segment, BoundarySegment::StartLine);
        assert!((hits[1].point - v(1.2, -5.5)).norm() < EPS);
        assert_eq!(hits[1].segment, BoundarySegment::EndLine);
        let first = r.intersect_ray_defense_area(v(-3.0, -5.5), v(1.0, 0.0), 0.0, Side::Friendly).unwrap();
        assert_eq!(first, hits[0]);
    }

    #[test]
    fn test_ray_through_rounded_corner() {
        let r = rules();
        let extra = 0.2;
        // diagonal towards the opponent area's corner at (1.2, 4.8)
        let dir = v(-1.0, 1.0);
        let hit = r.intersect_ray_defense_area(v(3.0, 3.0), dir, extra, Side::Opponent).unwrap();
        assert_eq!(hit.segment, BoundarySegment::StartArc);
        assert!((hit.point.distance_to(&v(1.2, 4.8)) - extra).abs() < 1e-6);
        let back = r.defense_intersection_by_way(hit.way, extra, Side::Opponent).unwrap();
        assert!((back - hit.point).norm() < 1e-6);
    }

    #[test]
    fn test_way_endpoints() {
        let r = rules();
        let total = r.max_way(0.0);
        assert!((total - 4.8).abs() < EPS);
        let start = r.defense_intersection_by_way(0.0, 0.0, Side::Opponent).unwrap();
        assert!((start - v(1.2, 6.0)).norm() < EPS);
        let end = r.defense_intersection_by_way(total, 0.0, Side::Opponent).unwrap();
        assert!((end - v(-1.2, 6.0)).norm() < EPS);
        let friendly_start = r.defense_intersection_by_way(0.0, 0.0, Side::Friendly).unwrap();
        assert!((friendly_start - v(-1.2, -6.0)).norm() < EPS);
        // negative way continues the side line behind the goal line
        let behind = r.defense_intersection_by_way(-0.5, 0.0, Side::Opponent).unwrap();
        assert!((behind - v(1.2, 6.5)).norm() < EPS);
    }

    #[test]
    fn test_way_on_arc() {
        let r = rules();
        let extra = 0.3;
        // middle of the first arc
        let way = 1.2 + PI * extra / 4.0;
        let p = r.defense_intersection_by_way(way, extra, Side::Opponent).unwrap();
        let expected = v(1.2, 4.8) + v(1.0, -1.0).with_length(extra);
        assert!((p - expected).norm() < EPS);
    }

    #[test]
    fn test_corner_points() {
        let r = rules();
        let radius = 0.1;
        let max = r.max_way(radius);
        let corners = r.corner_points_between_ways(0.0, max, radius, Side::Friendly);
        assert_eq!(corners.len(), 2);
        assert!(corners[0].x < 0.0 && corners[1].x > 0.0);
        let reversed = r.corner_points_between_ways(max, 0.0, radius, Side::Friendly);
        assert_eq!(reversed[0], corners[1]);
        assert_eq!(reversed[1], corners[0]);

        let opponent = r.corner_points_between_ways(0.0, 1.0, radius, Side::Opponent);
        assert!(opponent.is_empty());
        let opponent = r.corner_points_between_ways(0.0, 2.0, radius, Side::Opponent);
        assert_eq!(opponent.len(), 1);
        assert!((opponent[0] - (v(1.2, 4.8) + v(1.0, -1.0).with_length(radius))).norm() < EPS);
    }

    #[test]
    fn test_corner_points_exclude_exact_way() {
        let r = rules();
        let left_way = 1.2;
        assert!(r.corner_points_between_ways(left_way, 2.0, 0.0, Side::Friendly).is_empty());
    }

    #[test]
    fn test_intersect_circle() {
        let r = rules();
        // circle on the front line crossing it twice
        let points = r.intersect_circle_defense_area(v(0.0, 4.8), 0.3, 0.0, Side::Opponent);
        assert_eq!(points.len(), 2);
        assert!(points.iter().all(|p| (p.y - 4.8).abs() < EPS));

        let friendly = r.intersect_circle_defense_area(v(0.0, -4.8), 0.3, 0.0, Side::Friendly);
        assert_eq!(friendly.len(), 2);
        assert!(friendly.iter().all(|p| (p.y + 4.8).abs() < EPS));

        assert!(r.intersect_circle_defense_area(v(0.0, 0.0), 0.3, 0.0, Side::Opponent).is_empty());
    }

    #[test]
    fn test_intersect_circle_rounded_corner() {
        let r = rules();
        let extra = 0.2;
        let points = r.intersect_circle_defense_area(v(1.5, 4.5), 0.3, extra, Side::Opponent);
        assert!(!points.is_empty());
        for p in points {
            assert!((p.distance_to(&v(1.5, 4.5)) - 0.3).abs() < 1e-6);
        }
    }

    #[test]
    fn test_push_out() {
        let r = rules();
        // closer to the front line
        let p = r.push_out_of_defense_area(v(0.2, -5.0), 0.1, Side::Friendly);
        assert!((p - v(0.2, -4.7)).norm() < EPS);
        // closer to the side line
        let p = r.push_out_of_defense_area(v(1.1, 5.8), 0.1, Side::Opponent);
        assert!((p - v(1.3, 5.8)).norm() < EPS);
        let p = r.push_out_of_defense_area(v(-1.1, 5.8), 0.0, Side::Opponent);
        assert!((p - v(-1.2, 5.8)).norm() < EPS);
    }
}
