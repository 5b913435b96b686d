//! "Stadium" defense area (rules up to 2017)
//!
//! Quarter circle around each end of a straight stretch centered on the goal
//! line. The perimeter moved out by `extra` keeps this shape with radius
//! `defense_radius + extra`. Computations run for the opponent side and are
//! mirrored through the field center for the friendly side.

use std::f64::consts::{FRAC_PI_2, PI};

use tracing::{trace, warn};

use super::{finish_hits, BoundarySegment, DefenseHit, DefenseRules, Side};
use crate::error::{FieldError, Result};
use crate::geom::{intersect_circle_circle, intersect_line_circle, intersect_line_line, intersect_ray_arc};
use crate::geom::{normalize_angle_positive, Vector, VectorExt};
use crate::geometry::{FieldGeometry, RuleVersion};

/// A ray running along the stretch line only hits it when it starts at its center
const STRETCH_CENTER_DIST_SQ: f64 = 0.0001;

#[derive(Debug, Clone, PartialEq)]
pub struct Rules2017 {
    radius: f64,
    stretch: f64,
    stretch_half: f64,
    field_height_half: f64,
}

impl Rules2017 {
    pub fn new(geometry: &FieldGeometry) -> Self {
        Self {
            radius: geometry.defense_radius,
            stretch: geometry.defense_stretch,
            stretch_half: geometry.defense_stretch_half,
            field_height_half: geometry.field_height_half,
        }
    }

    /// Point on the goal line nearest to `pos` within the stretch
    fn anchor(&self, pos: Vector, side: Side) -> Vector {
        Vector::new(
            pos.x.clamp(-self.stretch_half, self.stretch_half),
            side.goal_sign() * self.field_height_half,
        )
    }

    /// (quarter arc length, total perimeter length) for the radius grown by `extra`
    fn ways(&self, radius: f64) -> (f64, f64) {
        let arcway = radius * FRAC_PI_2;
        (arcway, 2.0 * arcway + self.stretch)
    }
}

impl DefenseRules for Rules2017 {
    fn version(&self) -> RuleVersion {
        RuleVersion::V2017
    }

    fn is_in_defense_area(&self, pos: Vector, radius: f64, side: Side) -> bool {
        if radius < -self.radius {
            return false;
        }
        let total = self.radius + radius;
        pos.distance_to_sq(&self.anchor(pos, side)) <= total * total
    }

    fn distance_to_defense_area(&self, pos: Vector, radius: f64, side: Side) -> f64 {
        let distance = pos.distance_to(&self.anchor(pos, side)) - (radius + self.radius);
        distance.max(0.0)
    }

    fn distance_to_defense_area_sq(&self, pos: Vector, side: Side) -> f64 {
        let d = self.distance_to_defense_area(pos, 0.0, side);
        d * d
    }

    fn intersections_ray_defense_area(&self, pos: Vector, dir: Vector, extra: f64, side: Side) -> Vec<DefenseHit> {
        let radius = self.radius + extra;
        let dir = dir.normalized_or_zero();
        if radius < 0.0 || dir == Vector::zeros() {
            return Vec::new();
        }
        let (arcway, totalway) = self.ways(radius);

        // the way runs from the arc around `start_center` to the one around `end_center`
        let oppfac = -side.goal_sign();
        let start_center = Vector::new(-self.stretch_half, -self.field_height_half) * oppfac;
        let end_center = Vector::new(self.stretch_half, -self.field_height_half) * oppfac;

        let rotation = if side.is_friendly() { 0.0 } else { PI };
        let to_opponent = normalize_angle_positive(rotation + FRAC_PI_2);
        let to_friendly = normalize_angle_positive(rotation - FRAC_PI_2);

        let mut hits = Vec::with_capacity(4);
        for arc in intersect_ray_arc(pos, dir, start_center, radius, to_opponent, to_friendly) {
            hits.push(DefenseHit {
                point: arc.point,
                way: (FRAC_PI_2 - arc.angle_offset) * radius,
                lambda: arc.lambda,
                segment: BoundarySegment::StartArc,
            });
        }
        for arc in intersect_ray_arc(pos, dir, end_center, radius, to_friendly, to_opponent) {
            hits.push(DefenseHit {
                point: arc.point,
                way: (PI - arc.angle_offset) * radius + arcway + self.stretch,
                lambda: arc.lambda,
                segment: BoundarySegment::EndArc,
            });
        }

        // stretch parameter runs in traversal direction for both sides
        let stretch_onpoint = Vector::new(0.0, -self.field_height_half + radius) * oppfac;
        if let Some(line) = intersect_line_line(pos, dir, stretch_onpoint, Vector::new(oppfac, 0.0)) {
            // collinear rays report the ray origin, the arcs already cover the stretch ends
            let collinear = line.t1 == 0.0 && line.t2 == 0.0;
            let on_stretch = line.t1 >= 0.0 && line.t2.abs() <= self.stretch_half;
            if on_stretch && (!collinear || line.point.distance_to_sq(&stretch_onpoint) < STRETCH_CENTER_DIST_SQ) {
                hits.push(DefenseHit {
                    point: line.point,
                    way: line.t2 + totalway / 2.0,
                    lambda: line.t1,
                    segment: BoundarySegment::FrontLine,
                });
            }
        }
        finish_hits(hits)
    }

    fn defense_intersection_by_way(&self, way: f64, extra: f64, side: Side) -> Result<Vector> {
        let radius = self.radius + extra;
        if radius < 0.0 {
            return Err(FieldError::NegativeDefenseRadius { extra });
        }
        let (arcway, totalway) = self.ways(radius);

        // mirror into [0, totalway], accepts inputs from [-2 totalway, 2 totalway]
        let mut folded = way.abs();
        if folded > totalway {
            folded = 2.0 * totalway - folded;
        }
        if folded != way {
            trace!(way, folded, totalway, "folded defense way");
        }
        if folded < 0.0 {
            warn!(way, extra, "defense way out of range after folding");
            return Err(FieldError::WayOutOfRange { way, extra });
        }

        let point = if folded < arcway {
            Vector::from_angle(-folded / radius) * radius + Vector::new(self.stretch_half, self.field_height_half)
        } else if folded <= arcway + self.stretch {
            Vector::new(-folded + arcway + self.stretch_half, self.field_height_half - radius)
        } else {
            let angle = (folded - arcway - self.stretch) / radius;
            Vector::from_angle(-FRAC_PI_2 - angle) * radius + Vector::new(-self.stretch_half, self.field_height_half)
        };
        Ok(if side.is_friendly() { -point } else { point })
    }

    fn corner_points_between_ways(&self, _way1: f64, _way2: f64, _radius: f64, _side: Side) -> Vec<Vector> {
        Vec::new()
    }

    fn max_way(&self, radius: f64) -> f64 {
        self.stretch + PI * (radius + self.radius)
    }

    fn intersect_circle_defense_area(&self, pos: Vector, radius: f64, extra: f64, side: Side) -> Vec<Vector> {
        let pos = if side.is_friendly() { -pos } else { pos };
        let defense_radius = self.radius + extra;
        let (sh, h) = (self.stretch_half, self.field_height_half);

        let mut points = Vec::with_capacity(4);
        if let Some(left) = intersect_circle_circle(Vector::new(-sh, h), defense_radius, pos, radius) {
            points.extend(left.points().filter(|p| p.x <= -sh && p.y <= h));
        }
        if let Some(right) = intersect_circle_circle(Vector::new(sh, h), defense_radius, pos, radius) {
            points.extend(right.points().filter(|p| p.x >= sh && p.y <= h));
        }
        if let Some(line) = intersect_line_circle(Vector::new(0.0, h - defense_radius), Vector::new(1.0, 0.0), pos, radius) {
            points.extend(line.hits().map(|hit| hit.point).filter(|p| p.x.abs() <= sh));
        }

        if side.is_friendly() {
            points.iter_mut().for_each(|p| *p = -*p);
        }
        points
    }

    fn push_out_of_defense_area(&self, pos: Vector, extra: f64, side: Side) -> Vector {
        let sign = side.goal_sign();
        if pos.x.abs() <= self.stretch_half {
            return Vector::new(pos.x, sign * (self.field_height_half - self.radius - extra));
        }
        let mid = Vector::new(self.stretch_half * pos.x.signum(), sign * self.field_height_half);
        mid + (pos - mid).with_length(self.radius + extra)
    }

    fn baseline_intersection_distance(&self) -> f64 {
        self.radius + self.stretch_half
    }
}
