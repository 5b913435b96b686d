//! Field limiting and allowed region queries
//!
//! [`Field`] bundles the immutable [`FieldGeometry`] with the defense rules
//! selected for it. It is built once per geometry message and then passed by
//! reference to every consumer; it holds no mutable state.
//!
//! ## Allowed field
//! The field rectangle (plus the goal mouths) without both defense areas.

use tracing::debug;

use crate::defense::{rules_for, DefenseRules, Side};
use crate::error::Result;
use crate::geom::{inside_rect, intersect_line_line, LineHit, Vector, VectorExt};
use crate::geometry::{FieldGeometry, GeometryMessage, RuleVersion};

/// Clearance added to the free kick distance while the opponent area has to be kept free
const FREE_KICK_MARGIN: f64 = 0.10;

/// Crossings closer than this along a ray split it only once
const SAME_CROSSING_EPS: f64 = 1e-9;

/// Distance from a field corner that still counts as being in that corner
const CORNER_RADIUS: f64 = 1.0;

#[derive(Debug)]
pub struct Field {
    geometry: FieldGeometry,
    rules: Box<dyn DefenseRules>,
}

impl Field {
    pub fn new(geometry: FieldGeometry) -> Self {
        let rules = rules_for(&geometry);
        debug!(
            rule_version = %geometry.rule_version,
            field_width = geometry.field_width,
            field_height = geometry.field_height,
            defense_width = geometry.defense_width,
            defense_height = geometry.defense_height,
            defense_radius = geometry.defense_radius,
            "field geometry loaded"
        );
        Self { geometry, rules }
    }

    pub fn from_message(msg: &GeometryMessage) -> Result<Self> {
        Ok(Self::new(FieldGeometry::from_message(msg)?))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(FieldGeometry::from_json(json)?))
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(Self::new(FieldGeometry::from_yaml(yaml)?))
    }

    pub fn geometry(&self) -> &FieldGeometry {
        &self.geometry
    }

    pub fn rule_version(&self) -> RuleVersion {
        self.geometry.rule_version
    }

    /// Defense area queries of the selected rule version
    pub fn rules(&self) -> &dyn DefenseRules {
        self.rules.as_ref()
    }

    // ========================================================================
    // Field rectangle
    // ========================================================================

    /// Nearest position inside the field extended by `boundary_width`
    pub fn limit_to_field(&self, pos: Vector, boundary_width: f64) -> Vector {
        let width = self.geometry.field_width_half + boundary_width;
        let height = self.geometry.field_height_half + boundary_width;
        Vector::new(pos.x.clamp(-width, width), pos.y.clamp(-height, height))
    }

    /// Whether `pos` is inside the field extended by `boundary_width`,
    /// the goals included
    pub fn is_in_field(&self, pos: Vector, boundary_width: f64) -> bool {
        let g = &self.geometry;
        let height = g.field_height_half + boundary_width;
        let beside_goal = pos.x.abs() > g.goal_width / 2.0 && pos.y.abs() > height;
        if beside_goal || pos.y.abs() > height + g.goal_depth {
            return false;
        }
        pos.x.abs() <= g.field_width_half + boundary_width
    }

    /// Distance to the nearest border of the field extended by `boundary_width`, 0 outside
    pub fn distance_to_field_border(&self, pos: Vector, boundary_width: f64) -> f64 {
        let dx = self.geometry.field_width_half + boundary_width - pos.x.abs();
        let dy = self.geometry.field_height_half + boundary_width - pos.y.abs();
        dx.min(dy).max(0.0)
    }

    /// Where the half line from `start` along `dir` crosses the field border
    /// moved outwards by `offset`
    pub fn next_line_cut(&self, start: Vector, dir: Vector, offset: f64) -> Option<Vector> {
        if dir == Vector::zeros() {
            return None;
        }
        let sign = |v: f64| if v > 0.0 { 1.0 } else { -1.0 };
        let width = Vector::new(sign(dir.x) * (self.geometry.field_width_half + offset), 0.0);
        let height = Vector::new(0.0, sign(dir.y) * (self.geometry.field_height_half + offset));

        let side = intersect_line_line(start, dir, width, height);
        let front = intersect_line_line(start, dir, height, width);
        match (side, front) {
            (Some(side), Some(front)) if side.t1 < front.t1 => Some(side.point),
            (_, Some(front)) => Some(front.point),
            (Some(side), None) => Some(side.point),
            (None, None) => None,
        }
    }

    /// Distance between a robot hull of `radius` and the friendly goal line or goal posts
    pub fn distance_to_friendly_goal_line(&self, pos: Vector, radius: f64) -> f64 {
        let goal_width_half = self.geometry.goal_width / 2.0;
        if pos.x.abs() < goal_width_half {
            return (self.geometry.field_height_half + pos.y - radius).max(0.0);
        }
        let post_x = if pos.x > 0.0 { goal_width_half } else { -goal_width_half };
        Vector::new(post_x, -self.geometry.field_height_half).distance_to(&pos) - radius
    }

    /// Whether `pos` is near one of the two corners on `side`'s goal line
    pub fn is_in_own_corner(&self, pos: Vector, side: Side) -> bool {
        let dx = self.geometry.field_width_half - pos.x.abs();
        let dy = side.goal_sign() * self.geometry.field_height_half - pos.y;
        dx * dx + dy * dy < CORNER_RADIUS * CORNER_RADIUS
    }

    pub fn is_in_friendly_goal(&self, pos: Vector) -> bool {
        let g = &self.geometry;
        inside_rect(g.friendly_goal_left - Vector::new(0.0, g.goal_depth), g.friendly_goal_right, pos)
    }

    pub fn is_in_opponent_goal(&self, pos: Vector) -> bool {
        let g = &self.geometry;
        inside_rect(g.opponent_goal_right + Vector::new(0.0, g.goal_depth), g.opponent_goal_left, pos)
    }

    // ========================================================================
    // Defense area shortcuts
    // ========================================================================

    pub fn is_in_friendly_defense_area(&self, pos: Vector, radius: f64) -> bool {
        self.rules.is_in_defense_area(pos, radius, Side::Friendly)
    }

    pub fn is_in_opponent_defense_area(&self, pos: Vector, radius: f64) -> bool {
        self.rules.is_in_defense_area(pos, radius, Side::Opponent)
    }

    pub fn distance_to_friendly_defense_area(&self, pos: Vector, radius: f64) -> f64 {
        self.rules.distance_to_defense_area(pos, radius, Side::Friendly)
    }

    pub fn distance_to_opponent_defense_area(&self, pos: Vector, radius: f64) -> f64 {
        self.rules.distance_to_defense_area(pos, radius, Side::Opponent)
    }

    // ========================================================================
    // Allowed field
    // ========================================================================

    /// In the field (extended by `boundary_width`) and outside both defense
    /// areas (shrunk by `boundary_width`)
    pub fn is_in_allowed_field(&self, pos: Vector, boundary_width: f64) -> bool {
        self.is_in_field(pos, boundary_width)
            && !self.rules.is_in_defense_area(pos, -boundary_width, Side::Friendly)
            && !self.rules.is_in_defense_area(pos, -boundary_width, Side::Opponent)
    }

    /// Nearest position in the field shrunk by `extra_limit` that keeps
    /// `extra_limit` to both defense areas.
    ///
    /// With `keep_free_kick_distance` (stop or friendly free kick) the opponent
    /// area additionally gets the free kick distance plus a margin.
    pub fn limit_to_allowed_field(&self, pos: Vector, extra_limit: f64, keep_free_kick_distance: bool) -> Vector {
        let opponent_extra = if keep_free_kick_distance {
            extra_limit + self.geometry.free_kick_defense_dist + FREE_KICK_MARGIN
        } else {
            extra_limit
        };
        let pos = self.limit_to_field(pos, -extra_limit);
        if self.rules.is_in_defense_area(pos, extra_limit, Side::Friendly) {
            self.rules.push_out_of_defense_area(pos, extra_limit, Side::Friendly)
        } else if self.rules.is_in_defense_area(pos, opponent_extra, Side::Opponent) {
            self.rules.push_out_of_defense_area(pos, opponent_extra, Side::Opponent)
        } else {
            pos
        }
    }

    /// Nearest forward crossing of the ray with the field border or either
    /// defense area, all moved inwards/outwards by `extra`.
    ///
    /// On equal distances the field border wins over the friendly area, which
    /// wins over the opponent area.
    pub fn next_allowed_field_line_cut(&self, start: Vector, dir: Vector, extra: f64) -> Option<LineHit> {
        let dir = dir.normalized_or_zero();
        if dir == Vector::zeros() {
            return None;
        }
        let perpendicular = dir.perpendicular();
        let candidates = [
            self.next_line_cut(start, dir, -extra),
            self.rules.intersect_ray_defense_area(start, dir, extra, Side::Friendly).map(|hit| hit.point),
            self.rules.intersect_ray_defense_area(start, dir, extra, Side::Opponent).map(|hit| hit.point),
        ];

        let mut best: Option<LineHit> = None;
        for cut in candidates.into_iter().flatten() {
            let Some(projection) = intersect_line_line(start, dir, cut, perpendicular) else {
                continue;
            };
            let lambda = projection.t1;
            if lambda > 0.0 && best.map_or(true, |b| lambda < b.lambda) {
                best = Some(LineHit { point: cut, lambda });
            }
        }
        best
    }

    /// Parts of the segment `pos` to `pos + dir * max_length` that run
    /// through the field rectangle outside both defense areas. Pass
    /// `f64::INFINITY` for a whole ray.
    ///
    /// Every crossing of the field border or a defense perimeter splits the
    /// ray; each piece is kept or dropped by testing its midpoint, and
    /// adjacent kept pieces are merged. Touching a perimeter without entering
    /// it therefore does not end a segment.
    pub fn allowed_line_segments(&self, pos: Vector, dir: Vector, max_length: f64) -> Vec<(Vector, Vector)> {
        let dir = dir.normalized_or_zero();
        if dir == Vector::zeros() || max_length <= 0.0 {
            return Vec::new();
        }
        let (wh, h) = (self.geometry.field_width_half, self.geometry.field_height_half);
        let borders = [
            (Vector::new(wh, 0.0), Vector::new(0.0, 1.0)),
            (Vector::new(-wh, 0.0), Vector::new(0.0, 1.0)),
            (Vector::new(0.0, h), Vector::new(1.0, 0.0)),
            (Vector::new(0.0, -h), Vector::new(1.0, 0.0)),
        ];

        let mut lambdas = Vec::with_capacity(12);
        lambdas.push(0.0);
        for (offset, border_dir) in borders {
            if let Some(cut) = intersect_line_line(pos, dir, offset, border_dir) {
                lambdas.push(cut.t1);
            }
        }
        for side in [Side::Friendly, Side::Opponent] {
            let hits = self.rules.intersections_ray_defense_area(pos, dir, 0.0, side);
            lambdas.extend(hits.into_iter().map(|hit| hit.lambda));
        }
        if max_length.is_finite() {
            lambdas.push(max_length);
        }
        lambdas.retain(|&lambda| (0.0..=max_length).contains(&lambda));
        lambdas.sort_by(f64::total_cmp);
        lambdas.dedup_by(|later, earlier| *later - *earlier < SAME_CROSSING_EPS);

        let allowed = |p: Vector| {
            p.x.abs() <= wh
                && p.y.abs() <= h
                && !self.rules.is_in_defense_area(p, 0.0, Side::Friendly)
                && !self.rules.is_in_defense_area(p, 0.0, Side::Opponent)
        };
        let mut runs: Vec<(f64, f64)> = Vec::new();
        for piece in lambdas.windows(2) {
            let (from, to) = (piece[0], piece[1]);
            if !allowed(pos + dir * ((from + to) / 2.0)) {
                continue;
            }
            match runs.last_mut() {
                Some(run) if run.1 == from => run.1 = to,
                _ => runs.push((from, to)),
            }
        }
        runs.into_iter().map(|(from, to)| (pos + dir * from, pos + dir * to)).collect()
    }
}


#[cfg(all(test, feature = "proptest"))]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn fields() -> [Field; 2] {
        [
            Field::from_message(&GeometryMessage::division_a()).unwrap(),
            Field::from_message(&GeometryMessage::legacy_2017()).unwrap(),
        ]
    }

    proptest! {
        #[test]
        fn prop_allowed_field_is_point_symmetric(x in -5.0f64..5.0, y in -7.0f64..7.0, boundary in 0.0f64..0.3) {
            for field in fields() {
                let pos = Vector::new(x, y);
                prop_assert_eq!(field.is_in_allowed_field(pos, boundary), field.is_in_allowed_field(-pos, boundary));
            }
        }

        #[test]
        fn prop_limit_to_field_is_inside(x in -20.0f64..20.0, y in -20.0f64..20.0) {
            for field in fields() {
                let limited = field.limit_to_field(Vector::new(x, y), 0.0);
                prop_assert!(field.is_in_field(limited, 1e-9));
            }
        }

        #[test]
        fn prop_allowed_segments_are_ordered(x in -4.0f64..4.0, y in -3.0f64..3.0, angle in 0.0f64..std::f64::consts::TAU) {
            for field in fields() {
                let pos = Vector::new(x, y);
                let dir = Vector::from_angle(angle);
                let segments = field.allowed_line_segments(pos, dir, f64::INFINITY);
                let mut last = 0.0;
                for (start, end) in segments {
                    let (l1, l2) = ((start - pos).dot(&dir), (end - pos).dot(&dir));
                    prop_assert!(l1 >= last - 1e-9);
                    prop_assert!(l2 > l1);
                    last = l2;
                }
            }
        }
    }
}
