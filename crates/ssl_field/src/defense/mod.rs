//! Defense area boundary engine
//!
//! Two incompatible defense area shapes behind one interface:
//!
//! - [`Rules2017`]: "stadium", two quarter circles of radius `defense_radius`
//!   joined by a straight stretch parallel to the goal line
//! - [`Rules2018`]: axis aligned rectangle whose corners are rounded with the
//!   radius of the queried extra distance
//!
//! The variant is picked once per geometry by [`rules_for`] and held as a
//! `Box<dyn DefenseRules>`; queries never branch on the rule version.
//!
//! ## Way
//!
//! Every point on the field facing perimeter has a one dimensional arclength
//! coordinate ("way"). Seen from the field, the way starts where the
//! perimeter leaves the goal line on the left and ends where it rejoins it on
//! the right. For both variants `defense_intersection_by_way` inverts the way
//! reported by `intersections_ray_defense_area`.

mod rules2017;
mod rules2018;

pub use rules2017::Rules2017;
pub use rules2018::Rules2018;

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geom::{Vector, VectorExt};
use crate::geometry::{FieldGeometry, RuleVersion};

/// Hits closer than this are the same point reported by two adjacent segments
const DUPLICATE_HIT_DIST_SQ: f64 = 1e-5 * 1e-5;

// ============================================================================
// Hit types
// ============================================================================

/// Which of the two point symmetric defense areas a query is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Friendly,
    Opponent,
}

impl Side {
    pub fn is_friendly(self) -> bool {
        matches!(self, Side::Friendly)
    }

    pub fn opposite(self) -> Side {
        match self {
            Side::Friendly => Side::Opponent,
            Side::Opponent => Side::Friendly,
        }
    }

    /// Sign of the y coordinate of this side's goal line
    pub fn goal_sign(self) -> f64 {
        match self {
            Side::Friendly => -1.0,
            Side::Opponent => 1.0,
        }
    }
}

/// Part of the perimeter a hit lies on, in traversal order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoundarySegment {
    StartLine,
    StartArc,
    FrontLine,
    EndArc,
    EndLine,
}

/// A ray crossing the (extended) defense area perimeter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefenseHit {
    pub point: Vector,
    /// Perimeter position, see the module docs
    pub way: f64,
    /// Distance from the ray origin along the normalized direction
    pub lambda: f64,
    pub segment: BoundarySegment,
}

/// Sorts hits by ray parameter and drops the second report of a point that
/// lies on the join of two segments.
pub(crate) fn finish_hits(mut hits: Vec<DefenseHit>) -> Vec<DefenseHit> {
    hits.sort_by(|a, b| a.lambda.partial_cmp(&b.lambda).unwrap_or(Ordering::Equal));
    hits.dedup_by(|later, earlier| later.point.distance_to_sq(&earlier.point) < DUPLICATE_HIT_DIST_SQ);
    hits
}

// ============================================================================
// DefenseRules Trait
// ============================================================================

mod private {
    pub trait Sealed {}

    impl Sealed for super::Rules2017 {}
    impl Sealed for super::Rules2018 {}
}

/// Shape specific defense area queries.
///
/// `radius` grows the area by the size of the queried object, `extra` moves
/// the perimeter outwards (negative values shrink it). All queries are pure.
pub trait DefenseRules: private::Sealed + Send + Sync + fmt::Debug {
    fn version(&self) -> RuleVersion;

    /// Whether a disc of `radius` around `pos` touches the defense area
    fn is_in_defense_area(&self, pos: Vector, radius: f64, side: Side) -> bool;

    /// Gap between a disc of `radius` around `pos` and the area, 0 when touching
    fn distance_to_defense_area(&self, pos: Vector, radius: f64, side: Side) -> f64;

    fn distance_to_defense_area_sq(&self, pos: Vector, side: Side) -> f64;

    /// All forward crossings of the ray with the perimeter, sorted by `lambda`
    fn intersections_ray_defense_area(&self, pos: Vector, dir: Vector, extra: f64, side: Side) -> Vec<DefenseHit>;

    /// First forward crossing of the ray with the perimeter
    fn intersect_ray_defense_area(&self, pos: Vector, dir: Vector, extra: f64, side: Side) -> Option<DefenseHit> {
        self.intersections_ray_defense_area(pos, dir, extra, side).into_iter().next()
    }

    /// Point on the perimeter (moved out by `extra`) at the given way
    fn defense_intersection_by_way(&self, way: f64, extra: f64, side: Side) -> Result<Vector>;

    /// Rounded corner points strictly between two ways, ordered like the
    /// inputs (`way1` to `way2`)
    fn corner_points_between_ways(&self, way1: f64, way2: f64, radius: f64, side: Side) -> Vec<Vector>;

    /// Length of the perimeter moved out by `radius`
    fn max_way(&self, radius: f64) -> f64;

    /// Points where the circle around `pos` crosses the perimeter moved out by `extra`
    fn intersect_circle_defense_area(&self, pos: Vector, radius: f64, extra: f64, side: Side) -> Vec<Vector>;

    /// Moves a position inside the area onto the perimeter moved out by `extra`
    fn push_out_of_defense_area(&self, pos: Vector, extra: f64, side: Side) -> Vector;

    /// Distance from the goal center to where the perimeter meets the goal line
    fn baseline_intersection_distance(&self) -> f64;
}

/// Picks the defense rules matching the geometry's rule version
pub fn rules_for(geometry: &FieldGeometry) -> Box<dyn DefenseRules> {
    match geometry.rule_version {
        RuleVersion::V2017 => Box::new(Rules2017::new(geometry)),
        RuleVersion::V2018 => Box::new(Rules2018::new(geometry)),
    }
}
