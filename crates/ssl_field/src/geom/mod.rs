//! # Geometry primitives
//!
//! Leaf layer without any knowledge of the field:
//! - `vector`: `Vector` (nalgebra `Vector2<f64>`) and [`VectorExt`]
//! - `angle`: angle normalization
//! - `intersect`: line/line, line/circle, circle/circle, ray/arc, line/corridor
//! - `triangle`: areas, orientation, point-in-triangle, rectangle helpers

pub mod angle;
pub mod intersect;
pub mod triangle;
pub mod vector;

pub use angle::{angle_diff, normalize_angle, normalize_angle_positive};
pub use intersect::{
    inner_tangents_to_circles, intersect_circle_circle, intersect_line_circle, intersect_line_corridor,
    intersect_line_line, intersect_lines_by_points, intersect_ray_arc, tangents_to_circle, ArcHit,
    CircleCircleIntersection, CorridorIntersection, LineCircleIntersection, LineHit, LineIntersection,
};
pub use triangle::{
    bound_rect, center, inscribed_angle, inside_rect, is_in_triangle, quadrangle_area, signed_triangle_area,
    triangle_area, triangle_orientation, Orientation,
};
pub use vector::{Vector, VectorExt};
