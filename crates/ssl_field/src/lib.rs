//! # ssl_field - Defense Area and Field Geometry for Robot Soccer
//!
//! Geometric predicates a robot soccer strategy needs to keep trajectories
//! legal: containment, distance, boundary intersection and perimeter
//! parametrization for both defense areas and the field itself.
//!
//! ## Features
//! - Two defense area shapes (2017 "stadium", 2018 rounded rectangle)
//!   behind one sealed [`DefenseRules`] trait, selected once per geometry
//! - Geometry loaded from JSON or YAML referee messages, with division presets
//! - Pure queries on an immutable [`Field`], safe to share between threads
//!
//! ## Usage
//!
//! ```rust
//! use ssl_field::{Field, GeometryMessage, Side, Vector};
//!
//! let field = Field::from_message(&GeometryMessage::division_a()).unwrap();
//! let pos = Vector::new(0.0, 4.7);
//! assert!(!field.rules().is_in_defense_area(pos, 0.0, Side::Opponent));
//! assert!(field.rules().is_in_defense_area(pos, 0.35, Side::Opponent));
//! ```

pub mod defense;
pub mod error;
pub mod field;
pub mod geom;
pub mod geometry;
pub mod shared;

pub use defense::{rules_for, BoundarySegment, DefenseHit, DefenseRules, Rules2017, Rules2018, Side};
pub use error::{FieldError, Result};
pub use field::Field;
pub use geom::{Vector, VectorExt};
pub use geometry::{FieldGeometry, GeometryMessage, RuleVersion};
