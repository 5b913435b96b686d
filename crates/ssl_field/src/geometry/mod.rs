//! # Field geometry model
//!
//! - `message`: [`GeometryMessage`], the serde record delivered by the
//!   referee/vision layer, plus division presets
//! - `field_geometry`: [`FieldGeometry`], validated and derived dimensions
//!
//! The rule version is decided once from the message's `type` field and
//! never re-evaluated.

mod field_geometry;
mod message;

pub use field_geometry::FieldGeometry;
pub use message::GeometryMessage;

use serde::{Deserialize, Serialize};

/// Geometry type of fields with the quarter circle defense area
pub const LEGACY_GEOMETRY_TYPE: &str = "TYPE_2014";

/// Competition rule revision that defines the defense area shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleVersion {
    /// Quarter circles joined by a stretch ("stadium")
    V2017,
    /// Rectangle with rounded corners
    V2018,
}

impl RuleVersion {
    /// Absent or legacy geometry types select the 2017 rules
    pub fn from_geometry_type(geometry_type: Option<&str>) -> Self {
        match geometry_type {
            None | Some(LEGACY_GEOMETRY_TYPE) => RuleVersion::V2017,
            Some(_) => RuleVersion::V2018,
        }
    }
}

impl std::fmt::Display for RuleVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleVersion::V2017 => write!(f, "2017"),
            RuleVersion::V2018 => write!(f, "2018"),
        }
    }
}
