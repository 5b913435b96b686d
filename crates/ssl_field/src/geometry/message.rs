//! Raw geometry record as delivered by the referee/vision layer
//!
//! All lengths are in meters. The `type` field selects the rule version,
//! see [`RuleVersion::from_geometry_type`](super::RuleVersion::from_geometry_type).

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryMessage {
    pub field_width: f64,
    pub field_height: f64,
    pub boundary_width: f64,
    pub goal_width: f64,
    pub goal_depth: f64,
    pub goal_wall_width: f64,
    pub goal_height: f64,
    pub line_width: f64,
    pub center_circle_radius: f64,
    pub defense_radius: f64,
    pub defense_stretch: f64,
    pub free_kick_from_defense_dist: f64,
    pub penalty_spot_from_field_line_dist: f64,
    pub penalty_line_from_spot_dist: f64,
    /// Rectangular defense area width (since 2018)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defense_width: Option<f64>,
    /// Rectangular defense area height (since 2018)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defense_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referee_width: Option<f64>,
    /// "TYPE_2014" or absent selects the 2017 rules, anything else 2018
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub geometry_type: Option<String>,
}

impl GeometryMessage {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Division A field, 2018 rules
    pub fn division_a() -> Self {
        Self {
            field_width: 9.0,
            field_height: 12.0,
            boundary_width: 0.3,
            goal_width: 1.2,
            goal_depth: 0.18,
            goal_wall_width: 0.02,
            goal_height: 0.155,
            line_width: 0.01,
            center_circle_radius: 0.5,
            defense_radius: 1.2,
            defense_stretch: 2.4,
            free_kick_from_defense_dist: 0.2,
            // penalty mark 8 m in front of the goal center, beyond the halfway line
            penalty_spot_from_field_line_dist: 8.0,
            penalty_line_from_spot_dist: 0.4,
            defense_width: Some(2.4),
            defense_height: Some(1.2),
            referee_width: Some(0.4),
            geometry_type: Some("TYPE_2018".to_string()),
        }
    }

    /// Division B field, 2018 rules
    pub fn division_b() -> Self {
        Self {
            field_width: 6.0,
            field_height: 9.0,
            goal_width: 1.0,
            // 6 m in front of the goal center
            penalty_spot_from_field_line_dist: 6.0,
            defense_radius: 1.0,
            defense_stretch: 2.0,
            defense_width: Some(2.0),
            defense_height: Some(1.0),
            ..Self::division_a()
        }
    }

    /// Pre-2018 field with the quarter-circle ("stadium") defense area
    pub fn legacy_2017() -> Self {
        Self {
            field_width: 6.0,
            field_height: 9.0,
            goal_width: 1.0,
            defense_radius: 1.0,
            defense_stretch: 0.5,
            penalty_spot_from_field_line_dist: 1.0,
            defense_width: None,
            defense_height: None,
            geometry_type: None,
            ..Self::division_a()
        }
    }
}
