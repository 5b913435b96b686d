//! Immutable field dimensions derived once from a [`GeometryMessage`]

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{GeometryMessage, RuleVersion};
use crate::error::{FieldError, Result};
use crate::geom::Vector;

/// Field geometry in meters.
///
/// Coordinates: x runs across the field width, y along its length. The
/// friendly goal line is at `y = -field_height_half`, the opponent goal line
/// at `y = +field_height_half`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldGeometry {
    pub rule_version: RuleVersion,

    pub field_width: f64,
    pub field_height: f64,
    pub field_width_half: f64,
    pub field_height_half: f64,
    pub field_width_quarter: f64,
    pub field_height_quarter: f64,

    pub goal_width: f64,
    pub goal_wall_width: f64,
    pub goal_depth: f64,
    pub goal_height: f64,

    pub line_width: f64,
    pub center_circle_radius: f64,
    /// Distance to keep to the opponent defense area during a free kick
    pub free_kick_defense_dist: f64,

    /// Quarter circle radius of the 2017 defense area
    pub defense_radius: f64,
    /// Straight part between the quarter circles of the 2017 defense area
    pub defense_stretch: f64,
    pub defense_stretch_half: f64,
    /// Rectangle width of the 2018 defense area (falls back to the stretch)
    pub defense_width: f64,
    pub defense_width_half: f64,
    /// Rectangle height of the 2018 defense area (falls back to the radius)
    pub defense_height: f64,

    pub friendly_penalty_spot: Vector,
    pub opponent_penalty_spot: Vector,
    /// Maximal distance from the center line during an offensive penalty
    pub penalty_line: f64,
    /// Maximal distance from the center line during a defensive penalty
    pub own_penalty_line: f64,

    pub friendly_goal: Vector,
    pub friendly_goal_left: Vector,
    pub friendly_goal_right: Vector,
    pub opponent_goal: Vector,
    pub opponent_goal_left: Vector,
    pub opponent_goal_right: Vector,

    pub boundary_width: f64,
    pub referee_width: f64,
    pub is_large_field: bool,
}

impl FieldGeometry {
    pub fn from_message(msg: &GeometryMessage) -> Result<Self> {
        validate(msg)?;

        let rule_version = RuleVersion::from_geometry_type(msg.geometry_type.as_deref());
        let field_width_half = msg.field_width / 2.0;
        let field_height_half = msg.field_height / 2.0;
        let defense_width = msg.defense_width.unwrap_or(msg.defense_stretch);
        let defense_height = msg.defense_height.unwrap_or(msg.defense_radius);

        match rule_version {
            RuleVersion::V2017 if msg.defense_radius <= 0.0 => {
                return Err(invalid("defense_radius must be positive for 2017 rules".to_string()));
            }
            RuleVersion::V2018 if defense_width <= 0.0 || defense_height <= 0.0 => {
                return Err(invalid(format!(
                    "defense area {} x {} must be positive for 2018 rules",
                    defense_width, defense_height
                )));
            }
            _ => {}
        }

        let friendly_penalty_spot = Vector::new(0.0, -field_height_half + msg.penalty_spot_from_field_line_dist);
        let opponent_penalty_spot = Vector::new(0.0, field_height_half - msg.penalty_spot_from_field_line_dist);
        let goal_width_half = msg.goal_width / 2.0;

        Ok(Self {
            rule_version,
            field_width: msg.field_width,
            field_height: msg.field_height,
            field_width_half,
            field_height_half,
            field_width_quarter: msg.field_width / 4.0,
            field_height_quarter: msg.field_height / 4.0,
            goal_width: msg.goal_width,
            goal_wall_width: msg.goal_wall_width,
            goal_depth: msg.goal_depth,
            goal_height: msg.goal_height,
            line_width: msg.line_width,
            center_circle_radius: msg.center_circle_radius,
            free_kick_defense_dist: msg.free_kick_from_defense_dist,
            defense_radius: msg.defense_radius,
            defense_stretch: msg.defense_stretch,
            defense_stretch_half: msg.defense_stretch / 2.0,
            defense_width,
            defense_width_half: defense_width / 2.0,
            defense_height,
            friendly_penalty_spot,
            opponent_penalty_spot,
            penalty_line: opponent_penalty_spot.y - msg.penalty_line_from_spot_dist,
            own_penalty_line: friendly_penalty_spot.y + msg.penalty_line_from_spot_dist,
            friendly_goal: Vector::new(0.0, -field_height_half),
            friendly_goal_left: Vector::new(-goal_width_half, -field_height_half),
            friendly_goal_right: Vector::new(goal_width_half, -field_height_half),
            opponent_goal: Vector::new(0.0, field_height_half),
            opponent_goal_left: Vector::new(-goal_width_half, field_height_half),
            opponent_goal_right: Vector::new(goal_width_half, field_height_half),
            boundary_width: msg.boundary_width,
            referee_width: msg.referee_width.unwrap_or(0.0),
            is_large_field: msg.field_width > 5.0 && msg.field_height > 7.0,
        })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_message(&GeometryMessage::from_json(json)?)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Self::from_message(&GeometryMessage::from_yaml(yaml)?)
    }
}

fn invalid(msg: String) -> FieldError {
    warn!("rejecting field geometry: {}", msg);
    FieldError::InvalidGeometry(msg)
}

fn validate(msg: &GeometryMessage) -> Result<()> {
    let required = [
        ("field_width", msg.field_width),
        ("field_height", msg.field_height),
        ("goal_width", msg.goal_width),
    ];
    for (name, value) in required {
        if !value.is_finite() || value <= 0.0 {
            return Err(invalid(format!("{} must be positive, got {}", name, value)));
        }
    }

    let non_negative = [
        ("boundary_width", Some(msg.boundary_width)),
        ("goal_depth", Some(msg.goal_depth)),
        ("goal_wall_width", Some(msg.goal_wall_width)),
        ("goal_height", Some(msg.goal_height)),
        ("line_width", Some(msg.line_width)),
        ("center_circle_radius", Some(msg.center_circle_radius)),
        ("defense_radius", Some(msg.defense_radius)),
        ("defense_stretch", Some(msg.defense_stretch)),
        ("free_kick_from_defense_dist", Some(msg.free_kick_from_defense_dist)),
        ("penalty_spot_from_field_line_dist", Some(msg.penalty_spot_from_field_line_dist)),
        ("penalty_line_from_spot_dist", Some(msg.penalty_line_from_spot_dist)),
        ("defense_width", msg.defense_width),
        ("defense_height", msg.defense_height),
        ("referee_width", msg.referee_width),
    ];
    for (name, value) in non_negative {
        if let Some(value) = value {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!("{} must be non-negative, got {}", name, value)));
            }
        }
    }
    Ok(())
}
