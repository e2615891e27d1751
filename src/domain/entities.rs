// Domain-level entity and snapshot record types.

use std::time::Instant;

use crate::domain::geometry::Vec3;

/// One parsed state document covering all known box and robot records.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub boxes: Vec<BoxRecord>,
    pub robot_actions: Vec<RobotActionRecord>,
}

/// Server-reported position and stacking state for one box id.
#[derive(Debug, Clone)]
pub struct BoxRecord {
    pub id: u64,
    pub position: Vec3,
    /// True when the server reports this id as a combined stack column.
    pub stacked: bool,
    pub num_boxes: u32,
}

/// Action a robot reported for this snapshot cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RobotAction {
    Move,
    TurnRandom,
    Grab,
    Stack,
    /// Unrecognized action strings decode here and apply no extra effect.
    Other,
}

/// Server-reported position, facing, and action for one robot id.
#[derive(Debug, Clone)]
pub struct RobotActionRecord {
    pub id: u64,
    pub position: Vec3,
    pub direction: Vec3,
    pub action: RobotAction,
    pub box_id: Option<u64>,
}

/// In-flight interpolation toward the latest snapshot target.
///
/// The robot's sampled velocity lives on the robot itself because a collision
/// resamples it without abandoning the journey's target.
#[derive(Debug, Clone, Copy)]
pub struct MotionJourney {
    /// Position captured when the journey (re)started.
    pub start: Vec3,
    pub target: Vec3,
    pub started_at: Instant,
}

impl MotionJourney {
    pub fn new(start: Vec3, target: Vec3, started_at: Instant) -> Self {
        Self {
            start,
            target,
            started_at,
        }
    }

    pub fn length(&self) -> f32 {
        self.start.distance(self.target)
    }
}

/// Locally tracked robot. Robots are never retired once seen.
#[derive(Debug, Clone)]
pub struct RobotEntity {
    pub id: u64,
    pub position: Vec3,
    /// Ground-plane unit vector; applied directly from snapshots, never interpolated.
    pub facing: Vec3,
    /// Current commanded velocity; only the magnitude drives journey progress.
    pub velocity: Vec3,
    /// Position recorded when the last journey completed.
    pub last_confirmed: Vec3,
    /// At most one journey is authoritative; a new target replaces it.
    pub journey: Option<MotionJourney>,
}

impl RobotEntity {
    pub fn new(id: u64, position: Vec3, facing: Vec3, velocity: Vec3) -> Self {
        Self {
            id,
            position,
            facing,
            velocity,
            last_confirmed: position,
            journey: None,
        }
    }
}

/// Locally tracked box. Boxes absent from a snapshot are deactivated, not
/// destroyed, and reactivate when their id reappears.
#[derive(Debug, Clone)]
pub struct BoxEntity {
    pub id: u64,
    pub position: Vec3,
    /// Stack size reported by the server (>= 1).
    pub num_boxes: u32,
    /// Rendered vertical scale, `num_boxes * box_height`.
    pub scale_y: f32,
    pub active: bool,
    /// Non-owning reference to the robot carrying this box, if any.
    pub carried_by: Option<u64>,
}

impl BoxEntity {
    pub fn new(id: u64, position: Vec3) -> Self {
        Self {
            id,
            position,
            num_boxes: 1,
            scale_y: 0.0,
            active: true,
            carried_by: None,
        }
    }

    pub fn is_carried(&self) -> bool {
        self.carried_by.is_some()
    }
}
