//! Motion and scene-geometry tuning for the viewer.
//!
//! Keep this separate from runtime configuration (poll intervals, channel
//! capacities, endpoint URLs) in `frameworks/config.rs`.

#[derive(Debug, Clone, Copy)]
pub struct MotionTuning {
    /// Lower bound for sampled robot speed in world units per second.
    pub min_speed: f32,

    /// Upper bound for sampled robot speed in world units per second.
    pub max_speed: f32,
}

impl Default for MotionTuning {
    fn default() -> Self {
        Self {
            min_speed: 1.0,
            max_speed: 5.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SceneTuning {
    /// Vertical size of a single box unit; stacks scale linearly with this.
    pub box_height: f32,

    /// Height of a robot's body above its ground origin.
    pub robot_height: f32,

    /// Extra clearance between a robot's top and a carried box.
    pub grab_height: f32,
}

impl SceneTuning {
    /// Vertical offset of a carried box relative to its robot's origin.
    ///
    /// The offset is fixed regardless of the carried stack's size.
    pub fn carry_offset(&self) -> f32 {
        self.robot_height + self.grab_height
    }
}

impl Default for SceneTuning {
    fn default() -> Self {
        Self {
            box_height: 0.5,
            robot_height: 1.0,
            grab_height: 0.5,
        }
    }
}
