// Domain layer: core scene-sync types and rules.

pub mod entities;
pub mod geometry;
pub mod ports;
pub mod registry;
pub mod tuning;

pub use entities::{
    BoxEntity, BoxRecord, MotionJourney, RobotAction, RobotActionRecord, RobotEntity, Snapshot,
};
pub use geometry::Vec3;
pub use ports::ObstacleQuery;
pub use registry::{BoxObstacles, EntityRegistry};
pub use tuning::{MotionTuning, SceneTuning};
