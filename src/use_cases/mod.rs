// Use cases layer: application workflows for the viewer.

pub mod attachment;
pub mod motion;
pub mod reconcile;
pub mod scene;
pub mod types;

pub use reconcile::reconcile;
pub use scene::scene_task;
pub use types::{BoxSceneState, RobotSceneState, SceneUpdate};
