use std::sync::Arc;

use tokio::sync::{Notify, broadcast, watch};

use crate::use_cases::SceneUpdate;

/// Handles a host application (renderer, tests) uses to observe and stop a
/// running viewer.
#[derive(Clone)]
pub struct ViewerHandles {
    // Stream of per-tick scene updates; subscribe for every tick.
    pub scene_tx: broadcast::Sender<SceneUpdate>,
    // Latest scene value for per-frame reads by the renderer.
    pub scene_latest_tx: watch::Sender<SceneUpdate>,
    // Signals both background tasks to stop.
    pub shutdown: Arc<Notify>,
}
