// The scene task: single owner of the entity registry and all motion state.

use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tokio::sync::{Notify, broadcast, mpsc, watch};
use tracing::info;

use crate::domain::entities::Snapshot;
use crate::domain::registry::EntityRegistry;
use crate::domain::tuning::{MotionTuning, SceneTuning};
use crate::use_cases::types::SceneUpdate;
use crate::use_cases::{attachment, motion, reconcile};

/// Runs the cooperative scene loop until shutdown is signalled.
///
/// Snapshots from the fetch loop are drained and reconciled between render
/// ticks, never during one, so the registry has exactly one writer at a time.
/// Each tick steps every robot's journey against a fixed obstacle snapshot,
/// drags carried boxes along, and publishes the resulting scene.
pub async fn scene_task(
    mut snapshot_rx: mpsc::Receiver<Snapshot>,
    scene_tx: broadcast::Sender<SceneUpdate>,
    scene_latest_tx: watch::Sender<SceneUpdate>,
    tick_interval: Duration,
    shutdown: Arc<Notify>,
    motion_tuning: MotionTuning,
    scene_tuning: SceneTuning,
) {
    let mut registry = EntityRegistry::new();
    let mut rng = SmallRng::from_entropy();
    let mut tick: u64 = 0;

    // Drive the render loop at the configured tick rate.
    let mut interval = tokio::time::interval(tick_interval);

    loop {
        tokio::select! {
            _ = shutdown.notified() => {
                // Exit cleanly when the viewer shuts down.
                break;
            }
            _ = interval.tick() => {}
        }

        // Apply every snapshot that arrived since the previous tick.
        while let Ok(snapshot) = snapshot_rx.try_recv() {
            info!(
                boxes = snapshot.boxes.len(),
                robot_actions = snapshot.robot_actions.len(),
                "applying snapshot"
            );
            reconcile::reconcile(
                &mut registry,
                &snapshot,
                &scene_tuning,
                &motion_tuning,
                &mut rng,
                Instant::now(),
            );
        }

        // Obstacles are fixed for the duration of one tick.
        let now = Instant::now();
        let obstacles = registry.obstacle_snapshot();
        for robot in registry.robots_mut() {
            motion::tick_robot(robot, now, &obstacles, &mut rng, &motion_tuning);
        }
        attachment::sync_carried(&mut registry, &scene_tuning);

        tick += 1;
        let update = SceneUpdate::capture(tick, &registry);
        // Latest value for per-frame reads, stream for consumers that want
        // every tick. send_replace stores even while nobody is subscribed,
        // so a late subscriber still reads the current scene.
        scene_latest_tx.send_replace(update.clone());
        let _ = scene_tx.send(update);
    }
}
