// Framework bootstrap for the viewer runtime.

use crate::domain::tuning::{MotionTuning, SceneTuning};
use crate::frameworks::config;
use crate::interface_adapters::clients::sim::{SimClient, poll_task};
use crate::interface_adapters::state::ViewerHandles;
use crate::use_cases::{SceneUpdate, scene_task};

use std::io::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Notify, broadcast, mpsc, watch};

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

/// Wiring parameters for one viewer instance.
#[derive(Debug, Clone)]
pub struct ViewerSettings {
    /// Pause between the end of one fetch and the start of the next.
    pub poll_interval: Duration,
    /// Fixed interval for the render-tick loop.
    pub tick_interval: Duration,
    /// Capacity for parsed snapshots in flight to the scene task.
    pub snapshot_channel_capacity: usize,
    /// Capacity for broadcast scene updates.
    pub scene_broadcast_capacity: usize,
    pub motion: MotionTuning,
    pub scene: SceneTuning,
}

/// Spawns the fetch loop and the scene task, returning the handles a host
/// needs to observe the scene and shut the viewer down.
pub fn start(client: SimClient, settings: ViewerSettings) -> ViewerHandles {
    // Channel wiring for the viewer loops.
    let (snapshot_tx, snapshot_rx) =
        mpsc::channel(settings.snapshot_channel_capacity);
    let (scene_tx, _scene_rx) = broadcast::channel(settings.scene_broadcast_capacity);
    let (scene_latest_tx, _scene_latest_rx) = watch::channel(SceneUpdate::default());
    let shutdown = Arc::new(Notify::new());

    // The scene task is the sole owner of entity state.
    tokio::spawn(scene_task(
        snapshot_rx,
        scene_tx.clone(),
        scene_latest_tx.clone(),
        settings.tick_interval,
        shutdown.clone(),
        settings.motion,
        settings.scene,
    ));

    // The poll loop only fetches, parses, and forwards.
    tokio::spawn(poll_task(
        client,
        snapshot_tx,
        settings.poll_interval,
        shutdown.clone(),
    ));

    ViewerHandles {
        scene_tx,
        scene_latest_tx,
        shutdown,
    }
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let base_url = config::sim_base_url();
    let client = SimClient::new(base_url.clone(), config::fetch_timeout())
        .map_err(|e| std::io::Error::other(format!("failed to initialize sim client: {e}")))?;

    let settings = ViewerSettings {
        poll_interval: config::poll_interval(),
        tick_interval: config::TICK_INTERVAL,
        snapshot_channel_capacity: config::SNAPSHOT_CHANNEL_CAPACITY,
        scene_broadcast_capacity: config::SCENE_BROADCAST_CAPACITY,
        motion: config::motion_tuning(),
        scene: config::scene_tuning(),
    };

    let handles = start(client, settings);
    tracing::info!(%base_url, "sim viewer running");

    // The viewer runs until the process is asked to stop.
    tokio::signal::ctrl_c().await?;
    tracing::info!("shutdown requested");
    handles.shutdown.notify_waiters();
    Ok(())
}
