use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Notify, mpsc};
use tracing::{debug, warn};

use crate::domain::entities::Snapshot;
use crate::interface_adapters::protocol::StateDocumentDto;

// Reasons one fetch cycle can fail; every variant degrades to "skip this
// cycle and try again at the next interval".
#[derive(Debug)]
pub enum FetchError {
    Transport(reqwest::Error),
    Status(reqwest::StatusCode),
    Decode(serde_json::Error),
}

// Thin reqwest client for the simulation state endpoint.
#[derive(Clone)]
pub struct SimClient {
    http: reqwest::Client,
    base_url: String,
}

impl SimClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Fetches and decodes one state document.
    ///
    /// Decoding happens on the full body so a malformed document fails here,
    /// before any entity state is touched.
    pub async fn fetch_state(&self) -> Result<Snapshot, FetchError> {
        let response = self
            .http
            .get(&self.base_url)
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.text().await.map_err(FetchError::Transport)?;
        let document: StateDocumentDto =
            serde_json::from_str(&body).map_err(FetchError::Decode)?;
        Ok(document.into())
    }
}

/// Polls the simulation endpoint until shutdown, forwarding each successfully
/// parsed snapshot to the scene task.
///
/// The loop waits the full poll interval after each attempt regardless of how
/// long the fetch took. Failures are logged and never escalate; the next
/// successful cycle self-corrects.
pub async fn poll_task(
    client: SimClient,
    snapshot_tx: mpsc::Sender<Snapshot>,
    poll_interval: Duration,
    shutdown: Arc<Notify>,
) {
    let mut fetches_ok: u64 = 0;
    let mut fetches_failed: u64 = 0;

    loop {
        match client.fetch_state().await {
            Ok(snapshot) => {
                fetches_ok += 1;
                debug!(fetches_ok, fetches_failed, "fetched simulation state");
                if snapshot_tx.send(snapshot).await.is_err() {
                    // The scene task is gone; nothing left to feed.
                    warn!("snapshot channel closed; poll loop exiting");
                    break;
                }
            }
            Err(e) => {
                fetches_failed += 1;
                warn!(error = ?e, fetches_failed, "state fetch failed; retrying next interval");
            }
        }

        tokio::select! {
            _ = shutdown.notified() => break,
            _ = tokio::time::sleep(poll_interval) => {}
        }
    }
}
