#[tokio::main]
async fn main() {
    if let Err(e) = sim_viewer::run_with_config().await {
        tracing::error!(error = %e, "viewer exited with error");
    }
}
