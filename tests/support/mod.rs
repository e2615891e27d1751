// Shared mock simulation endpoint for integration tests.
use std::sync::{Arc, Mutex};

use axum::{Router, extract::State, http::StatusCode, routing::get};

/// Handle for swapping the served state document between poll cycles.
#[derive(Clone)]
pub struct MockSim {
    body: Arc<Mutex<String>>,
}

impl MockSim {
    pub fn set_body(&self, body: impl Into<String>) {
        *self.body.lock().expect("body mutex poisoned") = body.into();
    }
}

async fn serve_state(State(sim): State<MockSim>) -> String {
    sim.body.lock().expect("body mutex poisoned").clone()
}

/// Starts an in-process mock simulation endpoint on an ephemeral port and
/// returns its base URL plus the body-swapping handle.
pub async fn start_mock_sim(initial_body: impl Into<String>) -> (String, MockSim) {
    let sim = MockSim {
        body: Arc::new(Mutex::new(initial_body.into())),
    };
    let app = Router::new()
        .route("/", get(serve_state))
        .with_state(sim.clone());

    // Bind to an ephemeral port to avoid collisions with local services.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral test port");
    let addr = listener.local_addr().expect("get local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock sim failed");
    });

    (format!("http://{addr}"), sim)
}

/// Starts a mock endpoint that always answers with a server error.
pub async fn start_failing_sim() -> String {
    let app = Router::new().route("/", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral test port");
    let addr = listener.local_addr().expect("get local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock sim failed");
    });

    format!("http://{addr}")
}
