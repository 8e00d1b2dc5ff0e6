//! Throwaway HTTP upstreams for exercising outbound calls in tests.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde_json::Value;
use tokio::sync::Mutex;

/// Bodies received by a test upstream, in arrival order.
#[derive(Clone, Default)]
pub struct Recorded(Arc<Mutex<Vec<Value>>>);

impl Recorded {
    pub async fn bodies(&self) -> Vec<Value> {
        self.0.lock().await.clone()
    }
}

/// Starts an upstream on an ephemeral port that answers every POST to `/hook`
/// with `status` and records the JSON body it received.
pub async fn spawn_upstream(status: StatusCode) -> (String, Recorded) {
    let recorded = Recorded::default();
    let app = Router::new()
        .route("/hook", post(record))
        .with_state((status, recorded.clone()));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/hook"), recorded)
}

/// A URL on a port nothing listens on.
pub async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/hook")
}

async fn record(
    State((status, recorded)): State<(StatusCode, Recorded)>,
    Json(body): Json<Value>,
) -> (StatusCode, &'static str) {
    recorded.0.lock().await.push(body);
    (status, "accepted")
}
