use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    response::Html,
    routing::get,
    Json, Router,
};
use futures::{Stream, StreamExt};
use log::info;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_stream::wrappers::WatchStream;

use super::page::INDEX_HTML;
use super::refresh::SnapshotReceiver;
use super::DashboardSnapshot;
use crate::error::Result;

#[derive(Clone)]
struct DashboardState {
    snapshots: SnapshotReceiver,
}

pub fn router(snapshots: SnapshotReceiver) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/dashboard", get(current_snapshot))
        .route("/api/events", get(snapshot_events))
        .route("/healthz", get(healthz))
        .with_state(DashboardState { snapshots })
}

/// Serves the dashboard until the listener fails.
pub async fn serve(listener: TcpListener, snapshots: SnapshotReceiver) -> Result<()> {
    info!("Dashboard listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(snapshots)).await?;
    Ok(())
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn current_snapshot(State(state): State<DashboardState>) -> Json<Arc<DashboardSnapshot>> {
    Json(state.snapshots.borrow().clone())
}

/// Pushes the current snapshot, then every newly published one.
async fn snapshot_events(
    State(state): State<DashboardState>,
) -> Sse<impl Stream<Item = std::result::Result<Event, axum::Error>>> {
    let stream = WatchStream::new(state.snapshots)
        .map(|snapshot| Event::default().event("snapshot").json_data(snapshot.as_ref()));

    Sse::new(stream).keep_alive(KeepAlive::default())
}
