use log::{debug, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use super::DashboardSnapshot;
use crate::error::Result;
use crate::store::RunStore;

pub const DEFAULT_REFRESH_SECS: u64 = 5;

pub type SnapshotReceiver = watch::Receiver<Arc<DashboardSnapshot>>;

/// Re-reads the whole collection and rebuilds every view.
pub async fn refresh_once(store: &dyn RunStore) -> Result<DashboardSnapshot> {
    let documents = store.find_all().await?;

    if documents.is_empty() {
        warn!("Collection is empty, dashboard shows placeholders");
    }

    Ok(DashboardSnapshot::from_documents(&documents))
}

/// Publishes a fresh snapshot every `period`, starting from `initial`.
///
/// A slow read delays the next tick instead of queueing extra ones. A failed
/// read is logged and the previous snapshot stays published. The task ends once
/// every receiver is dropped.
pub fn spawn_refresh(
    store: Arc<dyn RunStore>,
    period: Duration,
    initial: DashboardSnapshot,
) -> (SnapshotReceiver, JoinHandle<()>) {
    let (tx, rx) = watch::channel(Arc::new(initial));

    let handle = tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick completes immediately; `initial` already covers it
        ticker.tick().await;

        loop {
            ticker.tick().await;

            match refresh_once(store.as_ref()).await {
                Ok(snapshot) => {
                    debug!("Dashboard refreshed ({} documents)", snapshot.documents);
                    if tx.send(Arc::new(snapshot)).is_err() {
                        debug!("No dashboard subscribers left, stopping refresh");
                        break;
                    }
                }
                Err(e) => warn!("Dashboard refresh failed, keeping previous snapshot: {e}"),
            }
        }
    });

    (rx, handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::views::Panel;
    use crate::models::{SuiteResult, TestRunDocument};
    use crate::store::MemoryStore;

    fn run(date: &str, suite: &str) -> TestRunDocument {
        TestRunDocument {
            date: date.to_string(),
            ok: 1,
            ng: 1,
            total: 2,
            suites: vec![SuiteResult {
                name: suite.to_string(),
                ok: Some(1),
                ng: Some(1),
                total: Some(2),
            }],
            success_rate: 50.0,
        }
    }

    fn table_columns(snapshot: &DashboardSnapshot) -> Vec<String> {
        match &snapshot.table {
            Panel::Ready { data, .. } => data.columns.clone(),
            Panel::NoData { .. } => Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_refresh_once_on_empty_store() {
        let store = MemoryStore::new();

        let snapshot = refresh_once(&store).await.unwrap();

        assert_eq!(snapshot.documents, 0);
        assert!(matches!(snapshot.time_series, Panel::NoData { .. }));
        assert!(matches!(snapshot.table, Panel::NoData { .. }));
    }

    #[tokio::test]
    async fn test_refresh_picks_up_new_suites() {
        let store = Arc::new(MemoryStore::new());
        store.insert(&run("2024-01-01", "login")).await.unwrap();

        let initial = refresh_once(store.as_ref()).await.unwrap();
        assert_eq!(table_columns(&initial).len(), 8);

        let (mut rx, handle) = spawn_refresh(store.clone(), Duration::from_millis(20), initial);
        store.insert(&run("2024-01-02", "search")).await.unwrap();

        let snapshot = tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                rx.changed().await.unwrap();
                let snapshot = rx.borrow_and_update().clone();
                if snapshot.documents == 2 {
                    break snapshot;
                }
            }
        })
        .await
        .unwrap();

        let columns = table_columns(&snapshot);
        assert_eq!(columns.len(), 11);
        assert!(columns.contains(&"search_NG".to_string()));

        handle.abort();
    }
}
