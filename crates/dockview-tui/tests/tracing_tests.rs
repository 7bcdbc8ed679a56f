//! Log output while the TUI owns the terminal.
//!
//! Installs a global subscriber, so it lives in its own test binary.

mod helpers;

use dockview_core::test_support::{mock_container_record, MockProvider};
use dockview_provider::ProviderError;
use dockview_tui::RefreshTrigger;
use helpers::app_for;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

/// Counts every event that reaches it
struct EventCounter(Arc<AtomicUsize>);

impl<S: tracing::Subscriber> Layer<S> for EventCounter {
    fn on_event(&self, _event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_silenced_app_logs_nothing_from_worker_threads() {
    let count = Arc::new(AtomicUsize::new(0));
    tracing::subscriber::set_global_default(
        tracing_subscriber::registry().with(EventCounter(count.clone())),
    )
    .unwrap();

    // Without the guard, failures in spawned requests reach the global subscriber
    tokio::spawn(async { tracing::warn!("worker event") })
        .await
        .unwrap();
    assert!(count.load(Ordering::SeqCst) >= 1);

    let _guard = dockview_tui::silence_tracing();
    let before = count.load(Ordering::SeqCst);

    let mock = Arc::new(
        MockProvider::new().with_containers(vec![mock_container_record("id-a", "a", "running")]),
    );
    *mock.logs_result.lock().unwrap() = Err(ProviderError::RuntimeError("no log driver".into()));
    let mut app = app_for(&mock);
    app.request_refresh(RefreshTrigger::Startup);
    app.settle().await;
    assert!(app.logs.is_error());

    *mock.list_result.lock().unwrap() = Err(ProviderError::RuntimeError("boom".into()));
    app.request_refresh(RefreshTrigger::User);
    app.settle().await;
    assert!(app.status.as_ref().unwrap().message.starts_with("Refresh error:"));

    assert_eq!(count.load(Ordering::SeqCst), before);
}
