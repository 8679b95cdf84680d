//! Countdown domain rules on top of the remote store

use tracing::info;

use crate::{
    state::{CountdownState, CountdownStatus, StartOutcome},
    utils::now_millis,
};
use super::store::RemoteStateStore;

/// Query and start the shared countdown.
///
/// Writes are last-write-wins: two concurrent starts race and the later
/// write to the store is what every reader sees.
#[derive(Debug, Clone)]
pub struct CountdownService {
    store: RemoteStateStore,
}

impl CountdownService {
    pub fn new(store: RemoteStateStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &RemoteStateStore {
        &self.store
    }

    /// Current countdown as seen now
    pub async fn query(&self) -> CountdownStatus {
        self.query_at(now_millis()).await
    }

    /// Current countdown as seen at `now`; the stored activity flag is ignored
    pub async fn query_at(&self, now: i64) -> CountdownStatus {
        self.store.read().await.observe(now)
    }

    /// Start (or clear) the countdown now
    pub async fn start(&self, requested_end_time: Option<i64>) -> StartOutcome {
        self.start_at(requested_end_time, now_millis()).await
    }

    /// Start the countdown as of `now`.
    ///
    /// An absent or past end time clears any running countdown. Always
    /// reports success; store failures are only logged.
    pub async fn start_at(&self, requested_end_time: Option<i64>, now: i64) -> StartOutcome {
        let next = CountdownState::from_request(requested_end_time, now);
        match next.end_time {
            Some(end_time) => info!("Starting countdown ending at {} ({}ms from now)", end_time, end_time - now),
            None => info!("Clearing countdown"),
        }

        self.store.write(&next).await;

        StartOutcome {
            success: true,
            end_time: next.end_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::services::store::{tests::BrokenBackend, MemoryBackend};

    const NOW: i64 = 1_700_000_000_000;

    fn service_with(backend: Arc<MemoryBackend>) -> CountdownService {
        CountdownService::new(RemoteStateStore::configured(backend))
    }

    #[tokio::test]
    async fn test_query_empty_store_is_inactive() {
        let service = service_with(Arc::new(MemoryBackend::new()));
        assert_eq!(service.query_at(NOW).await, CountdownStatus::inactive());
    }

    #[tokio::test]
    async fn test_query_expired_record_is_inactive_regardless_of_flag() {
        let backend = Arc::new(MemoryBackend::with_record(CountdownState {
            end_time: Some(NOW - 1_000),
            is_active: true,
        }));
        let service = service_with(Arc::clone(&backend));

        assert_eq!(service.query_at(NOW).await, CountdownStatus::inactive());
        // Queries have no side effects; the stale record stays put
        assert_eq!(backend.record().and_then(|r| r.end_time), Some(NOW - 1_000));
    }

    #[tokio::test]
    async fn test_query_future_record_reports_remaining() {
        let service = service_with(Arc::new(MemoryBackend::with_record(CountdownState::running(
            NOW + 90_000,
        ))));

        let status = service.query_at(NOW).await;
        assert!(status.is_active);
        assert_eq!(status.end_time, Some(NOW + 90_000));
        assert_eq!(status.time_remaining, 90_000);
    }

    #[tokio::test]
    async fn test_query_wall_clock_remaining_within_tolerance() {
        let end_time = now_millis() + 60_000;
        let service = service_with(Arc::new(MemoryBackend::with_record(CountdownState::running(
            end_time,
        ))));

        let status = service.query().await;
        assert!(status.is_active);
        assert!(status.time_remaining <= 60_000);
        assert!(status.time_remaining > 55_000);
    }

    #[tokio::test]
    async fn test_start_future_end_time_persists_and_activates() {
        let backend = Arc::new(MemoryBackend::new());
        let service = service_with(Arc::clone(&backend));

        let outcome = service.start_at(Some(NOW + 1_000), NOW).await;
        assert_eq!(outcome, StartOutcome { success: true, end_time: Some(NOW + 1_000) });
        assert_eq!(backend.record(), Some(CountdownState::running(NOW + 1_000)));

        let early = service.query_at(NOW + 100).await;
        let later = service.query_at(NOW + 600).await;
        assert!(early.is_active && later.is_active);
        assert!(later.time_remaining < early.time_remaining);

        assert_eq!(service.query_at(NOW + 1_000).await, CountdownStatus::inactive());
    }

    #[tokio::test]
    async fn test_start_absent_or_past_clears() {
        let backend = Arc::new(MemoryBackend::with_record(CountdownState::running(NOW + 50_000)));
        let service = service_with(Arc::clone(&backend));

        let outcome = service.start_at(None, NOW).await;
        assert_eq!(outcome, StartOutcome { success: true, end_time: None });
        assert_eq!(backend.record(), Some(CountdownState::inactive()));
        assert_eq!(service.query_at(NOW).await, CountdownStatus::inactive());

        service.start_at(Some(NOW + 50_000), NOW).await;
        let outcome = service.start_at(Some(NOW - 1), NOW).await;
        assert_eq!(outcome.end_time, None);
        assert!(!service.query_at(NOW).await.is_active);
    }

    #[tokio::test]
    async fn test_restart_last_write_wins() {
        let service = service_with(Arc::new(MemoryBackend::new()));

        service.start_at(Some(NOW + 10_000), NOW).await;
        let outcome = service.start_at(Some(NOW + 20_000), NOW).await;
        assert!(outcome.success);
        assert_eq!(service.query_at(NOW).await.end_time, Some(NOW + 20_000));
    }

    #[tokio::test]
    async fn test_broken_store_never_fails_callers() {
        let service = CountdownService::new(RemoteStateStore::configured(BrokenBackend));

        let outcome = service.start_at(Some(NOW + 1_000), NOW).await;
        assert_eq!(outcome, StartOutcome { success: true, end_time: Some(NOW + 1_000) });
        assert_eq!(service.query_at(NOW).await, CountdownStatus::inactive());
    }

    #[tokio::test]
    async fn test_unconfigured_store_is_always_inactive() {
        let service = CountdownService::new(RemoteStateStore::Unconfigured);

        let outcome = service.start_at(Some(NOW + 1_000), NOW).await;
        assert!(outcome.success);
        assert_eq!(service.query_at(NOW).await, CountdownStatus::inactive());
    }
}
