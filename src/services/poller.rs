//! Cron-driven polling of the trade listing
//!
//! Wraps a single [`TradeFetcher`] behind an async mutex so scheduled ticks and
//! manual calls never run concurrently against the same watermark.

use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

use crate::{
    bus::EventBus,
    constants::events,
    error::{FetchResult, PollerError},
    events::TradeEvent,
    fetcher::{FetcherState, TradeFetcher},
};

pub struct TradePoller {
    fetcher: Arc<Mutex<TradeFetcher>>,
    bus: EventBus,
}

impl TradePoller {
    pub fn new(fetcher: TradeFetcher, bus: EventBus) -> Self {
        Self {
            fetcher: Arc::new(Mutex::new(fetcher)),
            bus,
        }
    }

    /// Current watermark, for callers that persist it between runs.
    pub async fn state(&self) -> FetcherState {
        self.fetcher.lock().await.state()
    }

    /// Run one incremental fetch and publish the outcome. Returns the number of new trades.
    pub async fn poll_once(&self) -> FetchResult<usize> {
        Self::poll(&self.fetcher, &self.bus).await
    }

    /// Publish the `n` most recent trades once, without touching the watermark.
    pub async fn backfill(&self, n: usize) -> FetchResult<usize> {
        let trades = self.fetcher.lock().await.fetch_last_n_trades(n).await?;
        let count = trades.len();
        let reached = self.bus.publish(TradeEvent::Backfill { trades });
        info!("📥 [POLLER] Backfilled {} trades ({} subscribers)", count, reached);
        Ok(count)
    }

    async fn poll(fetcher: &Mutex<TradeFetcher>, bus: &EventBus) -> FetchResult<usize> {
        let mut fetcher = fetcher.lock().await;
        match fetcher.fetch_all_new_trades().await {
            Ok(trades) => {
                let count = trades.len();
                if count > 0 {
                    let total = fetcher.state().last_trade_count;
                    info!("🆕 [POLLER] {} new trades (total: {:?})", count, total);
                    bus.publish(TradeEvent::NewTrades { trades, total });
                }
                Ok(count)
            }
            Err(e) => {
                error!(event = events::POLL_FAILED, "❌ [POLLER] Poll failed: {}", e);
                bus.publish(TradeEvent::PollFailed {
                    error: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Schedule `poll_once` on a cron expression (with seconds field).
    ///
    /// The returned scheduler must be kept alive; call `shutdown` on it to stop.
    pub async fn start(&self, cron_expression: &str) -> Result<JobScheduler, PollerError> {
        let fetcher = self.fetcher.clone();
        let bus = self.bus.clone();

        let job = Job::new_async(cron_expression, move |_uuid, _l| {
            let fetcher = fetcher.clone();
            let bus = bus.clone();

            Box::pin(async move {
                // Failures are already logged and published
                let _ = Self::poll(&fetcher, &bus).await;
            })
        })?;

        let scheduler = JobScheduler::new().await?;
        scheduler.add(job).await?;
        scheduler.start().await?;

        info!(
            "🔔 [POLLER] Cron job started with schedule: {}",
            cron_expression
        );

        Ok(scheduler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::ListingClient;
    use crate::testing::InMemoryListing;

    fn poller_over(listing: &Arc<InMemoryListing>, bus: EventBus) -> TradePoller {
        let fetcher = TradeFetcher::new(ListingClient::new(listing.clone(), 36).unwrap());
        TradePoller::new(fetcher, bus)
    }

    #[tokio::test]
    async fn test_poll_once_seeds_then_publishes() {
        let listing = Arc::new(InMemoryListing::with_generated(100));
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();
        let poller = poller_over(&listing, bus);

        assert_eq!(poller.poll_once().await.unwrap(), 0);
        assert_eq!(poller.state().await.last_trade_count, Some(100));

        listing.publish(7);
        assert_eq!(poller.poll_once().await.unwrap(), 7);

        match rx.recv().await.unwrap() {
            TradeEvent::NewTrades { trades, total } => {
                assert_eq!(trades.len(), 7);
                assert_eq!(total, Some(107));
            }
            other => panic!("Expected NewTrades, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_poll_failure_is_published() {
        let listing = Arc::new(InMemoryListing::with_generated(100));
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();
        let poller = poller_over(&listing, bus);
        poller.poll_once().await.unwrap();

        listing.publish(40);
        listing.fail_page(2);
        assert!(poller.poll_once().await.is_err());
        assert_eq!(poller.state().await.last_trade_count, Some(100));
        assert!(matches!(rx.recv().await, Ok(TradeEvent::PollFailed { .. })));
    }

    #[tokio::test]
    async fn test_backfill_publishes_without_seeding() {
        let listing = Arc::new(InMemoryListing::with_generated(100));
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();
        let poller = poller_over(&listing, bus);

        assert_eq!(poller.backfill(10).await.unwrap(), 10);
        assert!(!poller.state().await.is_seeded());
        assert!(matches!(
            rx.recv().await,
            Ok(TradeEvent::Backfill { trades }) if trades.len() == 10
        ));
    }

    #[tokio::test]
    async fn test_poll_without_subscribers_still_advances() {
        let listing = Arc::new(InMemoryListing::with_generated(50));
        let poller = poller_over(&listing, EventBus::new(4));
        poller.poll_once().await.unwrap();

        listing.publish(3);
        assert_eq!(poller.poll_once().await.unwrap(), 3);
        assert_eq!(poller.state().await.last_trade_count, Some(53));
    }

    #[tokio::test]
    async fn test_start_rejects_invalid_cron() {
        let listing = Arc::new(InMemoryListing::with_generated(1));
        let poller = poller_over(&listing, EventBus::new(4));

        let result = poller.start("definitely not cron").await;
        assert!(matches!(result, Err(PollerError::Scheduler(_))));
    }
}
