//! Incremental trade fetching
//!
//! [`TradeFetcher`] owns a watermark (the last observed total trade count) and
//! turns "how many new records exist" into "exactly which records" by paging the
//! newest-first listing just far enough and trimming the over-fetched tail.
//!
//! Callers must serialize calls on a given fetcher; `fetch_all_new_trades`
//! takes `&mut self` for that reason.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    constants::events,
    error::FetchResult,
    listing::{
        types::{pages_needed, NormalizedTrade, TradeCount},
        ListingClient,
    },
};

/// Watermark state. `None` until the first successful count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetcherState {
    pub last_trade_count: Option<u64>,
}

impl FetcherState {
    pub fn new(last_trade_count: Option<u64>) -> Self {
        Self { last_trade_count }
    }

    pub fn is_seeded(&self) -> bool {
        self.last_trade_count.is_some()
    }
}

pub struct TradeFetcher {
    client: ListingClient,
    state: FetcherState,
}

impl TradeFetcher {
    /// Unseeded fetcher; the first `fetch_all_new_trades` only establishes a baseline.
    pub fn new(client: ListingClient) -> Self {
        Self::with_state(client, FetcherState::default())
    }

    /// Resume from a previously saved watermark.
    pub fn with_state(client: ListingClient, state: FetcherState) -> Self {
        Self { client, state }
    }

    pub fn state(&self) -> FetcherState {
        self.state
    }

    pub async fn fetch_trade_count(&self) -> TradeCount {
        self.client.fetch_count().await
    }

    /// Trades published since the last call, newest first.
    ///
    /// An unavailable count yields an empty result and leaves the watermark alone.
    /// The watermark only moves after the pages needed were all fetched.
    pub async fn fetch_all_new_trades(&mut self) -> FetchResult<Vec<NormalizedTrade>> {
        let current = match self.client.fetch_count().await {
            TradeCount::Available(n) => n,
            TradeCount::Unavailable => return Ok(Vec::new()),
        };

        let last = match self.state.last_trade_count {
            Some(last) => last,
            None => {
                info!(
                    event = events::WATERMARK_SEEDED,
                    total = current,
                    "[FETCHER] Watermark seeded"
                );
                self.state.last_trade_count = Some(current);
                return Ok(Vec::new());
            }
        };

        if current <= last {
            if current < last {
                warn!(
                    event = events::TOTAL_SHRANK,
                    previous = last,
                    total = current,
                    "[FETCHER] Remote total decreased, treating as no new trades"
                );
            }
            self.state.last_trade_count = Some(current);
            return Ok(Vec::new());
        }

        let delta = current - last;
        let pages = pages_needed(delta, self.client.page_size());
        debug!(delta, pages, "[FETCHER] Fetching new trades");

        let mut trades = self.client.fetch_pages(pages).await?;
        trades.truncate(usize::try_from(delta).unwrap_or(usize::MAX));

        self.state.last_trade_count = Some(current);
        info!(
            event = events::WATERMARK_ADVANCED,
            previous = last,
            total = current,
            new_trades = trades.len(),
            "[FETCHER] Watermark advanced"
        );

        Ok(trades)
    }

    /// The `n` most recent trades, newest first. Does not touch the watermark.
    pub async fn fetch_last_n_trades(&self, n: usize) -> FetchResult<Vec<NormalizedTrade>> {
        let pages = pages_needed(n as u64, self.client.page_size());
        let mut trades = self.client.fetch_pages(pages).await?;
        trades.truncate(n);
        Ok(trades)
    }
}
