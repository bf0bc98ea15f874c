use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

use crate::{
    config::ListingConfig,
    constants::events,
    error::{FetchError, FetchResult},
};

use super::{
    http::HttpListingApi,
    traits::ListingApi,
    types::{NormalizedTrade, TradeCount},
};

/// Paginated access to the trade listing. No business logic.
///
/// Page size is fixed for the life of the client.
#[derive(Clone)]
pub struct ListingClient {
    api: Arc<dyn ListingApi>,
    page_size: NonZeroU32,
}

impl ListingClient {
    /// Fails with `InvalidPageSize` for a page size of 0.
    pub fn new(api: Arc<dyn ListingApi>, page_size: u32) -> FetchResult<Self> {
        let page_size =
            NonZeroU32::new(page_size).ok_or(FetchError::InvalidPageSize(page_size))?;
        Ok(Self { api, page_size })
    }

    /// HTTP-backed client for an already resolved endpoint.
    pub fn for_endpoint(endpoint: Url, config: &ListingConfig) -> FetchResult<Self> {
        let api = HttpListingApi::for_endpoint(endpoint, config)?;
        Self::new(Arc::new(api), config.page_size)
    }

    /// HTTP-backed client built from config.
    pub fn from_config(config: &ListingConfig) -> FetchResult<Self> {
        let api = HttpListingApi::from_config(config)?;
        Self::new(Arc::new(api), config.page_size)
    }

    pub fn page_size(&self) -> NonZeroU32 {
        self.page_size
    }

    /// Current total item count, read from page 1's paging metadata.
    ///
    /// Transport and shape failures come back as `TradeCount::Unavailable`.
    pub async fn fetch_count(&self) -> TradeCount {
        match self.api.get_page(1, self.page_size.get()).await {
            Ok(page) => TradeCount::Available(page.meta.paging.total_items),
            Err(e) => {
                warn!(
                    event = events::COUNT_UNAVAILABLE,
                    backend = self.api.name(),
                    "[LISTING] Trade count unavailable: {}",
                    e
                );
                TradeCount::Unavailable
            }
        }
    }

    /// One page (1-indexed), converted to normalized trades.
    pub async fn fetch_page(&self, page: u32) -> FetchResult<Vec<NormalizedTrade>> {
        if page == 0 {
            return Err(FetchError::InvalidPage(page));
        }

        let raw = self.api.get_page(page, self.page_size.get()).await?;
        debug!(
            event = events::PAGE_FETCHED,
            page,
            records = raw.data.len(),
            total_items = raw.meta.paging.total_items,
            "[LISTING] Page fetched"
        );

        Ok(raw.data.into_iter().map(NormalizedTrade::from).collect())
    }

    /// Pages `1..=count` in order, concatenated. Any page failure fails the whole call.
    pub async fn fetch_pages(&self, count: u32) -> FetchResult<Vec<NormalizedTrade>> {
        let mut trades = Vec::new();
        for page in 1..=count {
            trades.extend(self.fetch_page(page).await?);
        }
        Ok(trades)
    }
}
