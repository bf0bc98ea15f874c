use async_trait::async_trait;

use crate::error::FetchResult;

use super::types::RawListingPage;

/// A source of raw listing pages.
///
/// Implementations perform exactly one request per call, with no retries.
#[async_trait]
pub trait ListingApi: Send + Sync {
    fn name(&self) -> &'static str;

    /// Fetch one 1-indexed page, newest transaction first.
    async fn get_page(&self, page: u32, page_size: u32) -> FetchResult<RawListingPage>;
}
