//! Application-wide constants
//!
//! Defaults for the remote listing endpoint and the event names used in
//! structured logging. Runtime values come from `AppConfig`; these only seed it.

/// Remote listing endpoint defaults
pub mod listing {
    /// Public trade listing endpoint
    pub const DEFAULT_TRADES_URL: &str = "https://bff.capitoltrades.com/trades";

    /// Records per page. The endpoint does not serve partial pages.
    pub const DEFAULT_PAGE_SIZE: u32 = 36;

    /// Newest transaction first
    pub const DEFAULT_SORT_BY: &str = "-txDate";

    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Query parameter names
    pub const SORT_BY_PARAM: &str = "sortBy";
    pub const PAGE_SIZE_PARAM: &str = "pageSize";
    pub const PAGE_PARAM: &str = "page";
}

/// Poller defaults
pub mod poller {
    /// Every five minutes (cron with seconds field)
    pub const DEFAULT_CRON: &str = "0 */5 * * * *";

    /// Broadcast capacity for trade events
    pub const EVENT_BUS_CAPACITY: usize = 256;
}

/// Logging event names for structured logging
pub mod events {
    pub const COUNT_UNAVAILABLE: &str = "count_unavailable";
    pub const WATERMARK_SEEDED: &str = "watermark_seeded";
    pub const WATERMARK_ADVANCED: &str = "watermark_advanced";
    pub const TOTAL_SHRANK: &str = "total_shrank";
    pub const PAGE_FETCHED: &str = "page_fetched";
    pub const POLL_FAILED: &str = "poll_failed";
}
