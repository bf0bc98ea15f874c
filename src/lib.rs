//! Capitol Watch - incremental fetching of politician stock-trade disclosures
//!
//! This library tracks a watermark over a remote, newest-first trade listing and
//! returns only the trades published since the previous check, normalized into a
//! flat record shape.

pub mod bus;
pub mod config;
pub mod constants;
pub mod discovery;
pub mod error;
pub mod events;
pub mod fetcher;
pub mod listing;
pub mod services;
pub mod testing;

// Re-export commonly used types
pub use bus::EventBus;
pub use config::AppConfig;
pub use error::{FetchError, FetchResult};
pub use events::TradeEvent;
pub use fetcher::{FetcherState, TradeFetcher};
pub use listing::{ListingClient, NormalizedTrade, TradeCount};

#[cfg(test)]
mod config_tests;
