pub mod client;
pub mod http;
pub mod traits;
pub mod types;

pub use client::ListingClient;
pub use http::HttpListingApi;
pub use traits::ListingApi;
pub use types::{NormalizedTrade, RawListingPage, RawTrade, TradeCount};
