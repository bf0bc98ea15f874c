use serde::{Deserialize, Serialize};

use crate::listing::types::NormalizedTrade;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum TradeEvent {
    /// Trades published since the previous poll, newest first
    NewTrades { trades: Vec<NormalizedTrade>, total: Option<u64> },
    /// One-off startup backfill
    Backfill { trades: Vec<NormalizedTrade> },
    PollFailed { error: String },
}
