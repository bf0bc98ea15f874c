use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::num::NonZeroU32;

/// One page of the remote listing as served on the wire.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RawListingPage {
    pub data: Vec<RawTrade>,
    pub meta: ListingMeta,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ListingMeta {
    pub paging: Paging,
}

/// `total_items` is the watermark signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paging {
    pub page: u32,
    pub size: u32,
    pub total_items: u64,
    pub total_pages: u64,
}

/// A trade record in the endpoint's own schema.
///
/// Identifiers and filing metadata are read here but never leave this type.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTrade {
    #[serde(rename = "_txId", default)]
    pub tx_id: Option<i64>,
    #[serde(rename = "_politicianId", default)]
    pub politician_id: Option<String>,
    #[serde(rename = "_assetId", default)]
    pub asset_id: Option<i64>,
    #[serde(rename = "_issuerId", default)]
    pub issuer_id: Option<i64>,

    pub tx_date: String,
    pub tx_type: String,
    #[serde(default)]
    pub tx_type_extended: Option<Value>,
    #[serde(default)]
    pub chamber: Option<String>,
    pub price: f64,
    pub size: f64,
    pub value: f64,
    #[serde(rename = "filingURL", default)]
    pub filing_url: Option<String>,
    pub reporting_gap: i64,
    #[serde(default)]
    pub committees: Vec<String>,

    pub asset: RawAsset,
    pub issuer: RawIssuer,
    pub politician: RawPolitician,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAsset {
    pub asset_type: String,
    #[serde(default)]
    pub asset_ticker: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawIssuer {
    #[serde(default)]
    pub country: Option<String>,
    pub issuer_name: String,
    #[serde(default)]
    pub issuer_ticker: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPolitician {
    pub chamber: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub party: Option<String>,
}

/// Flat trade record handed to callers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedTrade {
    pub size: f64,
    pub price: f64,
    pub value: f64,
    pub trade_type: String,
    /// ISO date of the transaction
    pub trade_date: String,
    pub asset_type: String,
    pub asset_ticker: String,
    pub issuer_name: String,
    pub issuer_ticker: String,
    pub pol_first_name: String,
    pub pol_last_name: String,
    pub pol_chamber: String,
    /// Days between transaction and filing
    pub reporting_gap: i64,
}

impl From<RawTrade> for NormalizedTrade {
    fn from(raw: RawTrade) -> Self {
        Self {
            size: raw.size,
            price: raw.price,
            value: raw.value,
            trade_type: raw.tx_type,
            trade_date: raw.tx_date,
            asset_type: raw.asset.asset_type,
            asset_ticker: raw.asset.asset_ticker.unwrap_or_default(),
            issuer_name: raw.issuer.issuer_name,
            issuer_ticker: raw.issuer.issuer_ticker.unwrap_or_default(),
            pol_first_name: raw.politician.first_name,
            pol_last_name: raw.politician.last_name,
            pol_chamber: raw.politician.chamber,
            reporting_gap: raw.reporting_gap,
        }
    }
}

/// Outcome of a total-count query. `Unavailable` is a normal result, not an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TradeCount {
    Available(u64),
    Unavailable,
}

impl TradeCount {
    pub fn available(self) -> Option<u64> {
        match self {
            TradeCount::Available(n) => Some(n),
            TradeCount::Unavailable => None,
        }
    }

    pub fn is_available(self) -> bool {
        matches!(self, TradeCount::Available(_))
    }
}

/// Pages of `page_size` needed to cover `records` newest-first records.
pub fn pages_needed(records: u64, page_size: NonZeroU32) -> u32 {
    let pages = records.div_ceil(u64::from(page_size.get()));
    u32::try_from(pages).unwrap_or(u32::MAX)
}
