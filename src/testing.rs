//! In-memory listing backend and record fixtures.
//!
//! [`InMemoryListing`] serves pages from a newest-first vector and can be told to
//! fail specific pages or misreport its total, which is enough to drive the
//! fetcher through every watermark path without a network.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use crate::{
    error::{FetchError, FetchResult},
    listing::{
        traits::ListingApi,
        types::{ListingMeta, Paging, RawAsset, RawIssuer, RawListingPage, RawPolitician, RawTrade},
    },
};

#[derive(Default)]
struct Inner {
    records: Vec<RawTrade>,
    total_override: Option<u64>,
    failing_pages: HashSet<u32>,
    fail_all: bool,
    requested_pages: Vec<u32>,
}

#[derive(Default)]
pub struct InMemoryListing {
    inner: Mutex<Inner>,
}

fn lock(m: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl InMemoryListing {
    /// `records` must already be newest-first.
    pub fn new(records: Vec<RawTrade>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                records,
                ..Inner::default()
            }),
        }
    }

    /// Listing of `count` generated records, newest-first.
    pub fn with_generated(count: usize) -> Self {
        Self::new((0..count).rev().map(sample_raw_trade).collect())
    }

    /// Publish `count` newer records at the head of the listing.
    pub fn publish(&self, count: usize) {
        let mut inner = lock(&self.inner);
        let start = inner.records.len();
        let fresh: Vec<RawTrade> = (start..start + count).rev().map(sample_raw_trade).collect();
        inner.records.splice(0..0, fresh);
    }

    pub fn set_total(&self, total: Option<u64>) {
        lock(&self.inner).total_override = total;
    }

    pub fn fail_page(&self, page: u32) {
        lock(&self.inner).failing_pages.insert(page);
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        lock(&self.inner).fail_all = unavailable;
    }

    pub fn clear_failures(&self) {
        let mut inner = lock(&self.inner);
        inner.failing_pages.clear();
        inner.fail_all = false;
    }

    pub fn requested_pages(&self) -> Vec<u32> {
        lock(&self.inner).requested_pages.clone()
    }

    pub fn reset_requests(&self) {
        lock(&self.inner).requested_pages.clear();
    }
}

#[async_trait]
impl ListingApi for InMemoryListing {
    fn name(&self) -> &'static str {
        "in-memory"
    }

    async fn get_page(&self, page: u32, page_size: u32) -> FetchResult<RawListingPage> {
        let mut inner = lock(&self.inner);
        inner.requested_pages.push(page);

        if inner.fail_all || inner.failing_pages.contains(&page) {
            return Err(FetchError::Backend(format!("page {} unavailable", page)));
        }

        let size = page_size as usize;
        let start = (page.saturating_sub(1) as usize).saturating_mul(size);
        let data: Vec<RawTrade> = inner.records.iter().skip(start).take(size).cloned().collect();
        let total_items = inner
            .total_override
            .unwrap_or(inner.records.len() as u64);

        Ok(RawListingPage {
            data,
            meta: ListingMeta {
                paging: Paging {
                    page,
                    size: page_size,
                    total_items,
                    total_pages: total_items.div_ceil(u64::from(page_size.max(1))),
                },
            },
        })
    }
}

/// Deterministic raw record; `index` shows up in `size` and the issuer name.
pub fn sample_raw_trade(index: usize) -> RawTrade {
    RawTrade {
        tx_id: Some(10_000 + index as i64),
        politician_id: Some(format!("P{:06}", index % 50)),
        asset_id: Some(index as i64 % 300),
        issuer_id: Some(index as i64 % 200),
        tx_date: format!("2024-{:02}-{:02}", index % 12 + 1, index % 28 + 1),
        tx_type: if index % 2 == 0 { "buy" } else { "sell" }.to_string(),
        tx_type_extended: None,
        chamber: Some("house".to_string()),
        price: 100.0 + index as f64,
        size: index as f64,
        value: (100.0 + index as f64) * index as f64,
        filing_url: Some(format!("https://example.invalid/filings/{}", index)),
        reporting_gap: (index % 45) as i64,
        committees: vec![],
        asset: RawAsset {
            asset_type: "stock".to_string(),
            asset_ticker: Some(format!("T{}:US", index)),
        },
        issuer: RawIssuer {
            country: Some("us".to_string()),
            issuer_name: format!("Issuer {}", index),
            issuer_ticker: Some(format!("T{}:US", index)),
        },
        politician: RawPolitician {
            chamber: "house".to_string(),
            first_name: "Pat".to_string(),
            last_name: format!("Member{}", index % 50),
            gender: None,
            party: Some("independent".to_string()),
        },
    }
}
