use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::{
    config::ListingConfig,
    constants::listing::{PAGE_PARAM, PAGE_SIZE_PARAM, SORT_BY_PARAM},
    error::{FetchError, FetchResult},
};

use super::{traits::ListingApi, types::RawListingPage};

/// Listing endpoint over HTTP.
#[derive(Clone)]
pub struct HttpListingApi {
    client: Client,
    base_url: Url,
    sort_by: String,
}

impl HttpListingApi {
    pub fn new(base_url: &str, sort_by: impl Into<String>, timeout: Duration) -> FetchResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: Url::parse(base_url)?,
            sort_by: sort_by.into(),
        })
    }

    pub fn from_config(config: &ListingConfig) -> FetchResult<Self> {
        Self::for_endpoint(Url::parse(&config.base_url)?, config)
    }

    /// Use `endpoint` instead of `config.base_url`, e.g. one produced by discovery.
    pub fn for_endpoint(endpoint: Url, config: &ListingConfig) -> FetchResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: endpoint,
            sort_by: config.sort_by.clone(),
        })
    }

    pub fn page_url(&self, page: u32, page_size: u32) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair(SORT_BY_PARAM, &self.sort_by)
            .append_pair(PAGE_SIZE_PARAM, &page_size.to_string())
            .append_pair(PAGE_PARAM, &page.to_string());
        url
    }
}

#[async_trait]
impl ListingApi for HttpListingApi {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn get_page(&self, page: u32, page_size: u32) -> FetchResult<RawListingPage> {
        let url = self.page_url(page, page_size);
        debug!("[LISTING] GET {}", url);

        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(serde_json::from_str(&text)?)
    }
}
