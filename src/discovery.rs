//! Endpoint discovery
//!
//! The live listing URL can be found by driving a browser to the landing page and
//! watching which request the trades view fires. That bootstrap runs outside this
//! crate; anything that can produce the URL plugs in through [`EndpointDiscovery`].

use async_trait::async_trait;
use url::Url;

use crate::error::FetchResult;

#[async_trait]
pub trait EndpointDiscovery: Send + Sync {
    /// Base URL of the trade listing endpoint.
    async fn discover(&self) -> FetchResult<Url>;
}

/// A URL known ahead of time (config or environment).
#[derive(Clone, Debug)]
pub struct StaticEndpoint {
    url: String,
}

impl StaticEndpoint {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[async_trait]
impl EndpointDiscovery for StaticEndpoint {
    async fn discover(&self) -> FetchResult<Url> {
        Ok(Url::parse(&self.url)?)
    }
}
