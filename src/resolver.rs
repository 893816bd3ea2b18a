use crate::config::Config;
use crate::error::{SearchError, SearchResult};
use crate::provider::Provider;
use crate::search_request::SearchRequest;
use crate::search_response::SearchPage;
use anyhow::{Context, Result};
use futures::future::{BoxFuture, FutureExt};
use log::{info, warn};
use reqwest::Client;
use std::time::Instant;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Something that turns a request into a page of photos. The session runs
/// it on the tokio runtime, so the returned future must own its state.
pub trait PhotoSearch: Send + Sync + 'static {
    fn search(&self, request: SearchRequest) -> BoxFuture<'static, SearchResult<SearchPage>>;
}

#[derive(Debug, Clone)]
pub struct SearchResolver {
    client: Client,
    providers: Vec<Provider>,
}

impl SearchResolver {
    pub fn new(client: Client, providers: Vec<Provider>) -> Self {
        SearchResolver { client, providers }
    }

    /// Official API first when a key is configured, then the public proxy.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Error building http client")?;

        let mut providers = vec![];
        if let Some(access_key) = &config.access_key {
            providers.push(Provider::official(&config.api_base_url, access_key));
        }
        providers.push(Provider::public_proxy(&config.proxy_base_url));

        Ok(SearchResolver::new(client, providers))
    }

    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    pub async fn resolve(&self, request: &SearchRequest) -> SearchResult<SearchPage> {
        let start = Instant::now();

        for (position, provider) in self.providers.iter().enumerate() {
            let has_next = position + 1 < self.providers.len();

            match provider.fetch(&self.client, request).await {
                Ok(page) => {
                    info!(
                        "{:?} returned {} of {} for {:?} page {} in {:?}",
                        provider.kind(),
                        page.results.len(),
                        page.total,
                        request.query(),
                        request.page(),
                        start.elapsed()
                    );
                    return Ok(page);
                }
                Err(err) if has_next && provider.falls_through(&err) => {
                    warn!(
                        "{} rejected the search ({}), falling back",
                        provider.endpoint(),
                        err
                    );
                }
                Err(err) => return Err(err),
            }
        }

        Err(SearchError::Network("no search providers configured".into()))
    }
}

impl PhotoSearch for SearchResolver {
    fn search(&self, request: SearchRequest) -> BoxFuture<'static, SearchResult<SearchPage>> {
        let resolver = self.clone();
        async move { resolver.resolve(&request).await }.boxed()
    }
}
