pub mod catalog;
pub mod config;
pub mod error;
pub mod json_helper;
pub mod pagination;
pub mod photo;
pub mod provider;
pub mod resolver;
pub mod search_request;
pub mod search_response;
pub mod session;

use anyhow::Result;
use config::Config;
use resolver::SearchResolver;
use session::SearchSession;

pub use error::{SearchError, SearchResult};
pub use search_request::SearchRequest;
pub use search_response::{SearchOutcome, SearchPage};

/// A session on the configured providers, positioned at `query` / `page`.
pub fn build_session(
    config: &Config,
    query: &str,
    page: u32,
) -> Result<SearchSession<SearchResolver>> {
    let resolver = SearchResolver::from_config(config)?;
    Ok(SearchSession::with_query(resolver, config.per_page, query, page))
}
