use crate::error::{SearchError, SearchResult};
use serde::Serialize;

pub const ORIENTATION: &str = "landscape";

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    query: String,
    page: u32,
    per_page: u32,
}

impl SearchRequest {
    pub fn new(query: &str, page: u32, per_page: u32) -> SearchResult<Self> {
        let query = query.trim();

        if query.is_empty() {
            return Err(SearchError::InvalidRequest("query is required".into()));
        }
        if page == 0 {
            return Err(SearchError::InvalidRequest("page starts at 1".into()));
        }
        if per_page == 0 {
            return Err(SearchError::InvalidRequest(
                "per_page must be positive".into(),
            ));
        }

        Ok(SearchRequest {
            query: query.to_string(),
            page,
            per_page,
        })
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn with_page(&self, page: u32) -> SearchResult<Self> {
        SearchRequest::new(&self.query, page, self.per_page)
    }

    /// Query string parameters shared by every data source.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("query", self.query.clone()),
            ("page", self.page.to_string()),
            ("per_page", self.per_page.to_string()),
            ("orientation", ORIENTATION.to_string()),
        ]
    }
}
