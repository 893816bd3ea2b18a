use crate::error::SearchError;
use crate::json_helper::JsonHelper;
use crate::photo::PhotoResult;
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct SearchPage {
    pub results: Vec<PhotoResult>,
    pub total: u64,
}

impl SearchPage {
    pub fn new(results: Vec<PhotoResult>, total: u64) -> Self {
        SearchPage { results, total }
    }

    /// A non-array `results` reads as no results and a non-numeric `total`
    /// as zero. A missing payload (body was not JSON) reads as empty.
    pub fn from_payload(payload: Option<&Value>) -> Self {
        let payload = match payload {
            Some(payload) => payload,
            None => return SearchPage::default(),
        };

        let results = match payload.get("results") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| match PhotoResult::from(item) {
                    Ok(photo) => Some(photo),
                    Err(err) => {
                        warn!("skipping photo: {}", err);
                        None
                    }
                })
                .collect(),
            _ => vec![],
        };

        let total = JsonHelper::parse_count(payload, &["total"]).unwrap_or(0);

        SearchPage::new(results, total)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchOutcome {
    Success(SearchPage),
    Failure { message: String },
}

impl SearchOutcome {
    pub fn success(page: SearchPage) -> Self {
        SearchOutcome::Success(page)
    }

    pub fn failure(message: &str) -> Self {
        SearchOutcome::Failure {
            message: message.to_string(),
        }
    }

    /// `None` for a cancelled request: it produces no outcome at all.
    pub fn from_result(result: Result<SearchPage, SearchError>) -> Option<Self> {
        match result {
            Ok(page) => Some(SearchOutcome::success(page)),
            Err(err) if !err.is_user_visible() => None,
            Err(err) => Some(SearchOutcome::failure(&err.user_message())),
        }
    }

    pub fn results(&self) -> &[PhotoResult] {
        match self {
            SearchOutcome::Success(page) => &page.results,
            SearchOutcome::Failure { .. } => &[],
        }
    }

    pub fn total(&self) -> u64 {
        match self {
            SearchOutcome::Success(page) => page.total,
            SearchOutcome::Failure { .. } => 0,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SearchOutcome::Success(_) => None,
            SearchOutcome::Failure { message } => Some(message),
        }
    }
}
