use thiserror::Error;

pub const GENERIC_FAILURE_MESSAGE: &str = "Could not load images from Unsplash";

pub type SearchResult<T> = Result<T, SearchError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("invalid search request: {0}")]
    InvalidRequest(String),

    /// The official API refused the access key (401/403).
    #[error("Unsplash request failed with status {status}")]
    AuthRejected { status: u16 },

    #[error("{message}")]
    Provider { status: u16, message: String },

    /// The request was superseded before it settled.
    #[error("search request cancelled")]
    Cancelled,

    #[error("{0}")]
    Network(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(error: reqwest::Error) -> Self {
        SearchError::Network(error.to_string())
    }
}

impl SearchError {
    pub fn is_auth_rejection(&self) -> bool {
        matches!(self, SearchError::AuthRejected { .. })
    }

    /// Cancellations are swallowed; everything else is shown to the user.
    pub fn is_user_visible(&self) -> bool {
        !matches!(self, SearchError::Cancelled)
    }

    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            GENERIC_FAILURE_MESSAGE.to_string()
        } else {
            message
        }
    }
}
