use crate::error::{SearchError, SearchResult};
use crate::json_helper::JsonHelper;
use crate::search_request::SearchRequest;
use crate::search_response::SearchPage;
use log::debug;
use reqwest::{header::AUTHORIZATION, Client, StatusCode};
use serde_json::Value;
use std::fmt;

pub const SEARCH_PATH: &str = "/search/photos";
pub const ACCEPT_VERSION: &str = "v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// `api.unsplash.com`, authenticated with a client key.
    Official,
    /// Unauthenticated proxy to the public site's internal API.
    PublicProxy,
}

/// One tier of the search strategy. `falls_through` decides whether a
/// failure from this tier hands the same request to the next one.
#[derive(Clone)]
pub struct Provider {
    kind: ProviderKind,
    endpoint: String,
    access_key: Option<String>,
    falls_through: fn(&SearchError) -> bool,
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("kind", &self.kind)
            .field("endpoint", &self.endpoint)
            .field("access_key", &self.access_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Provider {
    pub fn official(base_url: &str, access_key: &str) -> Self {
        Provider {
            kind: ProviderKind::Official,
            endpoint: endpoint(base_url),
            access_key: Some(access_key.to_string()),
            falls_through: SearchError::is_auth_rejection,
        }
    }

    pub fn public_proxy(base_url: &str) -> Self {
        Provider {
            kind: ProviderKind::PublicProxy,
            endpoint: endpoint(base_url),
            access_key: None,
            falls_through: |_| false,
        }
    }

    pub fn kind(&self) -> ProviderKind {
        self.kind
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn falls_through(&self, error: &SearchError) -> bool {
        (self.falls_through)(error)
    }

    pub async fn fetch(&self, client: &Client, request: &SearchRequest) -> SearchResult<SearchPage> {
        let mut builder = client.get(&self.endpoint).query(&request.query_pairs());

        if let Some(access_key) = &self.access_key {
            builder = builder
                .header(AUTHORIZATION, format!("Client-ID {}", access_key))
                .header("Accept-Version", ACCEPT_VERSION);
        }

        let response = builder.send().await?;
        let status = response.status();
        // A body that fails to arrive or is not JSON counts as no payload;
        // the status line alone decides what happens next.
        let payload: Option<Value> = match response.bytes().await {
            Ok(body) => serde_json::from_slice(&body).ok(),
            Err(err) => {
                debug!("{:?} body unreadable: {}", self.kind, err);
                None
            }
        };

        debug!("{:?} responded {}", self.kind, status);

        if !status.is_success() {
            return Err(self.rejection(status, payload.as_ref()));
        }

        Ok(SearchPage::from_payload(payload.as_ref()))
    }

    fn rejection(&self, status: StatusCode, payload: Option<&Value>) -> SearchError {
        let code = status.as_u16();

        match self.kind {
            ProviderKind::Official
                if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN =>
            {
                SearchError::AuthRejected { status: code }
            }
            ProviderKind::Official => {
                let message = payload
                    .and_then(|payload| JsonHelper::parse_string_array(payload, &["errors"]).ok())
                    .map(|errors| errors.join(" "))
                    .unwrap_or_else(|| format!("Unsplash request failed with status {}", code));

                SearchError::Provider {
                    status: code,
                    message,
                }
            }
            ProviderKind::PublicProxy => SearchError::Provider {
                status: code,
                message: format!("Unsplash fallback failed with status {}", code),
            },
        }
    }
}

fn endpoint(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), SEARCH_PATH)
}
