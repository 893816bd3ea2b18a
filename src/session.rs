use crate::catalog::{self, DEFAULT_QUERY};
use crate::error::{SearchError, SearchResult};
use crate::pagination::Pagination;
use crate::photo::PhotoResult;
use crate::resolver::PhotoSearch;
use crate::search_request::SearchRequest;
use crate::search_response::{SearchOutcome, SearchPage};
use futures::future::{AbortHandle, Abortable};
use log::{debug, info, warn};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::JoinHandle;

/// Only the outcome of the latest issued request may touch the visible state.
#[derive(Debug, Default)]
pub struct OutcomeSlot {
    issued: u64,
    loading: bool,
    outcome: Option<SearchOutcome>,
}

impl OutcomeSlot {
    pub fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.loading = true;
        self.issued
    }

    /// Invalidates whatever is in flight without issuing anything new.
    pub fn supersede(&mut self) {
        self.issued += 1;
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn outcome(&self) -> Option<&SearchOutcome> {
        self.outcome.as_ref()
    }

    /// Returns whether the result became the current outcome.
    pub fn apply(&mut self, sequence: u64, result: SearchResult<SearchPage>) -> bool {
        if sequence != self.issued {
            debug!("dropping outcome #{} (latest is #{})", sequence, self.issued);
            return false;
        }

        match SearchOutcome::from_result(result) {
            Some(outcome) => {
                self.outcome = Some(outcome);
                self.loading = false;
                true
            }
            None => false,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub query: String,
    pub page: u32,
    pub loading: bool,
    pub photos: Vec<PhotoResult>,
    pub total_results: u64,
    pub total_pages: u32,
    pub pages: Vec<u32>,
    pub error: Option<String>,
    pub active_category: Option<&'static str>,
}

pub struct SearchSession<S: PhotoSearch> {
    searcher: S,
    per_page: u32,
    query: String,
    page: u32,
    slot: Arc<Mutex<OutcomeSlot>>,
    in_flight: Option<AbortHandle>,
}

impl<S: PhotoSearch> SearchSession<S> {
    pub fn new(searcher: S, per_page: u32) -> Self {
        SearchSession::with_query(searcher, per_page, DEFAULT_QUERY, 1)
    }

    pub fn with_query(searcher: S, per_page: u32, query: &str, page: u32) -> Self {
        SearchSession {
            searcher,
            per_page,
            query: query.trim().to_string(),
            page: page.max(1),
            slot: Arc::new(Mutex::new(OutcomeSlot::default())),
            in_flight: None,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// Searches for the current query and page unconditionally.
    pub fn load(&mut self) -> Option<JoinHandle<()>> {
        self.issue()
    }

    /// Blank input is ignored. A new query always starts at page 1.
    pub fn trigger_search(&mut self, text: &str) -> Option<JoinHandle<()>> {
        let query = text.trim();
        if query.is_empty() {
            return None;
        }
        if query == self.query && self.page == 1 {
            return None;
        }

        self.query = query.to_string();
        self.page = 1;
        self.issue()
    }

    pub fn set_page(&mut self, page: u32) -> Option<JoinHandle<()>> {
        let page = page.max(1);
        if page == self.page {
            return None;
        }

        self.page = page;
        self.issue()
    }

    pub fn next_page(&mut self) -> Option<JoinHandle<()>> {
        let next = self.pagination().next();
        self.set_page(next)
    }

    pub fn previous_page(&mut self) -> Option<JoinHandle<()>> {
        let previous = self.pagination().previous();
        self.set_page(previous)
    }

    pub fn select_category(&mut self, tag: &str) -> Option<JoinHandle<()>> {
        self.trigger_search(tag)
    }

    pub fn select_collection(&mut self, title: &str) -> Option<JoinHandle<()>> {
        match catalog::find_collection(title) {
            Some(collection) => self.trigger_search(collection.query),
            None => {
                warn!("unknown collection {:?}", title);
                None
            }
        }
    }

    pub fn browse_collections(&mut self) -> Option<JoinHandle<()>> {
        self.trigger_search(catalog::BROWSE_ALL_QUERY)
    }

    /// Abandons the in-flight request, leaving the displayed state as is.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
        self.lock_slot().supersede();
    }

    pub fn pagination(&self) -> Pagination {
        let total = self.lock_slot().outcome().map_or(0, SearchOutcome::total);
        Pagination::new(self.page, total, self.per_page)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let (loading, photos, total_results, error) = {
            let slot = self.lock_slot();
            let outcome = slot.outcome();
            (
                slot.is_loading(),
                outcome.map(|o| o.results().to_vec()).unwrap_or_default(),
                outcome.map_or(0, SearchOutcome::total),
                outcome.and_then(|o| o.error().map(str::to_string)),
            )
        };
        let pagination = Pagination::new(self.page, total_results, self.per_page);

        SessionSnapshot {
            query: self.query.clone(),
            page: self.page,
            loading,
            photos,
            total_results,
            total_pages: pagination.total_pages,
            pages: pagination.pages(),
            error,
            active_category: catalog::active_category(&self.query),
        }
    }

    fn lock_slot(&self) -> MutexGuard<'_, OutcomeSlot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn issue(&mut self) -> Option<JoinHandle<()>> {
        let request = match SearchRequest::new(&self.query, self.page, self.per_page) {
            Ok(request) => request,
            Err(err) => {
                warn!("not searching: {}", err);
                return None;
            }
        };

        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }

        let sequence = self.lock_slot().issue();
        info!(
            "search #{}: {:?} page {}",
            sequence,
            request.query(),
            request.page()
        );

        let (abort_handle, registration) = AbortHandle::new_pair();
        self.in_flight = Some(abort_handle);

        let search = Abortable::new(self.searcher.search(request), registration);
        let slot = Arc::clone(&self.slot);

        Some(tokio::spawn(async move {
            let result = search.await.unwrap_or(Err(SearchError::Cancelled));

            let mut slot = slot.lock().unwrap_or_else(PoisonError::into_inner);
            if slot.apply(sequence, result) {
                debug!("search #{} applied", sequence);
            }
        }))
    }
}

impl<S: PhotoSearch> Drop for SearchSession<S> {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}
