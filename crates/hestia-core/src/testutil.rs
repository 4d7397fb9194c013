//! Test utilities: mock implementations of the core traits.
//!
//! Handwritten mocks for dependency injection in unit tests. All mocks
//! use `Arc<Mutex<_>>` for interior mutability, allowing test assertions
//! on recorded calls.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::AppError;
use crate::models::Listing;
use crate::traits::{Fetcher, ListingExtractor};

// ---------------------------------------------------------------------------
// MockFetcher
// ---------------------------------------------------------------------------

/// Mock fetcher that replays a queue of canned responses and records
/// every requested URL.
#[derive(Clone)]
pub struct MockFetcher {
    /// Queue of responses. Each call pops the first element.
    /// If empty, returns a default HTML string.
    responses: Arc<Mutex<Vec<Result<String, AppError>>>>,
    /// URLs in the order they were fetched.
    pub requests: Arc<Mutex<Vec<String>>>,
}

impl MockFetcher {
    pub fn new(html: &str) -> Self {
        Self::with_responses(vec![Ok(html.to_string())])
    }

    pub fn with_error(error: AppError) -> Self {
        Self::with_responses(vec![Err(error)])
    }

    pub fn with_responses(responses: Vec<Result<String, AppError>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<String, AppError> {
        self.requests.lock().unwrap().push(url.to_string());
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok("<html><body>default</body></html>".to_string())
        } else {
            responses.remove(0)
        }
    }
}

// ---------------------------------------------------------------------------
// MockExtractor
// ---------------------------------------------------------------------------

/// Mock extractor with configurable search results and per-URL detail
/// dates.
#[derive(Clone)]
pub struct MockExtractor {
    listings: Arc<Mutex<Vec<Listing>>>,
    dates: Arc<Mutex<HashMap<String, String>>>,
    search_error: Arc<Mutex<Option<AppError>>>,
}

impl MockExtractor {
    /// Extractor whose search pass yields the given listings.
    pub fn with_listings(listings: Vec<Listing>) -> Self {
        Self {
            listings: Arc::new(Mutex::new(listings)),
            dates: Arc::new(Mutex::new(HashMap::new())),
            search_error: Arc::new(Mutex::new(None)),
        }
    }

    /// Extractor whose search pass fails once with the given error.
    pub fn with_search_error(error: AppError) -> Self {
        Self {
            listings: Arc::new(Mutex::new(Vec::new())),
            dates: Arc::new(Mutex::new(HashMap::new())),
            search_error: Arc::new(Mutex::new(Some(error))),
        }
    }

    /// Register the posted date the detail pass yields for a URL.
    pub fn and_date(self, url: &str, date: &str) -> Self {
        self.dates
            .lock()
            .unwrap()
            .insert(url.to_string(), date.to_string());
        self
    }
}

impl ListingExtractor for MockExtractor {
    fn extract_search(&self, _html: &str) -> Result<Vec<Listing>, AppError> {
        let mut err = self.search_error.lock().unwrap();
        if let Some(e) = err.take() {
            return Err(e);
        }
        Ok(self.listings.lock().unwrap().clone())
    }

    fn extract_detail(&self, url: &str, _html: &str) -> Result<Option<String>, AppError> {
        Ok(self.dates.lock().unwrap().get(url).cloned())
    }
}
