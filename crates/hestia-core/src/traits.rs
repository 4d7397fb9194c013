use std::future::Future;

use crate::error::AppError;
use crate::models::Listing;

/// Fetches raw HTML content from a URL.
///
/// Implementations enforce the allowed-domain restriction; a rejected
/// URL surfaces as [`AppError::DomainNotAllowed`].
pub trait Fetcher: Send + Sync + Clone {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, AppError>> + Send;
}

/// Reads listing fields out of fetched HTML documents.
///
/// Both rules are best-effort: a missing element leaves the field at its
/// empty value and never fails the pass.
pub trait ListingExtractor: Send + Sync + Clone {
    /// Parse a search-results document into zero or more listings, one
    /// per matching result-entry node.
    fn extract_search(&self, html: &str) -> Result<Vec<Listing>, AppError>;

    /// Parse a detail-page document and return the cleaned posted date,
    /// if the document is a detail page and carries one.
    fn extract_detail(&self, url: &str, html: &str) -> Result<Option<String>, AppError>;
}
