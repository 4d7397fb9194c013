use std::time::Instant;

use crate::config::CrawlConfig;
use crate::error::AppError;
use crate::store::ListingStore;
use crate::traits::{Fetcher, ListingExtractor};

/// Orchestrates the two-phase crawl: search page → listing store →
/// detail pages → amended store.
///
/// Generic over the fetcher and extractor via traits, enabling dependency
/// injection and testability without real HTTP.
///
/// Phase 2 consumes exactly the store contents left by phase 1, so the
/// detail crawl only starts once the search page and its extraction have
/// fully completed; fetches are awaited sequentially in store order.
pub struct CrawlService<F, E>
where
    F: Fetcher,
    E: ListingExtractor,
{
    fetcher: F,
    extractor: E,
    config: CrawlConfig,
    store: ListingStore,
}

impl<F, E> CrawlService<F, E>
where
    F: Fetcher,
    E: ListingExtractor,
{
    pub fn new(fetcher: F, extractor: E, config: CrawlConfig) -> Self {
        Self {
            fetcher,
            extractor,
            config,
            store: ListingStore::new(),
        }
    }

    /// Run the crawl to completion and return the populated store.
    ///
    /// Individual fetch failures never abort the run: the affected
    /// listing stays unenriched (phase 2) or the store stays empty
    /// (phase 1) and whatever was collected is still reported. The only
    /// `Err` before the crawl starts is a malformed base URL.
    pub async fn run(mut self) -> Result<ListingStore, AppError> {
        let search_url = self.config.search_url()?;
        let deadline = self.config.run_deadline.map(|d| Instant::now() + d);

        // Phase 1: one fetch of the search-results page.
        tracing::info!("Fetching {}", search_url);
        match self.fetcher.fetch(search_url.as_str()).await {
            Ok(html) => {
                tracing::info!("Fetched {} bytes of HTML", html.len());
                self.collect_search_results(&html)?;
            }
            Err(e) if e.is_recoverable() => {
                tracing::warn!(error = %e, "Search page fetch failed; continuing with empty result set");
            }
            Err(e) => return Err(e),
        }

        // Phase 2: the store now holds every discovered listing; visit
        // each listing's detail page in store order.
        let detail_urls: Vec<String> = self
            .store
            .iter()
            .filter(|l| !l.url.is_empty())
            .map(|l| l.url.clone())
            .collect();
        tracing::info!("Visiting {} detail pages", detail_urls.len());

        for url in detail_urls {
            if let Some(deadline) = deadline {
                if Instant::now() >= deadline {
                    tracing::warn!(%url, "Run deadline reached; skipping remaining detail pages");
                    break;
                }
            }
            self.enrich_from_detail_page(&url).await?;
        }

        Ok(self.store)
    }

    fn collect_search_results(&mut self, html: &str) -> Result<(), AppError> {
        match self.extractor.extract_search(html) {
            Ok(listings) => {
                let mut kept = 0usize;
                for listing in listings {
                    if self.store.append(listing) {
                        kept += 1;
                    } else {
                        tracing::debug!("Dropped search result without URL or title");
                    }
                }
                tracing::info!("Discovered {} listings", kept);
                Ok(())
            }
            Err(e) if e.is_recoverable() => {
                tracing::warn!(error = %e, "Search extraction failed");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    async fn enrich_from_detail_page(&mut self, url: &str) -> Result<(), AppError> {
        let html = match self.fetcher.fetch(url).await {
            Ok(html) => html,
            Err(e) if e.is_recoverable() => {
                tracing::warn!(%url, error = %e, "Detail fetch failed; continuing");
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        match self.extractor.extract_detail(url, &html) {
            Ok(Some(date)) => match self.store.find_by_url_mut(url) {
                Some(listing) => {
                    tracing::debug!(%url, %date, "Amended posted date");
                    listing.posted_date = date;
                }
                None => tracing::debug!(%url, "No listing matches detail URL; discarding date"),
            },
            Ok(None) => {}
            Err(e) if e.is_recoverable() => {
                tracing::warn!(%url, error = %e, "Detail extraction failed; continuing");
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }
}
