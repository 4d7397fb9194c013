use std::time::Duration;

use url::Url;

use crate::error::AppError;

/// Configuration for one crawl run.
///
/// Defaults reproduce the willhaben.at rental-flat search; every value is
/// explicit so tests (and other deployments) can substitute a different
/// target site.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Site origin, e.g. `https://www.willhaben.at`. Relative detail
    /// links are resolved against this.
    pub base_url: String,
    /// Path of the search-results endpoint.
    pub search_path: String,
    /// Opaque search/session identifier (`sfId` query parameter).
    pub search_id: String,
    /// Page index of the single search page to crawl.
    pub page: u32,
    /// Number of result rows requested.
    pub rows: u32,
    /// Hostnames fetches are restricted to. Empty disables the
    /// restriction.
    pub allowed_domains: Vec<String>,
    /// Path fragment identifying a property detail page.
    pub detail_path: String,
    /// Label phrase preceding the posted date on detail pages.
    pub date_label: String,
    /// Per-fetch timeout.
    pub fetch_timeout: Duration,
    /// Optional deadline for the whole run; once exceeded, remaining
    /// detail fetches are skipped.
    pub run_deadline: Option<Duration>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.willhaben.at".to_string(),
            search_path: "/iad/immobilien/mietwohnungen/mietwohnung-angebote".to_string(),
            search_id: "b31ce01d-432e-46ea-9b79-45f94596adc1".to_string(),
            page: 1,
            rows: 30,
            allowed_domains: vec!["willhaben.at".to_string(), "www.willhaben.at".to_string()],
            detail_path: "/iad/immobilien/d/".to_string(),
            date_label: "Zuletzt geändert:".to_string(),
            fetch_timeout: Duration::from_secs(30),
            run_deadline: None,
        }
    }
}

impl CrawlConfig {
    /// Build the phase-1 search URL from origin, path, and query
    /// parameters.
    pub fn search_url(&self) -> Result<Url, AppError> {
        let base = Url::parse(&self.base_url)
            .map_err(|e| AppError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        let mut url = base
            .join(&self.search_path)
            .map_err(|e| AppError::InvalidUrl(format!("{}: {e}", self.search_path)))?;
        url.query_pairs_mut()
            .append_pair("sfId", &self.search_id)
            .append_pair("isNavigation", "true")
            .append_pair("page", &self.page.to_string())
            .append_pair("rows", &self.rows.to_string());
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_search_url() {
        let url = CrawlConfig::default().search_url().unwrap();
        assert_eq!(url.host_str(), Some("www.willhaben.at"));
        assert_eq!(
            url.path(),
            "/iad/immobilien/mietwohnungen/mietwohnung-angebote"
        );
        let query = url.query().unwrap();
        assert!(query.contains("sfId=b31ce01d-432e-46ea-9b79-45f94596adc1"));
        assert!(query.contains("isNavigation=true"));
        assert!(query.contains("page=1"));
        assert!(query.contains("rows=30"));
    }

    #[test]
    fn test_search_url_rejects_malformed_base() {
        let config = CrawlConfig {
            base_url: "not a url".into(),
            ..CrawlConfig::default()
        };
        assert!(matches!(
            config.search_url(),
            Err(AppError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_default_allow_list_covers_both_hosts() {
        let config = CrawlConfig::default();
        assert_eq!(
            config.allowed_domains,
            vec!["willhaben.at".to_string(), "www.willhaben.at".to_string()]
        );
    }
}
