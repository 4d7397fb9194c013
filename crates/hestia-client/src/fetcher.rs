use std::time::Duration;

use hestia_core::error::AppError;
use hestia_core::traits::Fetcher;
use reqwest::Client;
use url::Url;

/// HTTP fetcher using reqwest.
///
/// Downloads raw HTML from URLs with a fixed User-Agent and configurable
/// timeout. Every request is validated against the allowed-domain list
/// before it is issued; a URL outside the list is rejected with
/// [`AppError::DomainNotAllowed`] and never touches the network. An
/// empty list disables the restriction.
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: Client,
    timeout_secs: u64,
    allowed_domains: Vec<String>,
}

impl ReqwestFetcher {
    pub fn new(allowed_domains: Vec<String>) -> Result<Self, AppError> {
        Self::with_timeout(allowed_domains, Duration::from_secs(30))
    }

    pub fn with_timeout(
        allowed_domains: Vec<String>,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let timeout_secs = timeout.as_secs();
        let client = Client::builder()
            .user_agent("Hestia/0.1 (listing crawler)")
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::HttpError(e.to_string()))?;

        Ok(Self {
            client,
            timeout_secs,
            allowed_domains,
        })
    }
}

impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<String, AppError> {
        validate_url(url, &self.allowed_domains)?;

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                AppError::Timeout(self.timeout_secs)
            } else if e.is_connect() {
                AppError::NetworkError(format!("Connection failed: {e}"))
            } else {
                AppError::HttpError(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::HttpError(format!(
                "HTTP {} for {}",
                status.as_u16(),
                url
            )));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::HttpError(format!("Failed to read response body: {e}")))
    }
}

// ---------------------------------------------------------------------------
// Domain restriction
// ---------------------------------------------------------------------------

/// Validate a URL before fetching.
///
/// 1. Only allow `http` and `https` schemes.
/// 2. The URL must carry a host.
/// 3. When the allow-list is non-empty, the host must match one of its
///    entries (case-insensitive, exact hostname).
fn validate_url(url: &str, allowed: &[String]) -> Result<(), AppError> {
    let parsed = Url::parse(url).map_err(|e| AppError::InvalidUrl(format!("{url}: {e}")))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(AppError::InvalidUrl(format!(
                "URL scheme '{scheme}' is not allowed (only http/https)"
            )));
        }
    }

    let host = parsed
        .host_str()
        .ok_or_else(|| AppError::InvalidUrl(format!("{url}: URL has no host")))?;

    if !allowed.is_empty() && !allowed.iter().any(|d| d.eq_ignore_ascii_case(host)) {
        return Err(AppError::DomainNotAllowed(host.to_string()));
    }

    Ok(())
}
