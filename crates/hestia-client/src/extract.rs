use hestia_core::config::CrawlConfig;
use hestia_core::error::AppError;
use hestia_core::models::{ATTRIBUTE_SEPARATOR, Listing};
use hestia_core::traits::ListingExtractor;
use scraper::{ElementRef, Html, Selector};
use url::Url;

// Structural patterns of the willhaben result and detail markup.
const RESULT_ENTRY: &str = "a[id^='search-result-entry-header-']";
const TITLE: &str = "h3";
const PRICE: &str = "span[data-testid^='search-result-entry-price-']";
const LOCATION: &str = "span[aria-label^='Ort']";
const SELLER: &str = "span[data-testid^='search-result-entry-seller-information-']";
const TEASER_ATTRIBUTES: &str = "div[data-testid^='search-result-entry-teaser-attributes-'] div";
const POSTED_DATE: &str = "span[data-testid^='ad-detail-ad-edit-date-top']";

/// CSS-selector field extraction over parsed HTML documents.
///
/// Holds the precompiled selectors for both passes. Every step is
/// best-effort: a missing element leaves its field empty and the
/// remaining steps still run.
#[derive(Clone)]
pub struct CssExtractor {
    base: Url,
    detail_path: String,
    date_label: String,
    entry: Selector,
    title: Selector,
    price: Selector,
    location: Selector,
    seller: Selector,
    teaser_attributes: Selector,
    posted_date: Selector,
}

impl CssExtractor {
    pub fn new(config: &CrawlConfig) -> Result<Self, AppError> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| AppError::InvalidUrl(format!("{}: {e}", config.base_url)))?;

        Ok(Self {
            base,
            detail_path: config.detail_path.clone(),
            date_label: config.date_label.clone(),
            entry: parse_selector(RESULT_ENTRY)?,
            title: parse_selector(TITLE)?,
            price: parse_selector(PRICE)?,
            location: parse_selector(LOCATION)?,
            seller: parse_selector(SELLER)?,
            teaser_attributes: parse_selector(TEASER_ATTRIBUTES)?,
            posted_date: parse_selector(POSTED_DATE)?,
        })
    }

    fn extract_entry(&self, entry: ElementRef<'_>) -> Listing {
        let mut listing = Listing::default();

        if let Some(href) = entry.value().attr("href") {
            if !href.is_empty() {
                match self.base.join(href) {
                    Ok(url) => listing.url = url.to_string(),
                    Err(e) => tracing::debug!(%href, error = %e, "Unresolvable listing href"),
                }
            }
        }

        // Title is taken verbatim, whitespace included.
        if let Some(el) = entry.select(&self.title).next() {
            listing.title = el.text().collect::<String>();
        }
        if let Some(el) = entry.select(&self.price).next() {
            listing.price = trimmed_text(el);
        }
        if let Some(el) = entry.select(&self.location).next() {
            listing.location = trimmed_text(el);
        }
        if let Some(el) = entry.select(&self.seller).next() {
            listing.seller = trimmed_text(el);
        }

        let attributes: Vec<String> = entry
            .select(&self.teaser_attributes)
            .map(trimmed_text)
            .filter(|text| !text.is_empty())
            .collect();
        if !attributes.is_empty() {
            listing.append_description(&attributes.join(ATTRIBUTE_SEPARATOR));
        }

        // Provisional date from the search page; the detail pass
        // overwrites it when the detail page carries one.
        if let Some(el) = entry.select(&self.posted_date).next() {
            listing.posted_date = trimmed_text(el);
        }

        listing
    }
}

impl ListingExtractor for CssExtractor {
    fn extract_search(&self, html: &str) -> Result<Vec<Listing>, AppError> {
        let document = Html::parse_document(html);
        Ok(document
            .select(&self.entry)
            .map(|entry| self.extract_entry(entry))
            .collect())
    }

    fn extract_detail(&self, url: &str, html: &str) -> Result<Option<String>, AppError> {
        if !url.contains(&self.detail_path) {
            return Ok(None);
        }

        let document = Html::parse_document(html);
        Ok(document.select(&self.posted_date).next().map(|el| {
            let text = el.text().collect::<String>();
            strip_label(&text, &self.date_label)
        }))
    }
}

fn parse_selector(selector: &str) -> Result<Selector, AppError> {
    Selector::parse(selector).map_err(|e| AppError::SelectorError(format!("{selector}: {e}")))
}

fn trimmed_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Trim, strip the label as an exact phrase prefix, trim again.
///
/// The label is stripped only when the text literally starts with it, so
/// a date that happens to share characters with the label is left
/// intact. Applying this to already-clean text is a no-op.
fn strip_label(text: &str, label: &str) -> String {
    let text = text.trim();
    let text = text.strip_prefix(label).unwrap_or(text);
    text.trim().to_string()
}
