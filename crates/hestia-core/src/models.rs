/// Separator used when joining teaser attributes into the description.
pub const ATTRIBUTE_SEPARATOR: &str = " | ";

/// One real-estate ad record.
///
/// Every field is absent-tolerant: an empty string means the source
/// document did not contain the element. Records are created from a
/// search-results page and later enriched from the ad's detail page.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct Listing {
    pub title: String,
    pub price: String,
    pub location: String,
    pub description: String,
    pub seller: String,
    pub url: String,
    pub posted_date: String,
}

impl Listing {
    /// A listing is worth keeping only if it can be identified later:
    /// by URL (the join key for detail-page enrichment) or, failing
    /// that, by title.
    pub fn has_identity(&self) -> bool {
        !self.url.is_empty() || !self.title.is_empty()
    }

    /// Append a fragment to the description, joining with
    /// [`ATTRIBUTE_SEPARATOR`] when the description already has content.
    pub fn append_description(&mut self, part: &str) {
        if self.description.is_empty() {
            self.description = part.to_string();
        } else {
            self.description.push_str(ATTRIBUTE_SEPARATOR);
            self.description.push_str(part);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_requires_url_or_title() {
        let mut listing = Listing::default();
        assert!(!listing.has_identity());

        listing.title = "Nice flat".into();
        assert!(listing.has_identity());

        let listing = Listing {
            url: "https://www.willhaben.at/iad/123".into(),
            ..Listing::default()
        };
        assert!(listing.has_identity());
    }

    #[test]
    fn test_price_alone_is_not_identity() {
        let listing = Listing {
            price: "€ 900".into(),
            ..Listing::default()
        };
        assert!(!listing.has_identity());
    }

    #[test]
    fn test_append_description_to_empty() {
        let mut listing = Listing::default();
        listing.append_description("2 Zimmer | 65 m²");
        assert_eq!(listing.description, "2 Zimmer | 65 m²");
    }

    #[test]
    fn test_append_description_joins_existing() {
        let mut listing = Listing {
            description: "Altbau".into(),
            ..Listing::default()
        };
        listing.append_description(&["2 Zimmer", "65 m²"].join(ATTRIBUTE_SEPARATOR));
        assert_eq!(listing.description, "Altbau | 2 Zimmer | 65 m²");
    }
}
