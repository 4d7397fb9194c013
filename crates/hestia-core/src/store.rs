use std::collections::HashMap;

use crate::models::Listing;

/// Insertion-ordered collection of listings, amendable by URL.
///
/// Listings are kept in the order they were discovered; that order is the
/// only meaningful one and drives both the detail crawl and the final
/// report. A side index maps each non-empty URL to the *first* entry that
/// carried it, so amendment is O(1) while duplicate URLs keep first-match
/// semantics. There is no removal.
#[derive(Debug, Default)]
pub struct ListingStore {
    listings: Vec<Listing>,
    by_url: HashMap<String, usize>,
}

impl ListingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a listing, preserving insertion order.
    ///
    /// Listings without an identity (no URL and no title) are rejected;
    /// returns whether the listing was retained. Duplicates are not
    /// deduplicated; the URL index keeps pointing at the first entry.
    pub fn append(&mut self, listing: Listing) -> bool {
        if !listing.has_identity() {
            return false;
        }
        let index = self.listings.len();
        if !listing.url.is_empty() {
            self.by_url.entry(listing.url.clone()).or_insert(index);
        }
        self.listings.push(listing);
        true
    }

    /// First listing with the given URL. The empty string never matches.
    pub fn find_by_url(&self, url: &str) -> Option<&Listing> {
        if url.is_empty() {
            return None;
        }
        self.by_url.get(url).map(|&i| &self.listings[i])
    }

    /// Mutable variant of [`find_by_url`](Self::find_by_url), used for
    /// detail-page amendment.
    pub fn find_by_url_mut(&mut self, url: &str) -> Option<&mut Listing> {
        if url.is_empty() {
            return None;
        }
        self.by_url.get(url).map(|&i| &mut self.listings[i])
    }

    /// Listings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Listing> {
        self.listings.iter()
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(url: &str, title: &str) -> Listing {
        Listing {
            url: url.into(),
            title: title.into(),
            ..Listing::default()
        }
    }

    #[test]
    fn test_append_preserves_insertion_order() {
        let mut store = ListingStore::new();
        assert!(store.append(listing("https://a.example/1", "first")));
        assert!(store.append(listing("https://a.example/2", "second")));
        assert!(store.append(listing("", "title only")));

        let titles: Vec<_> = store.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second", "title only"]);
    }

    #[test]
    fn test_append_rejects_identity_less_listing() {
        let mut store = ListingStore::new();
        let rejected = Listing {
            price: "€ 900".into(),
            ..Listing::default()
        };
        assert!(!store.append(rejected));
        assert!(store.is_empty());
    }

    #[test]
    fn test_find_by_url_ignores_empty_url() {
        let mut store = ListingStore::new();
        store.append(listing("", "no url"));
        assert!(store.find_by_url("").is_none());
    }

    #[test]
    fn test_duplicate_urls_amend_first_entry_only() {
        let mut store = ListingStore::new();
        store.append(listing("https://a.example/1", "first"));
        store.append(listing("https://a.example/1", "second"));

        store
            .find_by_url_mut("https://a.example/1")
            .unwrap()
            .posted_date = "01.01.2024".into();

        let dates: Vec<_> = store.iter().map(|l| l.posted_date.as_str()).collect();
        assert_eq!(dates, vec!["01.01.2024", ""]);
    }

    #[test]
    fn test_find_by_url_misses_unknown_url() {
        let mut store = ListingStore::new();
        store.append(listing("https://a.example/1", "first"));
        assert!(store.find_by_url("https://a.example/2").is_none());
    }
}
