use std::io;

use crate::error::AppError;
use crate::store::ListingStore;

/// Render the store as the fixed-format text report: one seven-line
/// block per listing in store order, blank fields as empty strings, a
/// blank line after each block.
pub fn write_text<W: io::Write>(store: &ListingStore, out: &mut W) -> io::Result<()> {
    for listing in store.iter() {
        writeln!(out, "Title: {}", listing.title)?;
        writeln!(out, "Price: {}", listing.price)?;
        writeln!(out, "Location: {}", listing.location)?;
        writeln!(out, "Seller: {}", listing.seller)?;
        writeln!(out, "URL: {}", listing.url)?;
        writeln!(out, "Description: {}", listing.description)?;
        writeln!(out, "Date: {}", listing.posted_date)?;
        writeln!(out)?;
    }
    Ok(())
}

/// Render the store as a pretty-printed JSON array of listings.
pub fn to_json(store: &ListingStore) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(store.listings())?)
}
