pub mod config;
pub mod crawl;
pub mod error;
pub mod models;
pub mod report;
pub mod store;
pub mod testutil;
pub mod traits;

pub use config::CrawlConfig;
pub use crawl::CrawlService;
pub use error::AppError;
pub use models::Listing;
pub use store::ListingStore;
pub use traits::{Fetcher, ListingExtractor};
