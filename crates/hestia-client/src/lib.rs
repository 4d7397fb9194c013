pub mod extract;
pub mod fetcher;

pub use extract::CssExtractor;
pub use fetcher::ReqwestFetcher;
