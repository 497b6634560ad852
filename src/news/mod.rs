//! News articles and the news search provider.

pub mod naver;
pub mod types;

pub use naver::{NaverNews, NO_SUMMARY, PAGE_SIZE};
pub use types::{Article, EnrichedArticle, LocationRecord};

/// Source of region/category filtered articles.
///
/// Implementations absorb upstream failures and return an empty list.
pub trait NewsSource: Send + Sync {
    fn fetch_news(&self, region: &str, category: &str) -> Vec<Article>;
}
