//! Request-scoped article types.

use serde::{Deserialize, Serialize};

/// One article as returned by the news search provider, markup stripped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub link: String,
    pub description: String,
}

/// A resolved place mention attached to an article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

/// An article plus the places it mentions, in extraction order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedArticle {
    #[serde(flatten)]
    pub article: Article,
    pub locations: Vec<LocationRecord>,
}

impl EnrichedArticle {
    pub fn new(article: Article, locations: Vec<LocationRecord>) -> Self {
        Self { article, locations }
    }
}
