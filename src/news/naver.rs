//! Naver news search provider.

use super::types::Article;
use super::NewsSource;
use crate::error::LookupError;
use crate::http;
use serde::Deserialize;
use tracing::{error, info};

pub const DEFAULT_BASE_URL: &str = "https://openapi.naver.com";
const SEARCH_PATH: &str = "/v1/search/news.json";

/// Results requested per search.
pub const PAGE_SIZE: u32 = 10;
const START: u32 = 1;
const SORT: &str = "sim";

/// Substituted when an item carries no summary.
pub const NO_SUMMARY: &str = "기사 본문의 요약문이 없습니다.";

const BOLD_TAGS: [&str; 2] = ["<b>", "</b>"];

#[derive(Deserialize, Debug)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Deserialize, Debug)]
struct SearchItem {
    title: String,
    link: String,
    #[serde(default)]
    description: Option<String>,
}

pub struct NaverNews {
    agent: ureq::Agent,
    base_url: String,
    client_id: String,
    client_secret: String,
}

impl NaverNews {
    pub fn new(agent: ureq::Agent, client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            agent,
            base_url: DEFAULT_BASE_URL.to_string(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Run the search, surfacing the failure reason.
    pub fn try_fetch(&self, region: &str, category: &str) -> Result<Vec<Article>, LookupError> {
        let query = search_query(region, category);
        let url = http::join(&self.base_url, SEARCH_PATH);

        let result = self
            .agent
            .get(&url)
            .set("X-Naver-Client-Id", &self.client_id)
            .set("X-Naver-Client-Secret", &self.client_secret)
            .query("query", &query)
            .query("display", &PAGE_SIZE.to_string())
            .query("start", &START.to_string())
            .query("sort", SORT)
            .call();

        let response: SearchResponse = http::decode(result)?;
        Ok(response.items.into_iter().map(to_article).collect())
    }
}

impl NewsSource for NaverNews {
    fn fetch_news(&self, region: &str, category: &str) -> Vec<Article> {
        match self.try_fetch(region, category) {
            Ok(articles) => {
                info!(region, category, count = articles.len(), "fetched news");
                articles
            }
            Err(e) => {
                error!(region, category, reason = e.reason(), error = %e, "news search failed");
                Vec::new()
            }
        }
    }
}

fn search_query(region: &str, category: &str) -> String {
    format!("{} {}", region, category)
}

fn to_article(item: SearchItem) -> Article {
    let description = item
        .description
        .as_deref()
        .map(strip_bold)
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| NO_SUMMARY.to_string());

    Article {
        title: strip_bold(&item.title),
        link: item.link,
        description,
    }
}

/// Remove the provider's match-highlight markup.
pub fn strip_bold(text: &str) -> String {
    BOLD_TAGS.iter().fold(text.to_string(), |acc, tag| acc.replace(tag, ""))
}
