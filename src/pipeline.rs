//! News enrichment: fetch → extract → geocode, per article.
//!
//! Articles are handled one at a time in input order. The geocode lookups
//! for a single article fan out as blocking tasks, at most
//! `geocode_concurrency` in flight; a finished lookup frees its slot for the
//! next name right away, and results are put back in attempt order.
//! Every upstream failure has already been absorbed by the component that
//! made the call, so enrichment always completes.

use crate::extract::PlaceExtractor;
use crate::location::{GeocodedPlace, Geocoder};
use crate::news::{Article, EnrichedArticle, LocationRecord, NewsSource};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

pub const DEFAULT_GEOCODE_CONCURRENCY: usize = 4;

pub struct EnrichmentPipeline {
    news: Arc<dyn NewsSource>,
    extractor: Arc<dyn PlaceExtractor>,
    geocoder: Arc<dyn Geocoder>,
    geocode_concurrency: usize,
}

impl EnrichmentPipeline {
    pub fn new(
        news: Arc<dyn NewsSource>,
        extractor: Arc<dyn PlaceExtractor>,
        geocoder: Arc<dyn Geocoder>,
    ) -> Self {
        Self {
            news,
            extractor,
            geocoder,
            geocode_concurrency: DEFAULT_GEOCODE_CONCURRENCY,
        }
    }

    /// Cap on simultaneous geocode lookups per article. Zero is treated as one.
    pub fn with_geocode_concurrency(mut self, limit: usize) -> Self {
        self.geocode_concurrency = limit.max(1);
        self
    }

    pub fn geocoder(&self) -> &dyn Geocoder {
        self.geocoder.as_ref()
    }

    /// Fetch articles for `region` + `category` and enrich them.
    pub async fn search(&self, region: &str, category: &str) -> Vec<EnrichedArticle> {
        let start = Instant::now();
        let news = Arc::clone(&self.news);
        let (r, c) = (region.to_string(), category.to_string());
        let articles = blocking("news fetch", move || news.fetch_news(&r, &c))
            .await
            .unwrap_or_default();
        let enriched = self.enrich(articles, region, category).await;

        info!(
            region,
            category,
            articles = enriched.len(),
            locations = enriched.iter().map(|a| a.locations.len()).sum::<usize>(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "search complete"
        );
        enriched
    }

    /// Attach resolved locations to each article, preserving input order.
    pub async fn enrich(&self, articles: Vec<Article>, target_region: &str, category: &str) -> Vec<EnrichedArticle> {
        let mut enriched = Vec::with_capacity(articles.len());
        for article in articles {
            let locations = self.locate(&article, target_region, category).await;
            enriched.push(EnrichedArticle::new(article, locations));
        }
        enriched
    }

    async fn locate(&self, article: &Article, target_region: &str, category: &str) -> Vec<LocationRecord> {
        let extractor = Arc::clone(&self.extractor);
        let (text, r, c) = (article.description.clone(), target_region.to_string(), category.to_string());
        let extracted = blocking("extraction", move || extractor.extract_locations(&text, &r, &c))
            .await
            .flatten();

        let Some(names) = extracted else {
            debug!(link = %article.link, "no places extracted");
            return Vec::new();
        };

        self.geocode_all(&names, target_region)
            .await
            .into_iter()
            .zip(&names)
            .filter_map(|(place, name)| place.map(|p| p.to_record(name)))
            .collect()
    }

    /// One lookup per name; the output is index-aligned with `names`.
    async fn geocode_all(&self, names: &[String], target_region: &str) -> Vec<Option<GeocodedPlace>> {
        let mut resolved: Vec<(usize, Option<GeocodedPlace>)> = stream::iter(names.iter().cloned().enumerate())
            .map(|(i, name)| {
                let geocoder = Arc::clone(&self.geocoder);
                let region = target_region.to_string();
                async move {
                    let place = blocking("geocode", move || geocoder.resolve_coordinates(&name, Some(&region)))
                        .await
                        .flatten();
                    (i, place)
                }
            })
            .buffer_unordered(self.geocode_concurrency)
            .collect()
            .await;

        resolved.sort_unstable_by_key(|(i, _)| *i);
        resolved.into_iter().map(|(_, place)| place).collect()
    }
}

/// Run a blocking client call on the blocking pool. A panicked task counts
/// as a failed call.
async fn blocking<T, F>(stage: &'static str, f: F) -> Option<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(value) => Some(value),
        Err(e) => {
            error!(stage, error = %e, "blocking task failed");
            None
        }
    }
}
