//! Runtime configuration: credentials, endpoints, and tuning knobs.
//!
//! Every field can come from a flag or an environment variable.

use crate::extract::{self, OpenAiExtractor};
use crate::http;
use crate::location::{providers, KakaoLocal, KakaoTransit};
use crate::news::{naver, NaverNews};
use crate::pipeline::{EnrichmentPipeline, DEFAULT_GEOCODE_CONCURRENCY};
use crate::server::AppState;
use clap::Args;
use std::sync::Arc;
use std::time::Duration;

#[derive(Args, Debug, Clone)]
pub struct Config {
    /// Naver Open API client id.
    #[arg(long, env = "NAVER_CLIENT_ID", hide_env_values = true)]
    pub naver_client_id: String,

    /// Naver Open API client secret.
    #[arg(long, env = "NAVER_CLIENT_SECRET", hide_env_values = true)]
    pub naver_client_secret: String,

    /// Kakao REST API key (place search and transit directions).
    #[arg(long, env = "KAKAO_REST_API_KEY", hide_env_values = true)]
    pub kakao_rest_api_key: String,

    /// OpenAI API key.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: String,

    /// Chat model used for place extraction.
    #[arg(long, env = "OPENAI_MODEL", default_value = extract::DEFAULT_MODEL)]
    pub openai_model: String,

    #[command(flatten)]
    pub endpoints: Endpoints,

    /// Per-request timeout for outbound calls, in seconds.
    #[arg(long, default_value_t = 10)]
    pub http_timeout: u64,

    /// Maximum simultaneous geocode lookups per article.
    #[arg(long, default_value_t = DEFAULT_GEOCODE_CONCURRENCY)]
    pub geocode_concurrency: usize,
}

/// Provider base URLs. Overridable for staging and tests.
#[derive(Args, Debug, Clone)]
pub struct Endpoints {
    #[arg(long, env = "GEONEWS_NEWS_URL", default_value = naver::DEFAULT_BASE_URL)]
    pub news_url: String,

    #[arg(long, env = "GEONEWS_OPENAI_URL", default_value = extract::DEFAULT_BASE_URL)]
    pub openai_url: String,

    #[arg(long, env = "GEONEWS_KAKAO_LOCAL_URL", default_value = providers::DEFAULT_LOCAL_URL)]
    pub kakao_local_url: String,

    #[arg(long, env = "GEONEWS_KAKAO_NAVI_URL", default_value = providers::DEFAULT_NAVI_URL)]
    pub kakao_navi_url: String,
}

impl Config {
    /// Wire the provider clients into shared server state.
    pub fn build_state(&self) -> AppState {
        let agent = http::agent(Duration::from_secs(self.http_timeout));

        let news = NaverNews::new(agent.clone(), &self.naver_client_id, &self.naver_client_secret)
            .with_base_url(&self.endpoints.news_url);
        let extractor = OpenAiExtractor::new(agent.clone(), &self.openai_api_key)
            .with_base_url(&self.endpoints.openai_url)
            .with_model(&self.openai_model);
        let geocoder = KakaoLocal::new(agent.clone(), &self.kakao_rest_api_key)
            .with_base_url(&self.endpoints.kakao_local_url);
        let transit = KakaoTransit::new(agent, &self.kakao_rest_api_key)
            .with_base_url(&self.endpoints.kakao_navi_url);

        let pipeline = EnrichmentPipeline::new(Arc::new(news), Arc::new(extractor), Arc::new(geocoder))
            .with_geocode_concurrency(self.geocode_concurrency);

        AppState {
            pipeline: Arc::new(pipeline),
            transit: Arc::new(transit),
        }
    }
}
