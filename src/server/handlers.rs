use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

use crate::error::RouteError;
use crate::location::search_route;
use crate::news::EnrichedArticle;

use super::state::AppState;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

pub(super) struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

/// Treat absent, empty and whitespace-only parameters alike.
fn required(param: &Option<String>) -> Option<String> {
    param
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

// ─── GET /search_news ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SearchQuery {
    pub region: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SearchResponse {
    pub region: String,
    pub category: String,
    pub news: Vec<EnrichedArticle>,
}

pub async fn search_news(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    let (Some(region), Some(category)) = (required(&params.region), required(&params.category)) else {
        return Err(api_error(StatusCode::BAD_REQUEST, "Region and category are required"));
    };

    let news = state.pipeline.search(&region, &category).await;

    info!(%region, %category, count = news.len(), "GET /search_news");
    Ok(Json(SearchResponse { region, category, news }))
}

// ─── GET /route_search ───────────────────────────────────────────

#[derive(Deserialize)]
pub struct RouteQuery {
    pub origin: Option<String>,
    pub destination: Option<String>,
}

pub async fn route_search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RouteQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let (Some(origin), Some(destination)) = (required(&params.origin), required(&params.destination)) else {
        return Err(api_error(StatusCode::BAD_REQUEST, "origin and destination are required"));
    };

    let task_state = Arc::clone(&state);
    let outcome = tokio::task::spawn_blocking(move || {
        search_route(
            task_state.pipeline.geocoder(),
            task_state.transit.as_ref(),
            &origin,
            &destination,
        )
    })
    .await
    .map_err(|e| {
        error!(error = %e, "route task failed");
        api_error(StatusCode::INTERNAL_SERVER_ERROR, "경로 탐색 실패")
    })?;

    match outcome {
        Ok(route) => Ok(Json(route)),
        Err(RouteError::Unresolved { which, name }) => {
            info!(which, %name, "route endpoint could not be geocoded");
            Err(api_error(StatusCode::BAD_REQUEST, "좌표를 찾을 수 없습니다."))
        }
        Err(RouteError::Upstream(_)) => Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, "경로 탐색 실패")),
    }
}
