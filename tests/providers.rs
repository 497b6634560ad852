//! Provider clients against mock HTTP upstreams.

use geonews::extract::{build_prompt, OpenAiExtractor, PlaceExtractor};
use geonews::http;
use geonews::location::{GeocodedPlace, Geocoder, KakaoLocal, KakaoTransit, TransitRouter};
use geonews::news::{NaverNews, NewsSource, NO_SUMMARY};
use geonews::LookupError;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Nothing listens here; connections are refused.
const DEAD_UPSTREAM: &str = "http://127.0.0.1:1";

fn agent() -> ureq::Agent {
    http::agent(Duration::from_secs(5))
}

/// Run a blocking client call off the async test runtime.
async fn blocking<T, F>(f: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.unwrap()
}

// ─── News search ────────────────────────────────────────────────

#[tokio::test]
async fn test_news_strips_markup_and_fills_placeholder() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search/news.json"))
        .and(query_param("query", "성동구 맛집"))
        .and(query_param("display", "10"))
        .and(query_param("start", "1"))
        .and(query_param("sort", "sim"))
        .and(header("X-Naver-Client-Id", "id"))
        .and(header("X-Naver-Client-Secret", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {
                    "title": "<b>성동구</b> <b>맛집</b> 지도",
                    "link": "https://n.news.naver.com/1",
                    "description": "<b>응봉산</b> 아래 노포"
                },
                { "title": "요약 없는 기사", "link": "https://n.news.naver.com/2" },
                { "title": "빈 요약", "link": "https://n.news.naver.com/3", "description": "" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let news = NaverNews::new(agent(), "id", "secret").with_base_url(server.uri());
    let articles = blocking(move || news.fetch_news("성동구", "맛집")).await;

    assert_eq!(articles.len(), 3);
    assert_eq!(articles[0].title, "성동구 맛집 지도");
    assert_eq!(articles[0].description, "응봉산 아래 노포");
    assert_eq!(articles[0].link, "https://n.news.naver.com/1");
    assert_eq!(articles[1].description, NO_SUMMARY);
    assert_eq!(articles[2].description, NO_SUMMARY);
    assert!(articles.iter().all(|a| !a.title.contains("<b>") && !a.description.contains("</b>")));
}

#[tokio::test]
async fn test_news_error_status_degrades_to_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Authentication failed"))
        .mount(&server)
        .await;

    let news = NaverNews::new(agent(), "id", "wrong").with_base_url(server.uri());
    let (degraded, reason) = blocking(move || {
        let reason = news.try_fetch("성동구", "맛집").unwrap_err();
        (news.fetch_news("성동구", "맛집"), reason)
    })
    .await;

    assert!(degraded.is_empty());
    assert_eq!(
        reason,
        LookupError::Status { status: 401, body: "Authentication failed".into() }
    );
}

#[tokio::test]
async fn test_news_unreachable_degrades_to_empty() {
    let news = NaverNews::new(agent(), "id", "secret").with_base_url(DEAD_UPSTREAM);
    let articles = blocking(move || news.fetch_news("성동구", "맛집")).await;
    assert!(articles.is_empty());
}

// ─── Place extraction ───────────────────────────────────────────

#[tokio::test]
async fn test_extractor_parses_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-3.5-turbo",
            "messages": [
                {
                    "role": "system",
                    "content": "You are an AI that extracts only relevant location names from news articles."
                },
                { "role": "user", "content": build_prompt("응봉산 개나리", "성동구", "맛집") }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": " 응봉산 , 서울숲 " } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let extractor = OpenAiExtractor::new(agent(), "sk-test").with_base_url(server.uri());
    let names = blocking(move || extractor.extract_locations("응봉산 개나리", "성동구", "맛집")).await;
    assert_eq!(names, Some(vec!["응봉산".to_string(), "서울숲".to_string()]));
}

#[tokio::test]
async fn test_extractor_blank_reply_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "content": " , " } }]
        })))
        .mount(&server)
        .await;

    let extractor = OpenAiExtractor::new(agent(), "sk-test").with_base_url(server.uri());
    let names = blocking(move || extractor.extract_locations("본문", "성동구", "맛집")).await;
    assert_eq!(names, None);
}

#[tokio::test]
async fn test_extractor_failure_degrades_to_none() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({ "error": { "message": "rate limited" } })))
        .mount(&server)
        .await;

    let extractor = OpenAiExtractor::new(agent(), "sk-test").with_base_url(server.uri());
    let (reply, names) = blocking(move || {
        (
            extractor.try_complete("본문", "성동구", "맛집"),
            extractor.extract_locations("본문", "성동구", "맛집"),
        )
    })
    .await;
    let reason = reply.unwrap_err();
    assert!(matches!(reason, LookupError::Status { status: 429, .. }));
    assert!(reason.is_upstream_failure());
    assert_eq!(names, None);
}

#[tokio::test]
async fn test_extractor_malformed_body_degrades_to_none() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let extractor = OpenAiExtractor::new(agent(), "sk-test").with_base_url(server.uri());
    let (reply, names) = blocking(move || {
        (
            extractor.try_complete("본문", "성동구", "맛집"),
            extractor.extract_locations("본문", "성동구", "맛집"),
        )
    })
    .await;
    let reason = reply.unwrap_err();
    assert_eq!(reason.reason(), "invalid_response");
    assert!(!reason.is_upstream_failure());
    assert_eq!(names, None);
}

// ─── Place search ───────────────────────────────────────────────

fn keyword_body(docs: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "documents": docs, "meta": {} }))
}

#[tokio::test]
async fn test_geocoder_prefixes_region_and_takes_top_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/local/search/keyword.json"))
        .and(query_param("query", "성동구 응봉산"))
        .and(header("Authorization", "KakaoAK kakao"))
        .respond_with(keyword_body(json!([
            { "place_name": "응봉산", "x": "127.0335", "y": "37.5515", "address_name": "서울 성동구 응봉동" },
            { "place_name": "응봉산 공원", "x": "127.1", "y": "37.6", "address_name": "" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let geocoder = KakaoLocal::new(agent(), "kakao").with_base_url(server.uri());
    let place = blocking(move || geocoder.resolve_coordinates("응봉산", Some("성동구"))).await;

    assert_eq!(
        place,
        Some(GeocodedPlace {
            name: "응봉산".into(),
            lat: 37.5515,
            lng: 127.0335,
            address: Some("서울 성동구 응봉동".into()),
        })
    );
}

#[tokio::test]
async fn test_geocoder_region_not_duplicated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("query", "성동구청"))
        .respond_with(keyword_body(json!([
            { "place_name": "성동구청", "x": "127.0369", "y": "37.5634" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let geocoder = KakaoLocal::new(agent(), "kakao").with_base_url(server.uri());
    let place = blocking(move || geocoder.resolve_coordinates("성동구청", Some("성동구"))).await;
    assert_eq!(place.map(|p| p.address), Some(None));
}

#[tokio::test]
async fn test_geocoder_no_documents() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(keyword_body(json!([])))
        .mount(&server)
        .await;

    let geocoder = KakaoLocal::new(agent(), "kakao").with_base_url(server.uri());
    let (reason, place) = blocking(move || {
        (
            geocoder.try_resolve("없는곳", Some("성동구")),
            geocoder.resolve_coordinates("없는곳", Some("성동구")),
        )
    })
    .await;

    assert_eq!(reason, Err(LookupError::NoMatch { query: "성동구 없는곳".into() }));
    assert_eq!(place, None);
}

#[tokio::test]
async fn test_geocoder_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "errorType": "InvalidArgument" })))
        .mount(&server)
        .await;

    let geocoder = KakaoLocal::new(agent(), "kakao").with_base_url(server.uri());
    let (reason, place) = blocking(move || {
        (
            geocoder.try_resolve("응봉산", Some("성동구")),
            geocoder.resolve_coordinates("응봉산", Some("성동구")),
        )
    })
    .await;

    assert!(matches!(reason, Err(LookupError::Status { status: 400, .. })));
    assert_eq!(place, None);
}

#[tokio::test]
async fn test_geocoder_unreachable() {
    let geocoder = KakaoLocal::new(agent(), "kakao").with_base_url(DEAD_UPSTREAM);
    let reason = blocking(move || geocoder.try_resolve("응봉산", None)).await;
    assert_eq!(reason.unwrap_err().reason(), "upstream_transport");
}

// ─── Transit directions ─────────────────────────────────────────

fn station(name: &str, lat: f64, lng: f64) -> GeocodedPlace {
    GeocodedPlace { name: name.into(), lat, lng, address: None }
}

#[tokio::test]
async fn test_transit_posts_points_and_relays_body() {
    let server = MockServer::start().await;
    let provider_route = json!({ "trans_id": "abc", "routes": [{ "result_code": 0 }] });
    Mock::given(method("POST"))
        .and(path("/v1/directions/transit"))
        .and(header("Authorization", "KakaoAK kakao"))
        .and(body_json(json!({
            "origin": { "x": 126.9707, "y": 37.5547 },
            "destination": { "x": 127.0276, "y": 37.4979 },
            "priority": "RECOMMEND"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(provider_route.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let transit = KakaoTransit::new(agent(), "kakao").with_base_url(server.uri());
    let route = blocking(move || {
        transit.route(&station("서울역", 37.5547, 126.9707), &station("강남역", 37.4979, 127.0276))
    })
    .await;

    assert_eq!(route.unwrap(), provider_route);
}

#[tokio::test]
async fn test_transit_failure_surfaces_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let transit = KakaoTransit::new(agent(), "kakao").with_base_url(server.uri());
    let route = blocking(move || {
        transit.route(&station("a", 1.0, 1.0), &station("b", 2.0, 2.0))
    })
    .await;

    assert!(matches!(route, Err(LookupError::Status { status: 500, .. })));
}
