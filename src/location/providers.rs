//! Location providers: Kakao keyword search and Kakao Mobility transit directions.

use super::types::GeocodedPlace;
use crate::error::LookupError;
use crate::http;
use serde::{Deserialize, Serialize};

pub const DEFAULT_LOCAL_URL: &str = "https://dapi.kakao.com";
pub const DEFAULT_NAVI_URL: &str = "https://apis-navi.kakaomobility.com";

const KEYWORD_PATH: &str = "/v2/local/search/keyword.json";
const TRANSIT_PATH: &str = "/v1/directions/transit";

fn kakao_auth(key: &str) -> String {
    format!("KakaoAK {}", key)
}

// ─── Keyword search ─────────────────────────────────────────────

#[derive(Deserialize, Debug)]
struct KeywordResponse {
    #[serde(default)]
    documents: Vec<KeywordDocument>,
}

#[derive(Deserialize, Debug, Clone)]
struct KeywordDocument {
    place_name: String,
    /// Longitude, as a decimal string.
    x: String,
    /// Latitude, as a decimal string.
    y: String,
    #[serde(default)]
    address_name: Option<String>,
}

impl KeywordDocument {
    fn into_place(self) -> Result<GeocodedPlace, LookupError> {
        let lng = parse_coord("x", &self.x)?;
        let lat = parse_coord("y", &self.y)?;
        Ok(GeocodedPlace {
            name: self.place_name,
            lat,
            lng,
            address: self.address_name.filter(|a| !a.is_empty()),
        })
    }
}

fn parse_coord(field: &str, raw: &str) -> Result<f64, LookupError> {
    raw.trim()
        .parse()
        .map_err(|_| LookupError::InvalidResponse(format!("{} is not a coordinate: '{}'", field, raw)))
}

/// Kakao Local keyword search client.
#[derive(Clone)]
pub struct KakaoLocal {
    agent: ureq::Agent,
    base_url: String,
    api_key: String,
}

impl KakaoLocal {
    pub fn new(agent: ureq::Agent, api_key: impl Into<String>) -> Self {
        Self {
            agent,
            base_url: DEFAULT_LOCAL_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Search a keyword and keep only the provider's top-ranked document.
    pub fn search_keyword(&self, query: &str) -> Result<GeocodedPlace, LookupError> {
        let result = self
            .agent
            .get(&http::join(&self.base_url, KEYWORD_PATH))
            .set("Authorization", &kakao_auth(&self.api_key))
            .query("query", query)
            .call();

        let response: KeywordResponse = http::decode(result)?;
        response
            .documents
            .into_iter()
            .next()
            .ok_or_else(|| LookupError::NoMatch { query: query.to_string() })?
            .into_place()
    }
}

// ─── Transit directions ─────────────────────────────────────────

#[derive(Serialize, Debug, PartialEq)]
struct Point {
    x: f64,
    y: f64,
}

impl From<&GeocodedPlace> for Point {
    fn from(place: &GeocodedPlace) -> Self {
        Self { x: place.lng, y: place.lat }
    }
}

#[derive(Serialize, Debug)]
struct TransitRequest {
    origin: Point,
    destination: Point,
    priority: &'static str,
}

/// Kakao Mobility transit directions client. Responses are relayed unmodified.
#[derive(Clone)]
pub struct KakaoTransit {
    agent: ureq::Agent,
    base_url: String,
    api_key: String,
}

impl KakaoTransit {
    pub fn new(agent: ureq::Agent, api_key: impl Into<String>) -> Self {
        Self {
            agent,
            base_url: DEFAULT_NAVI_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn directions(
        &self,
        origin: &GeocodedPlace,
        destination: &GeocodedPlace,
    ) -> Result<serde_json::Value, LookupError> {
        let body = TransitRequest {
            origin: origin.into(),
            destination: destination.into(),
            priority: "RECOMMEND",
        };

        let result = self
            .agent
            .post(&http::join(&self.base_url, TRANSIT_PATH))
            .set("Authorization", &kakao_auth(&self.api_key))
            .send_json(&body);

        http::decode(result)
    }
}
