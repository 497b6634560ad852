//! Place resolution with region disambiguation, and the route-search flow.
//!
//! Search flow:  extracted name → region-prefixed query → keyword search → top document
//! Route flow:   origin + destination → two bare lookups → transit directions

use super::providers::{KakaoLocal, KakaoTransit};
use super::types::GeocodedPlace;
use crate::error::{LookupError, RouteError};
use tracing::{error, info, warn};

/// Resolves a place name to its top-ranked match.
///
/// Implementations absorb failures and return `None`.
pub trait Geocoder: Send + Sync {
    fn resolve_coordinates(&self, place_name: &str, target_region: Option<&str>) -> Option<GeocodedPlace>;
}

/// Computes a transit route between two resolved places.
pub trait TransitRouter: Send + Sync {
    fn route(&self, origin: &GeocodedPlace, destination: &GeocodedPlace) -> Result<serde_json::Value, LookupError>;
}

/// Build the search query for a place name.
///
/// "응봉산" with region "성동구" → "성동구 응봉산"; a name that already
/// contains the region is searched as-is.
pub fn geocode_query(place_name: &str, target_region: Option<&str>) -> String {
    let query = match target_region {
        Some(region) if !region.is_empty() && !place_name.contains(region) => {
            format!("{} {}", region, place_name)
        }
        _ => place_name.to_string(),
    };
    query.trim().to_string()
}

impl KakaoLocal {
    /// Resolve with the region heuristic applied, surfacing the failure reason.
    pub fn try_resolve(&self, place_name: &str, target_region: Option<&str>) -> Result<GeocodedPlace, LookupError> {
        self.search_keyword(&geocode_query(place_name, target_region))
    }
}

impl Geocoder for KakaoLocal {
    fn resolve_coordinates(&self, place_name: &str, target_region: Option<&str>) -> Option<GeocodedPlace> {
        match self.try_resolve(place_name, target_region) {
            Ok(place) => Some(place),
            Err(LookupError::NoMatch { query }) => {
                warn!(query = %query, reason = "no_match", "no place search results");
                None
            }
            Err(e) => {
                let query = geocode_query(place_name, target_region);
                match &e {
                    LookupError::Status { status, .. } => {
                        error!(query = %query, status, reason = e.reason(), "place search failed")
                    }
                    _ => error!(query = %query, reason = e.reason(), error = %e, "place search failed"),
                }
                None
            }
        }
    }
}

impl TransitRouter for KakaoTransit {
    fn route(&self, origin: &GeocodedPlace, destination: &GeocodedPlace) -> Result<serde_json::Value, LookupError> {
        self.directions(origin, destination)
    }
}

/// Geocode both endpoints without region context, then ask for a transit route.
pub fn search_route(
    geocoder: &dyn Geocoder,
    router: &dyn TransitRouter,
    origin: &str,
    destination: &str,
) -> Result<serde_json::Value, RouteError> {
    let from = geocoder
        .resolve_coordinates(origin, None)
        .ok_or_else(|| RouteError::Unresolved { which: "origin", name: origin.to_string() })?;
    let to = geocoder
        .resolve_coordinates(destination, None)
        .ok_or_else(|| RouteError::Unresolved { which: "destination", name: destination.to_string() })?;

    info!(origin = %from.name, destination = %to.name, "requesting transit route");
    router.route(&from, &to).map_err(|e| {
        error!(reason = e.reason(), error = %e, "transit routing failed");
        RouteError::Upstream(e)
    })
}
