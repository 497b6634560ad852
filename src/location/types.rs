//! Core types for the location subsystem.

use crate::news::LocationRecord;
use serde::{Deserialize, Serialize};

/// The top-ranked match for a place search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedPlace {
    /// Provider's own name for the place.
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub address: Option<String>,
}

impl GeocodedPlace {
    /// Attach this place's coordinates to the name it was looked up by.
    pub fn to_record(&self, extracted_name: &str) -> LocationRecord {
        LocationRecord {
            name: extracted_name.to_string(),
            lat: self.lat,
            lng: self.lng,
        }
    }
}
