//! Geocoding and transit routing.
//!
//! Place names are resolved through Kakao's keyword search; routes between
//! two resolved places come from Kakao Mobility's transit directions.

pub mod providers;
pub mod resolver;
pub mod types;

pub use providers::{KakaoLocal, KakaoTransit};
pub use resolver::{geocode_query, search_route, Geocoder, TransitRouter};
pub use types::GeocodedPlace;
