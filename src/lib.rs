//! geonews — local news search enriched with geocoded place mentions.
//!
//! A region + category query goes to the news search provider; each
//! article's summary is handed to a chat model to pick out the place it is
//! about; each place name is geocoded by keyword search. Upstream failures
//! degrade to fewer results, never to an error.

pub mod config;
pub mod error;
pub mod extract;
pub mod http;
pub mod location;
pub mod news;
pub mod pipeline;
pub mod server;

pub use error::{LookupError, RouteError};
pub use pipeline::EnrichmentPipeline;
