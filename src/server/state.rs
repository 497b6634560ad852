use crate::location::TransitRouter;
use crate::pipeline::EnrichmentPipeline;
use std::sync::Arc;

pub struct AppState {
    pub pipeline: Arc<EnrichmentPipeline>,
    pub transit: Arc<dyn TransitRouter>,
}
