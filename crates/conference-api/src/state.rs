use std::sync::Arc;

use conference_core::repositories::ConfigurationRepository;
use conference_core::services::ConferenceService;

pub type SharedConferenceService = Arc<ConferenceService<dyn ConfigurationRepository>>;

#[derive(Clone)]
pub struct AppState {
    pub conference: SharedConferenceService,
}

impl AppState {
    pub fn new(conference: ConferenceService<dyn ConfigurationRepository>) -> Self {
        Self {
            conference: Arc::new(conference),
        }
    }
}
