use std::sync::Arc;

use crate::{domain::ports::inbound::ProjectService, routes::ErrorDetails};

#[derive(Clone)]
pub struct AppState {
    pub project_service: Arc<dyn ProjectService>,
    pub error_details: ErrorDetails,
}

impl AppState {
    pub fn new(project_service: Arc<dyn ProjectService>, error_details: ErrorDetails) -> Self {
        Self {
            project_service,
            error_details,
        }
    }
}
