use std::sync::Arc;

use crate::config::Config;
use crate::services::CustomerService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub customer_service: Arc<dyn CustomerService>,
}

impl AppState {
    pub fn new(config: Config, customer_service: Arc<dyn CustomerService>) -> Self {
        Self {
            config,
            customer_service,
        }
    }
}
