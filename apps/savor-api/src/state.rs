use std::sync::Arc;

use savor_service::RecommendService;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<RecommendService>,
}
impl AppState {
	pub fn new(config: savor_config::Config) -> Self {
		Self { service: Arc::new(RecommendService::new(config)) }
	}

	pub fn with_service(service: RecommendService) -> Self {
		Self { service: Arc::new(service) }
	}
}
