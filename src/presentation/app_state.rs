// Application state for HTTP handlers
use crate::application::air_quality_service::AirQualityService;
use crate::application::mock_service::MockService;

#[derive(Clone)]
pub struct AppState {
    pub air_quality_service: AirQualityService,
    pub mock_service: MockService,
}
