// Application layer - Use cases and the traits they depend on
pub mod air_quality_service;
pub mod air_quality_source;
pub mod dashboard_service;
pub mod mock_service;
pub mod polling_service;
pub mod reading_store;
