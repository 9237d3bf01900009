// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod dashboard_client;
pub mod http_response;
pub mod openaq_source;
pub mod openweather_source;
pub mod sqlite_store;
pub mod tempo_source;
