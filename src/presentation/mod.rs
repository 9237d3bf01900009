// Presentation layer - HTTP surface and terminal output
pub mod app_state;
pub mod handlers;
pub mod router;
pub mod terminal;
