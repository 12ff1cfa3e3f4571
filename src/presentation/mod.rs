// Presentation layer - HTTP routes, handlers and report rendering
pub mod app_state;
pub mod handlers;
pub mod report;
pub mod routes;
