// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod fault_models;
pub mod http_response;
pub mod json_mapper;
pub mod model_store;
