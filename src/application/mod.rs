// Application layer - Fault classification contract and diagnosis use case
pub mod classifier_adapter;
pub mod diagnosis_service;
pub mod fault_model;
