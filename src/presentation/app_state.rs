// Application state for HTTP handlers
use crate::application::diagnosis_service::DiagnosisService;

#[derive(Clone)]
pub struct AppState {
    pub diagnosis_service: DiagnosisService,
}
