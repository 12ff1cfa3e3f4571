// HTTP request handlers
use crate::domain::error::DiagnosisError;
use crate::domain::telemetry::TelemetrySample;
use crate::infrastructure::http_response::{error_response, json_response, text_response};
use crate::infrastructure::json_mapper::diagnosis_to_json;
use crate::presentation::app_state::AppState;
use crate::presentation::report::render_report;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, StatusCode},
    response::Response,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

/// Telemetry body. Fields are optional on the wire so a missing reading is
/// reported as invalid input naming the field.
#[derive(Debug, Deserialize)]
pub struct TelemetryRequest {
    pub wind_speed_mps: Option<f64>,
    pub rotor_speed_rpm: Option<f64>,
    pub temperature_c: Option<f64>,
    pub power_output_w: Option<f64>,
    pub vibration_mm_s: Option<f64>,
}

impl TelemetryRequest {
    pub fn into_sample(self) -> Result<TelemetrySample, DiagnosisError> {
        Ok(TelemetrySample::new(
            required("wind_speed_mps", self.wind_speed_mps)?,
            required("rotor_speed_rpm", self.rotor_speed_rpm)?,
            required("temperature_c", self.temperature_c)?,
            required("power_output_w", self.power_output_w)?,
            required("vibration_mm_s", self.vibration_mm_s)?,
        ))
    }
}

fn required(field: &str, value: Option<f64>) -> Result<f64, DiagnosisError> {
    value.ok_or_else(|| DiagnosisError::invalid_input(field, "is missing"))
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Evaluate one telemetry sample
pub async fn diagnose(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TelemetryRequest>, JsonRejection>,
) -> Response {
    let wants_text = wants_text_report(&headers);

    let result = payload
        .map_err(|rejection| DiagnosisError::invalid_input("body", rejection.body_text()))
        .and_then(|Json(request)| request.into_sample())
        .and_then(|sample| state.diagnosis_service.diagnose(&sample));

    match result {
        Ok(diagnosis) if wants_text => text_response(render_report(&diagnosis)),
        Ok(diagnosis) => json_response(StatusCode::OK, &diagnosis_to_json(diagnosis)),
        Err(e) => {
            tracing::warn!("Rejected diagnosis request: {}", e);
            error_response(&e)
        }
    }
}

/// Plain-text report only when `text/plain` outranks JSON in the `Accept` header
fn wants_text_report(headers: &HeaderMap) -> bool {
    let Some(accept) = headers.get(header::ACCEPT).and_then(|v| v.to_str().ok()) else {
        return false;
    };

    let mut text_q: f32 = 0.0;
    let mut json_q: f32 = 0.0;
    for range in accept.split(',') {
        let mut parts = range.split(';');
        let media = parts.next().unwrap_or("").trim().to_ascii_lowercase();
        let q = parts
            .filter_map(|param| param.trim().strip_prefix("q="))
            .find_map(|q| q.trim().parse::<f32>().ok())
            .unwrap_or(1.0);

        match media.as_str() {
            "text/plain" => text_q = text_q.max(q),
            "application/json" | "application/*" | "*/*" => json_q = json_q.max(q),
            _ => {}
        }
    }

    // Ties go to JSON
    text_q > 0.0 && text_q > json_q
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::diagnosis_service::DiagnosisService;
    use crate::application::fault_model::FaultModel;
    use crate::presentation::routes::router;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    struct StubModel;

    impl FaultModel for StubModel {
        fn predict(&self, _features: &[f64]) -> anyhow::Result<bool> {
            Ok(false)
        }

        fn predict_probability(&self, _features: &[f64]) -> anyhow::Result<f64> {
            Ok(0.1)
        }
    }

    fn app() -> axum::Router {
        router(Arc::new(AppState {
            diagnosis_service: DiagnosisService::new(Arc::new(StubModel)),
        }))
    }

    fn post(body: &str, accept: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/diagnoses")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, accept)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn accept(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, value.parse().unwrap());
        headers
    }

    async fn assert_invalid_body(request: Request<Body>) {
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");

        let json = body_json(response).await;
        assert_eq!(json["error"], "invalid_input");
        assert!(json["message"].as_str().unwrap().starts_with("invalid input: body"));
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    const DEFAULTS: &str = r#"{
        "wind_speed_mps": 12.0,
        "rotor_speed_rpm": 20.0,
        "temperature_c": 45.0,
        "power_output_w": 500000.0,
        "vibration_mm_s": 0.4
    }"#;

    #[tokio::test]
    async fn test_health_check() {
        let response = app()
            .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn test_diagnose_json() {
        let response = app()
            .oneshot(post(DEFAULTS, "application/json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["verdict"]["is_fault"], false);
        assert_eq!(json["verdict"]["fault_probability"], 0.1);
        assert_eq!(json["within_safe_range"], false);

        let anomalies = json["physics"]["anomalies"].as_array().unwrap();
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0]["code"], "efficiency_out_of_range");

        let tsr = json["physics"]["tip_speed_ratio"].as_f64().unwrap();
        assert!((tsr - 3.4907).abs() < 1e-3);
    }

    #[tokio::test]
    async fn test_diagnose_text_report() {
        let response = app().oneshot(post(DEFAULTS, "text/plain")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let report = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(report.contains("Normal Operation — No Fault Detected"));
        assert!(report.contains("Expected Power Output: 532,009 W"));
    }

    #[tokio::test]
    async fn test_missing_field_is_invalid_input() {
        let body = r#"{
            "wind_speed_mps": 12.0,
            "rotor_speed_rpm": 20.0,
            "temperature_c": 45.0,
            "power_output_w": 500000.0
        }"#;

        let response = app().oneshot(post(body, "application/json")).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let json = body_json(response).await;
        assert_eq!(json["error"], "invalid_input");
        assert!(json["message"].as_str().unwrap().contains("vibration_mm_s"));
    }

    #[tokio::test]
    async fn test_zero_wind_is_degenerate() {
        let body = DEFAULTS.replace("\"wind_speed_mps\": 12.0", "\"wind_speed_mps\": 0.0");

        let response = app().oneshot(post(&body, "application/json")).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let json = body_json(response).await;
        assert_eq!(json["error"], "degenerate_input");
    }

    #[tokio::test]
    async fn test_wrong_type_field_is_invalid_input() {
        let body = DEFAULTS.replace("\"wind_speed_mps\": 12.0", "\"wind_speed_mps\": \"12\"");
        assert_invalid_body(post(&body, "application/json")).await;
    }

    #[tokio::test]
    async fn test_out_of_range_number_is_invalid_input() {
        let body = DEFAULTS.replace("\"wind_speed_mps\": 12.0", "\"wind_speed_mps\": 1e400");
        assert_invalid_body(post(&body, "application/json")).await;
    }

    #[tokio::test]
    async fn test_truncated_body_is_invalid_input() {
        let body = &DEFAULTS[..DEFAULTS.len() / 2];
        assert_invalid_body(post(body, "application/json")).await;
    }

    #[tokio::test]
    async fn test_missing_content_type_is_invalid_input() {
        let request = Request::builder()
            .method("POST")
            .uri("/diagnoses")
            .body(Body::from(DEFAULTS))
            .unwrap();
        assert_invalid_body(request).await;
    }

    #[tokio::test]
    async fn test_json_preferred_over_low_quality_text() {
        let response = app()
            .oneshot(post(DEFAULTS, "application/json, text/plain;q=0.1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["verdict"]["is_fault"], false);
    }

    #[test]
    fn test_wants_text_report() {
        assert!(!wants_text_report(&HeaderMap::new()));
        assert!(wants_text_report(&accept("text/plain")));
        assert!(wants_text_report(&accept("text/plain, application/json;q=0.5")));
        assert!(!wants_text_report(&accept("application/json, text/plain;q=0.1")));
        assert!(!wants_text_report(&accept("text/plain, application/json")));
        assert!(!wants_text_report(&accept("*/*")));
        assert!(!wants_text_report(&accept("text/plain;q=0")));
        assert!(wants_text_report(&accept("TEXT/PLAIN; charset=utf-8")));
    }

    #[test]
    fn test_into_sample() {
        let request: TelemetryRequest = serde_json::from_str(DEFAULTS).unwrap();
        assert_eq!(request.into_sample().unwrap(), TelemetrySample::default());
    }
}
