// HTTP response utilities for JSON and plain-text diagnosis responses
use crate::domain::error::DiagnosisError;
use crate::infrastructure::json_mapper::error_to_json;
use axum::{
    body::Body,
    http::{header, HeaderValue, Response, StatusCode},
};
use serde::Serialize;

/// Serialize a value to a JSON response with the given status
pub fn json_response<T: Serialize>(status: StatusCode, data: &T) -> Response<Body> {
    match serde_json::to_vec(data) {
        Ok(bytes) => build_response(status, "application/json", bytes),
        Err(e) => {
            tracing::error!("JSON serialization error: {}", e);
            plain_status(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

pub fn text_response(text: String) -> Response<Body> {
    build_response(StatusCode::OK, "text/plain; charset=utf-8", text.into_bytes())
}

/// Map a rejected request to its status code and JSON error body
pub fn error_response(error: &DiagnosisError) -> Response<Body> {
    let status = match error {
        DiagnosisError::InvalidInput { .. } | DiagnosisError::DegenerateInput(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        DiagnosisError::ModelUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        DiagnosisError::InferenceFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    json_response(status, &error_to_json(error))
}

fn build_response(status: StatusCode, content_type: &'static str, body: Vec<u8>) -> Response<Body> {
    let length = HeaderValue::from(body.len());

    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, length)
        .body(Body::from(body))
        .unwrap_or_else(|e| {
            tracing::error!("Response build error: {}", e);
            plain_status(StatusCode::INTERNAL_SERVER_ERROR)
        })
}

fn plain_status(status: StatusCode) -> Response<Body> {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = status;
    response
}
