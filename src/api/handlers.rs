//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use serde::de::Error as _;
use serde_json::{Value, error::Category};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::calculate_payroll;

use super::request::PayrollRequest;
use super::response::{ApiError, ApiErrorResponse, ContactResponse, PayrollResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/payroll", post(payroll_handler))
        .route("/api/contact", post(contact_handler))
        .with_state(state)
}

/// Handler for POST /api/payroll.
///
/// Accepts a gross salary and returns the statutory deductions and net pay.
/// An empty body, or one not sent as JSON, is treated as `{}` (gross 0).
async fn payroll_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll request");

    let request = match read_json_body(&headers, &body).and_then(payroll_request) {
        Ok(request) => request,
        Err(err) => return malformed_json_response(err, correlation_id),
    };

    let config = state.config();
    let start_time = Instant::now();
    match calculate_payroll(request.gross, config.config()) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                gross = %result.gross,
                net = %result.net,
                paye = %result.deductions.paye,
                warnings = result.audit_trace.warnings.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Payroll calculated"
            );
            let response = PayrollResponse {
                calculation_id: Uuid::new_v4(),
                timestamp: Utc::now(),
                engine_version: env!("CARGO_PKG_VERSION").to_string(),
                scheme: config.scheme().code.clone(),
                result,
            };
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(response),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                gross = %request.gross,
                error = %err,
                "Payroll calculation failed"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}

/// Handler for POST /api/contact.
///
/// Nothing is stored; the submitted payload is echoed back. An empty or
/// non-JSON body echoes as `{}`.
async fn contact_handler(headers: HeaderMap, body: Bytes) -> Response {
    let correlation_id = Uuid::new_v4();

    let submission = match read_json_body(&headers, &body) {
        Ok(submission) => submission.unwrap_or_else(|| serde_json::json!({})),
        Err(err) => return malformed_json_response(err, correlation_id),
    };

    let inquiry_type = submission
        .get("inquiryType")
        .and_then(|v| v.as_str())
        .unwrap_or("unspecified");
    info!(
        correlation_id = %correlation_id,
        inquiry_type = %inquiry_type,
        "Contact form received"
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(ContactResponse::success(submission)),
    )
        .into_response()
}

/// Decodes a JSON request body.
///
/// Returns `Ok(None)` when there is nothing to decode: the content type is
/// not JSON, or the body is empty or whitespace. Any other body must be a
/// JSON object or array.
fn read_json_body(
    headers: &HeaderMap,
    body: &Bytes,
) -> Result<Option<Value>, serde_json::Error> {
    if !has_json_content_type(headers) || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    let value: Value = serde_json::from_slice(body)?;
    if value.is_object() || value.is_array() {
        Ok(Some(value))
    } else {
        Err(serde_json::Error::custom(
            "request body must be a JSON object or array",
        ))
    }
}

/// Reads `gross` from an object body; arrays and absent bodies carry none.
fn payroll_request(body: Option<Value>) -> Result<PayrollRequest, serde_json::Error> {
    match body {
        Some(value @ Value::Object(_)) => serde_json::from_value(value),
        _ => Ok(PayrollRequest::default()),
    }
}

/// `application/json`, with or without parameters, or any `+json` subtype.
fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// Maps a JSON decoding failure to a 400 response.
fn malformed_json_response(err: serde_json::Error, correlation_id: Uuid) -> Response {
    let error = match err.classify() {
        Category::Syntax | Category::Eof => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        Category::Data | Category::Io => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON data error"
            );
            ApiError::malformed_json(format!("Invalid request body: {}", err))
        }
    };

    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}
