//! API error responses
//!
//! Every failure leaves the API as a JSON body with an `error` code,
//! including requests axum's extractors reject.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{debug, error};
use velvet_common::Error;

/// Errors surfaced to HTTP clients
///
/// "Not fusable" is deliberately absent: it is a 200 response body, not
/// an error.
#[derive(Debug)]
pub enum ApiError {
    /// Arcana name outside the catalog (stale or mistyped client data)
    UnknownCategory(String),
    /// Persona (or other named resource) not catalogued
    NotFound(String),
    /// Body or query string that could not be extracted
    BadRequest { status: StatusCode, message: String },
    Internal(String),
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        match e {
            Error::UnknownArcana(name) => ApiError::UnknownCategory(name),
            Error::NotFound(what) => ApiError::NotFound(what),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::UnknownCategory(name) => {
                debug!("Rejected unknown arcana: {}", name);
                (
                    StatusCode::BAD_REQUEST,
                    json!({ "error": "unknown_category", "category": name }),
                )
            }
            ApiError::NotFound(what) => (
                StatusCode::NOT_FOUND,
                json!({ "error": "not_found", "message": format!("Not found: {}", what) }),
            ),
            ApiError::BadRequest { status, message } => {
                debug!("Rejected request: {}", message);
                (status, json!({ "error": "bad_request", "message": message }))
            }
            ApiError::Internal(message) => {
                error!("Internal error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "internal", "message": message }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
