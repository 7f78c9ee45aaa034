//! HTTP error mapping.
//!
//! Every failure is answered with a JSON object keyed `Error` (or `Empty`
//! for selections over nothing) and a matching status code. Storage and
//! consistency failures collapse to one generic message.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use jokes_core::ServiceError;
use log::{error, warn};
use serde_json::json;
use thiserror::Error;

pub const SERVER_ERROR: &str = "Server or database error";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Malformed payload")]
    MalformedPayload(#[from] JsonRejection),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("{0}")]
    Empty(&'static str),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ApiError {
    /// Replaces a service-level not-found with a route-specific message.
    pub fn not_found_as(self, message: &'static str) -> Self {
        match self {
            Self::Service(ServiceError::JokeNotFound(_) | ServiceError::CategoryNotFound(_)) => {
                Self::NotFound(message)
            }
            other => other,
        }
    }

    /// Replaces an empty-selection error with a route-specific message.
    pub fn empty_as(self, message: &'static str) -> Self {
        match self {
            Self::Service(ServiceError::EmptyCollection | ServiceError::EmptyCategory(_)) => {
                Self::Empty(message)
            }
            other => other,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, key, message) = match self {
            ApiError::MalformedPayload(rejection) => {
                warn!(
                    "event=http_reject module=server status=error reason=malformed_payload detail={}",
                    rejection.body_text()
                );
                (StatusCode::BAD_REQUEST, "Error", "Malformed payload".to_string())
            }
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, "Error", message),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, "Error", message.to_string()),
            ApiError::Empty(message) => (StatusCode::NOT_FOUND, "Empty", message.to_string()),
            ApiError::Service(err) => return service_response(err),
            ApiError::Task(err) => {
                error!("event=http_error module=server status=error reason=task_failed error={err}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Error", SERVER_ERROR.to_string())
            }
        };

        (status, Json(json!({ key: message }))).into_response()
    }
}

fn service_response(err: ServiceError) -> Response {
    let (status, key, message) = match err {
        ServiceError::JokeNotFound(_) => {
            (StatusCode::NOT_FOUND, "Error", "No joke was found".to_string())
        }
        ServiceError::CategoryNotFound(_) => {
            (StatusCode::NOT_FOUND, "Error", "No category was found".to_string())
        }
        ServiceError::EmptyCollection | ServiceError::EmptyCategory(_) => {
            (StatusCode::NOT_FOUND, "Empty", "no jokes were found".to_string())
        }
        ServiceError::InvalidVote(err) => (StatusCode::BAD_REQUEST, "Error", err.to_string()),
        ServiceError::Validation(err) => (StatusCode::BAD_REQUEST, "Error", err.to_string()),
        ServiceError::Conflict(message) => (StatusCode::CONFLICT, "Error", message),
        err @ (ServiceError::DanglingJoke { .. } | ServiceError::Repo(_)) => {
            error!("event=http_error module=server status=error error={err}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Error", SERVER_ERROR.to_string())
        }
    };

    (status, Json(json!({ key: message }))).into_response()
}
