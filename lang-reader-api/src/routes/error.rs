use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;

use crate::{config::Environment, domain::ProjectError};

pub const INVALID_PROJECT_ID: &str = "Invalid project ID";
pub const PROJECT_NOT_FOUND: &str = "Project not found";

/// Whether unclassified failures carry their internal cause in the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorDetails {
    Expose,
    Hide,
}

impl From<&Environment> for ErrorDetails {
    fn from(environment: &Environment) -> Self {
        match environment {
            Environment::Local => Self::Expose,
            Environment::Production => Self::Hide,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    detail: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Map a store error, using `failure` as the public message for
    /// anything that is not the caller's fault.
    pub fn from_project_error(err: ProjectError, failure: &str, details: ErrorDetails) -> Self {
        match err {
            ProjectError::Validation(message) => Self::bad_request(message),
            ProjectError::InvalidIdentifier(_) => Self::bad_request(INVALID_PROJECT_ID),
            ProjectError::NotFound => Self::not_found(PROJECT_NOT_FOUND),
            ProjectError::Storage(_) => {
                tracing::error!("{}: {}", failure, err);
                let api_error = Self::internal(failure);
                match details {
                    ErrorDetails::Expose => api_error.with_detail(err.to_string()),
                    ErrorDetails::Hide => api_error,
                }
            }
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            message: self.message,
            error: self.detail,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection);
        Self::bad_request(rejection.body_text())
    }
}
