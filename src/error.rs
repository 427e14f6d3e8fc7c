// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    // 500, missing or invalid credentials / sheet id
    Configuration(String),

    // 500, spreadsheet unreachable, auth refused, malformed credentials JSON
    DataSource(String),

    // 400 Bad Request
    BadRequest(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    InternalServerError(String),
}

impl AppError {
    /// Category name reported to clients next to the message.
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Configuration(_) => "ConfigurationError",
            AppError::DataSource(_) => "DataSourceError",
            AppError::BadRequest(_) => "ValidationInputError",
            AppError::NotFound(_) => "NotFoundError",
            AppError::InternalServerError(_) => "InternalServerError",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Configuration(_)
            | AppError::DataSource(_)
            | AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AppError::Configuration(msg)
            | AppError::DataSource(msg)
            | AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::InternalServerError(msg) => msg,
        }
    }

    fn hint(&self) -> Option<&'static str> {
        match self {
            AppError::Configuration(_) => Some(
                "Set GOOGLE_CREDENTIALS to the service-account JSON and SHEET_ID to the spreadsheet key",
            ),
            AppError::DataSource(_) => Some(
                "Check that the spreadsheet is shared with the service account and the API is reachable",
            ),
            _ => None,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category(), self.message())
    }
}

impl std::error::Error for AppError {}

/// Implements `IntoResponse` for `AppError`.
/// Converts the error into a JSON response with appropriate HTTP status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let mut body = json!({
            "error": self.message(),
            "category": self.category(),
        });
        if let Some(hint) = self.hint() {
            body["hint"] = json!(hint);
        }

        (status, Json(body)).into_response()
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::DataSource(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        AppError::DataSource(format!("could not sign service-account assertion: {}", err))
    }
}
