use std::process::{ExitCode, Termination};

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use error_stack::Report;
use serde::Serialize;

use application::error::AppError;

/// Error wrapper for `main`, printing the full report chain on exit.
#[derive(Debug)]
pub struct StackTrace(Report<AppError>);

impl From<Report<AppError>> for StackTrace {
    fn from(e: Report<AppError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        eprintln!("Error: {:?}", self.0);
        ExitCode::FAILURE
    }
}

/// Machine-readable codes on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    BookNotFound,
    InternalServerError,
    BadRequest,
}

/// Uniform error envelope for every non-2xx response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error_code: ErrorCode,
    pub error_message: String,
}

/// HTTP rendering of a domain error report. `message` overrides the canned
/// text, e.g. for joined validation failures.
#[derive(Debug)]
pub struct ErrorStatus {
    report: Report<AppError>,
    message: Option<String>,
}

impl ErrorStatus {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            report: Report::new(AppError::BadRequest),
            message: Some(message.into()),
        }
    }
}

impl From<Report<AppError>> for ErrorStatus {
    fn from(report: Report<AppError>) -> Self {
        Self {
            report,
            message: None,
        }
    }
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> axum::response::Response {
        let context = *self.report.current_context();
        let (status, code) = match context {
            AppError::BookNotFound => (StatusCode::NOT_FOUND, ErrorCode::BookNotFound),
            AppError::BadRequest => (StatusCode::BAD_REQUEST, ErrorCode::BadRequest),
            AppError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalServerError,
            ),
        };
        if status.is_server_error() {
            tracing::error!(error = ?self.report, "request failed");
        }
        let body = ErrorBody {
            error_code: code,
            error_message: self.message.unwrap_or_else(|| context.to_string()),
        };
        (status, Json(body)).into_response()
    }
}
