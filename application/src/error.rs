use std::fmt::Display;

use error_stack::Context;

/// Domain error taxonomy exposed to the HTTP layer. These are the only
/// error kinds visible above the service boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppError {
    BookNotFound,
    BadRequest,
    InternalServerError,
}

impl Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::BookNotFound => write!(f, "book not found"),
            AppError::BadRequest => write!(f, "request is invalid."),
            AppError::InternalServerError => write!(f, "internal server error"),
        }
    }
}

impl Context for AppError {}
