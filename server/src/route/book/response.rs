use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use application::transfer::UpsertOutcome;
use kernel::prelude::entity::Book;

#[derive(Debug, Serialize)]
pub struct BookResponse {
    id: i64,
    title: String,
    author: String,
    description: String,
}

impl From<Book> for BookResponse {
    fn from(value: Book) -> Self {
        Self {
            id: value.id,
            title: value.title,
            author: value.author,
            description: value.description,
        }
    }
}

impl IntoResponse for BookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedBookListResponse {
    page: i64,
    limit: i64,
    total: i64,
    total_pages: i64,
    data: Vec<BookResponse>,
}

impl PaginatedBookListResponse {
    pub fn new(page: i64, limit: i64, total: i64, books: Vec<Book>) -> Self {
        Self {
            page,
            limit,
            total,
            total_pages: total_pages(total, limit),
            data: books.into_iter().map(BookResponse::from).collect(),
        }
    }
}

impl IntoResponse for PaginatedBookListResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

// limit is already clamped to >= 1 by the query parser
fn total_pages(total: i64, limit: i64) -> i64 {
    (total + limit - 1) / limit
}

/// 201 pointing at the new resource.
#[derive(Debug)]
pub struct CreatedResponse {
    id: i64,
}

impl CreatedResponse {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

impl IntoResponse for CreatedResponse {
    fn into_response(self) -> Response {
        (
            StatusCode::CREATED,
            [(header::LOCATION, format!("/books/{}", self.id))],
        )
            .into_response()
    }
}

/// 204; carries a Location header only when the upsert inserted a new row.
#[derive(Debug)]
pub struct UpsertResponse(UpsertOutcome);

impl From<UpsertOutcome> for UpsertResponse {
    fn from(value: UpsertOutcome) -> Self {
        Self(value)
    }
}

impl IntoResponse for UpsertResponse {
    fn into_response(self) -> Response {
        match self.0 {
            UpsertOutcome::Created(id) => (
                StatusCode::NO_CONTENT,
                [(header::LOCATION, format!("/books/{id}"))],
            )
                .into_response(),
            UpsertOutcome::Updated => StatusCode::NO_CONTENT.into_response(),
        }
    }
}
