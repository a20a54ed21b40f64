use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use error_stack::Report;

use application::error::AppError;
use application::service::{
    CreateBookService, DeleteBookService, GetBookService, ListBookService, UpsertBookService,
};

use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::book::request::{CreateOrUpdateBookRequest, GetAllRequest};
use crate::route::book::response::{
    BookResponse, CreatedResponse, PaginatedBookListResponse, UpsertResponse,
};

mod request;
mod response;

pub trait BookRouter {
    fn route_book(self) -> Self;
}

impl BookRouter for Router<AppModule> {
    fn route_book(self) -> Self {
        self.route("/books", get(list_books).post(create_book))
            .route(
                "/books/:id",
                get(get_book).put(update_book).delete(delete_book),
            )
    }
}

async fn list_books(
    State(module): State<AppModule>,
    Query(req): Query<GetAllRequest>,
) -> Result<PaginatedBookListResponse, ErrorStatus> {
    let (page, limit) = (req.page(), req.limit());
    let (books, total) = module.pgpool().list_books(limit, req.offset()).await?;
    Ok(PaginatedBookListResponse::new(page, limit, total, books))
}

async fn get_book(
    State(module): State<AppModule>,
    Path(id): Path<String>,
) -> Result<BookResponse, ErrorStatus> {
    let id = parse_id(&id)?;
    let book = module.pgpool().get_book(id).await?;
    Ok(BookResponse::from(book))
}

async fn create_book(
    State(module): State<AppModule>,
    body: Bytes,
) -> Result<CreatedResponse, ErrorStatus> {
    let req: CreateOrUpdateBookRequest = decode_body(&body)?;
    req.validate_for_create().map_err(|message| {
        tracing::debug!(%message, "create request failed validation");
        ErrorStatus::bad_request(message)
    })?;
    let id = module.pgpool().create_book(req.into_dto()).await?;
    Ok(CreatedResponse::new(id))
}

async fn update_book(
    State(module): State<AppModule>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<UpsertResponse, ErrorStatus> {
    let id = parse_id(&id)?;
    let req: CreateOrUpdateBookRequest = decode_body(&body)?;
    let outcome = module.pgpool().create_or_update(id, req.into_dto()).await?;
    Ok(UpsertResponse::from(outcome))
}

async fn delete_book(
    State(module): State<AppModule>,
    Path(id): Path<String>,
) -> Result<StatusCode, ErrorStatus> {
    let id = parse_id(&id)?;
    module.pgpool().delete_book(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn parse_id(raw: &str) -> Result<i64, ErrorStatus> {
    raw.parse().map_err(|_| {
        tracing::debug!(raw, "invalid book id in path");
        ErrorStatus::from(Report::new(AppError::BadRequest))
    })
}

fn decode_body(body: &Bytes) -> Result<CreateOrUpdateBookRequest, ErrorStatus> {
    serde_json::from_slice(body).map_err(|error| {
        tracing::debug!(%error, "malformed request body");
        ErrorStatus::from(Report::new(AppError::BadRequest))
    })
}
