use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use kernel::model::{
    book::{
        event::{DeleteBook, UpdateBook},
        Book,
    },
    id::BookCode,
};
use registry::AppRegistry;
use shared::{
    error::{AppError, AppResult},
    validation::validate,
};

use crate::{
    extractor::LenientJson,
    model::book::{BookRequest, BookResponse, PatchBookRequest},
};

const RECORD_NOT_FOUND: &str = "record not found";

/// Any lookup failure, not only a miss, is reported as 404 with its message.
async fn find_live_book(registry: &AppRegistry, code: &BookCode) -> AppResult<Book> {
    match registry.book_repository().find_by_code(code).await {
        Ok(Some(book)) => Ok(book),
        Ok(None) => Err(AppError::EntityNotFound(RECORD_NOT_FOUND.into())),
        Err(e) => Err(AppError::EntityNotFound(e.to_string())),
    }
}

/// Write results never change the response; failures are only logged.
fn log_write_failure(operation: &'static str, result: AppResult<()>) {
    if let Err(e) = result {
        tracing::error!(
            operation,
            error.cause_chain = ?e,
            error.message = %e,
            "book write failed"
        );
    }
}

#[utoipa::path(
    post,
    path = "/book",
    tag = "book",
    request_body = BookRequest,
    responses(
        (status = 201, description = "Book registered", body = BookResponse),
        (status = 400, description = "Validation failed", body = String, content_type = "text/plain"),
    )
)]
#[axum::debug_handler]
pub async fn register_book(
    State(registry): State<AppRegistry>,
    LenientJson(req): LenientJson<BookRequest>,
) -> AppResult<(StatusCode, Json<BookResponse>)> {
    validate(&req)?;

    let result = registry.book_repository().insert(req.clone().into()).await;
    log_write_failure("insert", result);

    Ok((StatusCode::CREATED, Json(req.into())))
}

#[utoipa::path(
    get,
    path = "/book/{code}",
    tag = "book",
    params(("code" = String, Path, description = "Tag of the book")),
    responses(
        (status = 200, description = "Book found", body = BookResponse),
        (status = 404, description = "No live book with this code", body = String, content_type = "text/plain"),
    )
)]
#[axum::debug_handler]
pub async fn show_book(
    Path(code): Path<BookCode>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookResponse>> {
    find_live_book(&registry, &code)
        .await
        .map(BookResponse::from)
        .map(Json)
}

/// Replaces the name only. The response echoes the request body, so `tag`
/// and `price` in it may differ from what is stored.
#[utoipa::path(
    put,
    path = "/book/{code}",
    tag = "book",
    params(("code" = String, Path, description = "Tag of the book")),
    request_body = BookRequest,
    responses(
        (status = 200, description = "Book updated", body = BookResponse),
        (status = 400, description = "Validation failed", body = String, content_type = "text/plain"),
        (status = 404, description = "No live book with this code", body = String, content_type = "text/plain"),
    )
)]
#[axum::debug_handler]
pub async fn update_book(
    Path(code): Path<BookCode>,
    State(registry): State<AppRegistry>,
    LenientJson(req): LenientJson<BookRequest>,
) -> AppResult<Json<BookResponse>> {
    validate(&req)?;
    find_live_book(&registry, &code).await?;

    let result = registry
        .book_repository()
        .update_fields(UpdateBook::new(code, req.name.clone(), None))
        .await;
    log_write_failure("update", result);

    Ok(Json(req.into()))
}

#[utoipa::path(
    patch,
    path = "/book/{code}",
    tag = "book",
    params(("code" = String, Path, description = "Tag of the book")),
    request_body = PatchBookRequest,
    responses(
        (status = 200, description = "Book after the patch", body = BookResponse),
        (status = 400, description = "Validation failed", body = String, content_type = "text/plain"),
        (status = 404, description = "No live book with this code", body = String, content_type = "text/plain"),
    )
)]
#[axum::debug_handler]
pub async fn patch_book(
    Path(code): Path<BookCode>,
    State(registry): State<AppRegistry>,
    LenientJson(req): LenientJson<PatchBookRequest>,
) -> AppResult<Json<BookResponse>> {
    validate(&req)?;
    let mut book = find_live_book(&registry, &code).await?;
    book.apply(req.into());

    let result = registry
        .book_repository()
        .update_fields(UpdateBook::new(code, book.name.clone(), Some(book.price)))
        .await;
    log_write_failure("patch", result);

    Ok(Json(book.into()))
}

/// Soft-deletes the book. Success is answered with an empty 404, which
/// existing clients rely on.
#[utoipa::path(
    delete,
    path = "/book/{code}",
    tag = "book",
    params(("code" = String, Path, description = "Tag of the book")),
    responses(
        (status = 404, description = "Book deleted, or no live book with this code", body = String, content_type = "text/plain"),
    )
)]
#[axum::debug_handler]
pub async fn delete_book(
    Path(code): Path<BookCode>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    find_live_book(&registry, &code).await?;

    let result = registry
        .book_repository()
        .soft_delete(DeleteBook::new(code))
        .await;
    log_write_failure("soft_delete", result);

    Ok(StatusCode::NOT_FOUND)
}
