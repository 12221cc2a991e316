use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    book::{
        event::{CreateBook, DeleteBook, UpdateBook},
        Book,
    },
    id::BookCode,
};

/// Single-row persistence for books. Soft-deleted rows are invisible to
/// every method.
#[mockall::automock]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// First live book whose key equals `code`.
    async fn find_by_code(&self, code: &BookCode) -> AppResult<Option<Book>>;
    async fn insert(&self, event: CreateBook) -> AppResult<()>;
    async fn update_fields(&self, event: UpdateBook) -> AppResult<()>;
    async fn soft_delete(&self, event: DeleteBook) -> AppResult<()>;
}
