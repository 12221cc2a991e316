//! Process-local [`BookRepository`] with the same soft-delete semantics as
//! the Postgres one. Backs the router tests in `api`.

use async_trait::async_trait;
use kernel::model::{
    book::{
        event::{CreateBook, DeleteBook, UpdateBook},
        Book,
    },
    id::{BookCode, BookId},
};
use kernel::repository::book::BookRepository;
use shared::error::{AppError, AppResult};
use tokio::sync::RwLock;

struct StoredBook {
    book: Book,
    is_delete: bool,
}

#[derive(Default)]
pub struct InMemoryBookRepository {
    rows: RwLock<Vec<StoredBook>>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows, soft-deleted ones included.
    pub async fn row_count(&self) -> usize {
        self.rows.read().await.len()
    }
}

fn live_with<'a>(
    rows: &'a mut [StoredBook],
    code: &'a BookCode,
) -> impl Iterator<Item = &'a mut StoredBook> + 'a {
    rows.iter_mut()
        .filter(move |r| !r.is_delete && r.book.tag == code.as_str())
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn find_by_code(&self, code: &BookCode) -> AppResult<Option<Book>> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .find(|r| !r.is_delete && r.book.tag == code.as_str())
            .map(|r| r.book.clone()))
    }

    async fn insert(&self, event: CreateBook) -> AppResult<()> {
        let book = Book {
            id: BookId::new(),
            tag: event.tag,
            name: event.name,
            price: event.price,
            created_at: event.created_at,
            updated_at: event.created_at,
        };
        self.rows.write().await.push(StoredBook {
            book,
            is_delete: false,
        });
        Ok(())
    }

    async fn update_fields(&self, event: UpdateBook) -> AppResult<()> {
        let mut rows = self.rows.write().await;
        let mut affected = 0;
        for row in live_with(&mut rows, &event.code) {
            row.book.name = event.name.clone();
            if let Some(price) = event.price {
                row.book.price = price;
            }
            row.book.updated_at = event.updated_at;
            affected += 1;
        }
        if affected == 0 {
            return Err(AppError::NoRowsAffectedError(format!(
                "no live book with code {}",
                event.code
            )));
        }
        Ok(())
    }

    async fn soft_delete(&self, event: DeleteBook) -> AppResult<()> {
        let mut rows = self.rows.write().await;
        let mut affected = 0;
        for row in live_with(&mut rows, &event.code) {
            row.is_delete = true;
            affected += 1;
        }
        if affected == 0 {
            return Err(AppError::NoRowsAffectedError(format!(
                "no live book with code {}",
                event.code
            )));
        }
        Ok(())
    }
}
