use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    book::{
        event::{CreateBook, DeleteBook, UpdateBook},
        Book,
    },
    id::{BookCode, BookId},
};
use kernel::repository::book::BookRepository;
use shared::error::{AppError, AppResult};

use crate::database::{model::book::BookRow, ConnectionPool};

#[derive(new)]
pub struct BookRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl BookRepository for BookRepositoryImpl {
    async fn find_by_code(&self, code: &BookCode) -> AppResult<Option<Book>> {
        let row: Option<BookRow> = sqlx::query_as(
            r#"
                SELECT
                    book_id,
                    tag,
                    name,
                    price,
                    created_at,
                    updated_at
                FROM books
                WHERE tag = $1 AND is_delete = 0
                ORDER BY created_at
                LIMIT 1
            "#,
        )
        .bind(code.as_str())
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Book::from))
    }

    async fn insert(&self, event: CreateBook) -> AppResult<()> {
        sqlx::query(
            r#"
                INSERT INTO books (book_id, tag, name, price, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $5)
            "#,
        )
        .bind(BookId::new().raw())
        .bind(&event.tag)
        .bind(&event.name)
        .bind(event.price)
        .bind(event.created_at)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(())
    }

    async fn update_fields(&self, event: UpdateBook) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE books
                SET
                    name = $1,
                    price = COALESCE($2, price),
                    updated_at = $3
                WHERE tag = $4 AND is_delete = 0
            "#,
        )
        .bind(&event.name)
        .bind(event.price)
        .bind(event.updated_at)
        .bind(event.code.as_str())
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(format!(
                "no live book with code {}",
                event.code
            )));
        }
        Ok(())
    }

    async fn soft_delete(&self, event: DeleteBook) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE books
                SET is_delete = 1
                WHERE tag = $1 AND is_delete = 0
            "#,
        )
        .bind(event.code.as_str())
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(format!(
                "no live book with code {}",
                event.code
            )));
        }
        Ok(())
    }
}
