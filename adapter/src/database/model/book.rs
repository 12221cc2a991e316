use chrono::{DateTime, Utc};
use kernel::model::{book::Book, id::BookId};
use uuid::Uuid;

/// Live row of the `books` table. The `is_delete` flag is filtered in SQL
/// and never selected.
#[derive(sqlx::FromRow)]
pub struct BookRow {
    pub book_id: Uuid,
    pub tag: String,
    pub name: String,
    pub price: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BookRow> for Book {
    fn from(value: BookRow) -> Self {
        let BookRow {
            book_id,
            tag,
            name,
            price,
            created_at,
            updated_at,
        } = value;
        Self {
            id: BookId::from(book_id),
            tag,
            name,
            price,
            created_at,
            updated_at,
        }
    }
}
