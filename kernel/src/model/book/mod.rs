use chrono::{DateTime, Utc};

use super::id::BookId;

pub mod event;

/// A live (not soft-deleted) book as read from storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: BookId,
    pub tag: String,
    pub name: String,
    pub price: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields a partial update may overwrite. `None` leaves the stored value alone.
#[derive(Debug, Default, Clone)]
pub struct BookPatch {
    pub name: Option<String>,
    pub price: Option<i64>,
}

impl Book {
    pub fn apply(&mut self, patch: BookPatch) {
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
    }
}
