use chrono::{DateTime, Utc};
use derive_new::new;

use crate::model::id::BookCode;

#[derive(Debug, Clone, new)]
pub struct CreateBook {
    pub tag: String,
    pub name: String,
    pub price: i64,
    #[new(value = "Utc::now()")]
    pub created_at: DateTime<Utc>,
}

/// Overwrites `name` (and `price` when given) of the live book keyed by `code`.
#[derive(Debug, Clone, new)]
pub struct UpdateBook {
    pub code: BookCode,
    pub name: String,
    pub price: Option<i64>,
    #[new(value = "Utc::now()")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, new)]
pub struct DeleteBook {
    pub code: BookCode,
}
