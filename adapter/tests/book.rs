//! Postgres tests for the book repository and the embedded migrations.
//!
//! Each test gets a fresh database from `#[sqlx::test]`, so a Postgres
//! `DATABASE_URL` is required. They are ignored by default; run them with
//! `cargo test -p adapter -- --ignored`.

use adapter::{
    database::{migrate, ConnectionPool},
    repository::book::BookRepositoryImpl,
};
use chrono::{Duration, Utc};
use kernel::{
    model::{
        book::event::{CreateBook, DeleteBook, UpdateBook},
        id::BookCode,
    },
    repository::book::BookRepository,
};
use shared::error::AppError;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn repository(pool: &PgPool) -> BookRepositoryImpl {
    BookRepositoryImpl::new(ConnectionPool::new(pool.clone()))
}

fn code() -> BookCode {
    BookCode::new("go101")
}

async fn seeded(pool: &PgPool) -> anyhow::Result<BookRepositoryImpl> {
    let repo = repository(pool);
    repo.insert(CreateBook::new("go101".into(), "Go 101".into(), 1000))
        .await?;
    Ok(repo)
}

async fn rows_with_tag(pool: &PgPool, tag: &str) -> anyhow::Result<Vec<i16>> {
    let flags = sqlx::query_scalar("SELECT is_delete FROM books WHERE tag = $1")
        .bind(tag)
        .fetch_all(pool)
        .await?;
    Ok(flags)
}

// ---------------------------------------------------------------------------
// Migrations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn migrate_creates_books_table_and_is_repeatable(pool: PgPool) -> anyhow::Result<()> {
    let conn = ConnectionPool::new(pool.clone());
    migrate(&conn).await?;
    migrate(&conn).await?;

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
        .fetch_one(&pool)
        .await?;
    assert_eq!(count, 0);
    Ok(())
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn insert_then_find_by_tag(pool: PgPool) -> anyhow::Result<()> {
    let repo = seeded(&pool).await?;

    let book = repo.find_by_code(&code()).await?.expect("book should exist");
    assert_eq!(book.tag, "go101");
    assert_eq!(book.name, "Go 101");
    assert_eq!(book.price, 1000);
    assert_eq!(book.created_at, book.updated_at);

    assert!(repo.find_by_code(&BookCode::new("rust")).await?.is_none());
    assert_eq!(rows_with_tag(&pool, "go101").await?, vec![0]);
    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn find_returns_the_oldest_live_row(pool: PgPool) -> anyhow::Result<()> {
    let repo = repository(&pool);
    let now = Utc::now();
    repo.insert(CreateBook {
        tag: "go101".into(),
        name: "newer".into(),
        price: 2,
        created_at: now,
    })
    .await?;
    repo.insert(CreateBook {
        tag: "go101".into(),
        name: "older".into(),
        price: 1,
        created_at: now - Duration::minutes(5),
    })
    .await?;

    let book = repo.find_by_code(&code()).await?.expect("book should exist");
    assert_eq!(book.name, "older");
    Ok(())
}

// ---------------------------------------------------------------------------
// Updates
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn update_without_price_keeps_price(pool: PgPool) -> anyhow::Result<()> {
    let repo = seeded(&pool).await?;

    repo.update_fields(UpdateBook::new(code(), "Go 102".into(), None))
        .await?;

    let book = repo.find_by_code(&code()).await?.expect("book should exist");
    assert_eq!(book.name, "Go 102");
    assert_eq!(book.price, 1000);
    assert!(book.updated_at >= book.created_at);
    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn update_with_price_overwrites_price(pool: PgPool) -> anyhow::Result<()> {
    let repo = seeded(&pool).await?;

    repo.update_fields(UpdateBook::new(code(), "Go 101".into(), Some(500)))
        .await?;

    let book = repo.find_by_code(&code()).await?.expect("book should exist");
    assert_eq!(book.name, "Go 101");
    assert_eq!(book.price, 500);
    Ok(())
}

// ---------------------------------------------------------------------------
// Soft delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn soft_delete_hides_row_but_keeps_it(pool: PgPool) -> anyhow::Result<()> {
    let repo = seeded(&pool).await?;

    repo.soft_delete(DeleteBook::new(code())).await?;

    assert!(repo.find_by_code(&code()).await?.is_none());
    assert_eq!(rows_with_tag(&pool, "go101").await?, vec![1]);
    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn soft_deleted_row_is_not_updated_again(pool: PgPool) -> anyhow::Result<()> {
    let repo = seeded(&pool).await?;
    repo.soft_delete(DeleteBook::new(code())).await?;

    let update = repo
        .update_fields(UpdateBook::new(code(), "Go 102".into(), Some(1)))
        .await;
    let delete = repo.soft_delete(DeleteBook::new(code())).await;

    assert!(matches!(update, Err(AppError::NoRowsAffectedError(_))));
    assert!(matches!(delete, Err(AppError::NoRowsAffectedError(_))));
    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn writes_to_missing_code_affect_nothing(pool: PgPool) -> anyhow::Result<()> {
    let repo = seeded(&pool).await?;
    let missing = BookCode::new("nope");

    let update = repo
        .update_fields(UpdateBook::new(missing.clone(), "x".into(), None))
        .await;
    let delete = repo.soft_delete(DeleteBook::new(missing)).await;

    assert!(matches!(update, Err(AppError::NoRowsAffectedError(_))));
    assert!(matches!(delete, Err(AppError::NoRowsAffectedError(_))));
    assert_eq!(rows_with_tag(&pool, "go101").await?, vec![0]);
    Ok(())
}
