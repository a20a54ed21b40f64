use sqlx::PgPool;

use kernel::interface::repository::BookRepository;
use kernel::prelude::entity::{Book, NewBook};
use kernel::KernelError;

use crate::database::postgres::PostgresDatabase;
use crate::error::{ConvertError, DriverError};

#[async_trait::async_trait]
impl BookRepository for PostgresDatabase {
    async fn create(&self, book: NewBook) -> error_stack::Result<i64, KernelError> {
        PgBookInternal::create(self.pool(), book).await.convert_error()
    }

    async fn find_by_id(&self, id: i64) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::find_by_id(self.pool(), id).await.convert_error()
    }

    async fn list(
        &self,
        limit: i64,
        offset: i64,
    ) -> error_stack::Result<(Vec<Book>, i64), KernelError> {
        PgBookInternal::list(self.pool(), limit, offset).await.convert_error()
    }

    async fn update(&self, book: &Book) -> error_stack::Result<(), KernelError> {
        PgBookInternal::update(self.pool(), book).await.convert_error()
    }

    async fn delete(&self, id: i64) -> error_stack::Result<(), KernelError> {
        PgBookInternal::delete(self.pool(), id).await.convert_error()
    }
}

#[derive(sqlx::FromRow)]
struct BookRow {
    id: i64,
    title: String,
    author: String,
    description: String,
}

impl From<BookRow> for Book {
    fn from(value: BookRow) -> Self {
        Book {
            id: value.id,
            title: value.title,
            author: value.author,
            description: value.description,
        }
    }
}

/// Row shape for the list query, which carries the window-function total.
#[derive(sqlx::FromRow)]
struct BookListRow {
    id: i64,
    title: String,
    author: String,
    description: String,
    total_count: i64,
}

impl From<BookListRow> for Book {
    fn from(value: BookListRow) -> Self {
        Book {
            id: value.id,
            title: value.title,
            author: value.author,
            description: value.description,
        }
    }
}

pub(in crate::database) struct PgBookInternal;

impl PgBookInternal {
    async fn create(pool: &PgPool, book: NewBook) -> Result<i64, DriverError> {
        let id = sqlx::query_scalar::<_, i64>(
            // language=postgresql
            r#"
            INSERT INTO books (title, author, description)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.description)
        .fetch_one(pool)
        .await?;
        Ok(id)
    }

    async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Book>, DriverError> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, title, author, description
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;
        let found = row.map(Book::from);
        Ok(found)
    }

    async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<(Vec<Book>, i64), DriverError> {
        let rows = sqlx::query_as::<_, BookListRow>(
            // language=postgresql
            r#"
            SELECT id, title, author, description,
                   COUNT(*) OVER () AS total_count
            FROM books
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;
        let total = rows.first().map(|row| row.total_count).unwrap_or(0);
        let books = rows.into_iter().map(Book::from).collect();
        Ok((books, total))
    }

    async fn update(pool: &PgPool, book: &Book) -> Result<(), DriverError> {
        // language=postgresql
        sqlx::query(
            r#"
            UPDATE books
            SET title = $2, author = $3, description = $4
            WHERE id = $1
            "#,
        )
        .bind(book.id)
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.description)
        .execute(pool)
        .await?;
        Ok(())
    }

    async fn delete(pool: &PgPool, id: i64) -> Result<(), DriverError> {
        // language=postgresql
        sqlx::query(
            r#"
            DELETE FROM books
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
