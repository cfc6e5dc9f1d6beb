//! `PostgreSQL` repository implementation.
//!
//! Uses `sqlx` runtime-checked queries against a single table:
//!
//! ```sql
//! CREATE TABLE todos (
//!     id BIGSERIAL PRIMARY KEY,
//!     description VARCHAR(30) NOT NULL,
//!     finished BOOLEAN NOT NULL DEFAULT FALSE,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::domain::{Description, NewTodo, TodoId, TodoItem};
use crate::infrastructure::{RepositoryError, TodoRepository};

/// DDL applied by [`PostgresTodoRepository::ensure_schema`].
pub const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS todos (
    id BIGSERIAL PRIMARY KEY,
    description VARCHAR(30) NOT NULL,
    finished BOOLEAN NOT NULL DEFAULT FALSE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
CREATE INDEX IF NOT EXISTS idx_todos_unfinished ON todos (finished) WHERE finished = FALSE;
";

#[derive(Debug, sqlx::FromRow)]
struct TodoRow {
    id: i64,
    description: String,
    finished: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<TodoRow> for TodoItem {
    type Error = RepositoryError;

    fn try_from(row: TodoRow) -> Result<Self, Self::Error> {
        let description = Description::parse(&row.description).map_err(|error| {
            RepositoryError::Database(format!("row {} holds an invalid description: {error}", row.id))
        })?;
        Ok(Self {
            id: TodoId::new(row.id),
            description,
            finished: row.finished,
            created_at: row.created_at,
        })
    }
}

/// `PostgreSQL` implementation of [`TodoRepository`].
///
/// # Example
///
/// ```ignore
/// let repository = PostgresTodoRepository::connect("postgres://localhost/todo", 5).await?;
/// repository.ensure_schema().await?;
/// let items = repository.find_all().await?;
/// ```
#[derive(Debug, Clone)]
pub struct PostgresTodoRepository {
    pool: PgPool,
}

impl PostgresTodoRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Database`] if the pool cannot connect.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, RepositoryError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Creates the `todos` table and its index if they are missing.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Database`] if the DDL fails.
    pub async fn ensure_schema(&self) -> Result<(), RepositoryError> {
        sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
    async fn find_by_id(&self, id: TodoId) -> Result<Option<TodoItem>, RepositoryError> {
        let row: Option<TodoRow> = sqlx::query_as(
            "SELECT id, description, finished, created_at FROM todos WHERE id = $1",
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.map(TodoItem::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<TodoItem>, RepositoryError> {
        let rows: Vec<TodoRow> =
            sqlx::query_as("SELECT id, description, finished, created_at FROM todos ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(TodoItem::try_from).collect()
    }

    async fn count_unfinished(&self) -> Result<u64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM todos WHERE finished = FALSE")
            .fetch_one(&self.pool)
            .await?;

        u64::try_from(count)
            .map_err(|_| RepositoryError::Database(format!("negative row count: {count}")))
    }

    async fn insert(&self, todo: NewTodo) -> Result<TodoItem, RepositoryError> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO todos (description, finished, created_at) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(todo.description.as_str())
        .bind(todo.finished)
        .bind(todo.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(todo.with_id(TodoId::new(id)))
    }

    async fn mark_finished(&self, id: TodoId) -> Result<bool, RepositoryError> {
        let result =
            sqlx::query("UPDATE todos SET finished = TRUE WHERE id = $1 AND finished = FALSE")
                .bind(id.value())
                .execute(&self.pool)
                .await?;
        if result.rows_affected() > 0 {
            return Ok(true);
        }

        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM todos WHERE id = $1)")
            .bind(id.value())
            .fetch_one(&self.pool)
            .await?;
        if exists {
            Ok(false)
        } else {
            Err(RepositoryError::NotFound(id))
        }
    }

    async fn delete(&self, id: TodoId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id));
        }
        Ok(())
    }
}
