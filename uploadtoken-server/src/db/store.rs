//! Upload token store - Postgres implementation
//!
//! Two read-only keyed lookups, both parameter-bound and `LIMIT 1`:
//! - owner by exact username
//! - repo by owner id and exact name
//!
//! Columns are cast on the way out (`ownerid::bigint`, `upload_token::text`)
//! so int4/int8 ids and uuid/text tokens decode the same way.

use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::{PgPool, Postgres, Row};

use crate::models::{Owner, Repo, UploadToken};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Source of per-request lookup sessions (testable)
#[async_trait]
pub trait UploadTokenStore: Send + Sync {
    /// Acquire one connection. It is released when the session is dropped.
    async fn session(&self) -> Result<Box<dyn LookupSession>, DbError>;
}

/// A single acquired connection
#[async_trait]
pub trait LookupSession: Send {
    /// First owner whose username equals `username` exactly
    async fn find_owner(&mut self, username: &str) -> Result<Option<Owner>, DbError>;

    /// First repo under `ownerid` whose name equals `name` exactly
    async fn find_repo(&mut self, ownerid: i64, name: &str) -> Result<Option<Repo>, DbError>;
}

/// Postgres-backed store
#[derive(Clone)]
pub struct PgUploadTokenStore {
    pool: PgPool,
}

impl PgUploadTokenStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UploadTokenStore for PgUploadTokenStore {
    async fn session(&self) -> Result<Box<dyn LookupSession>, DbError> {
        let conn = self.pool.acquire().await?;
        Ok(Box::new(PgLookupSession { conn }))
    }
}

/// Session holding a pooled connection
pub struct PgLookupSession {
    conn: PoolConnection<Postgres>,
}

#[async_trait]
impl LookupSession for PgLookupSession {
    async fn find_owner(&mut self, username: &str) -> Result<Option<Owner>, DbError> {
        let row = sqlx::query(
            r#"
            SELECT ownerid::bigint AS ownerid, username
            FROM owners
            WHERE username = $1
            LIMIT 1
            "#,
        )
        .bind(username)
        .fetch_optional(&mut *self.conn)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(Owner {
            ownerid: row.try_get("ownerid")?,
            username: row.try_get("username")?,
        }))
    }

    async fn find_repo(&mut self, ownerid: i64, name: &str) -> Result<Option<Repo>, DbError> {
        let row = sqlx::query(
            r#"
            SELECT ownerid::bigint AS ownerid, name, upload_token::text AS upload_token
            FROM repos
            WHERE ownerid = $1 AND name = $2
            LIMIT 1
            "#,
        )
        .bind(ownerid)
        .bind(name)
        .fetch_optional(&mut *self.conn)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        // A NULL token is surfaced as an empty string
        let token: Option<String> = row.try_get("upload_token")?;

        Ok(Some(Repo {
            ownerid: row.try_get("ownerid")?,
            name: row.try_get("name")?,
            upload_token: UploadToken::new(token.unwrap_or_default()),
        }))
    }
}
