//! In-memory upload token store for tests and local runs
//!
//! Counts sessions and queries so callers can assert on how many lookups
//! were issued and that every session was released.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use super::store::{DbError, LookupSession, UploadTokenStore};
use crate::models::{Owner, Repo, UploadToken};

/// Query and session counters
#[derive(Debug, Default)]
pub struct StoreStats {
    sessions_opened: AtomicUsize,
    sessions_released: AtomicUsize,
    owner_queries: AtomicUsize,
    repo_queries: AtomicUsize,
}

impl StoreStats {
    pub fn sessions_opened(&self) -> usize {
        self.sessions_opened.load(Ordering::SeqCst)
    }

    pub fn sessions_released(&self) -> usize {
        self.sessions_released.load(Ordering::SeqCst)
    }

    pub fn owner_queries(&self) -> usize {
        self.owner_queries.load(Ordering::SeqCst)
    }

    pub fn repo_queries(&self) -> usize {
        self.repo_queries.load(Ordering::SeqCst)
    }
}

#[derive(Clone, Default)]
struct Tables {
    owners: Vec<Owner>,
    repos: Vec<Repo>,
}

/// Store backed by plain vectors. Rows are matched in insertion order.
#[derive(Clone, Default)]
pub struct MemoryUploadTokenStore {
    tables: Arc<Tables>,
    stats: Arc<StoreStats>,
    fail: bool,
}

impl MemoryUploadTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_owner(mut self, ownerid: i64, username: &str) -> Self {
        Arc::make_mut(&mut self.tables).owners.push(Owner {
            ownerid,
            username: username.to_owned(),
        });
        self
    }

    pub fn with_repo(mut self, ownerid: i64, name: &str, token: impl Into<UploadToken>) -> Self {
        Arc::make_mut(&mut self.tables).repos.push(Repo {
            ownerid,
            name: name.to_owned(),
            upload_token: token.into(),
        });
        self
    }

    /// Make every query fail, to exercise the 500 path
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn stats(&self) -> &StoreStats {
        &self.stats
    }
}

#[async_trait]
impl UploadTokenStore for MemoryUploadTokenStore {
    async fn session(&self) -> Result<Box<dyn LookupSession>, DbError> {
        self.stats.sessions_opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MemorySession {
            tables: Arc::clone(&self.tables),
            stats: Arc::clone(&self.stats),
            fail: self.fail,
        }))
    }
}

struct MemorySession {
    tables: Arc<Tables>,
    stats: Arc<StoreStats>,
    fail: bool,
}

impl MemorySession {
    fn check(&self) -> Result<(), DbError> {
        if self.fail {
            Err(DbError::Sqlx(sqlx::Error::PoolClosed))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl LookupSession for MemorySession {
    async fn find_owner(&mut self, username: &str) -> Result<Option<Owner>, DbError> {
        self.stats.owner_queries.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self
            .tables
            .owners
            .iter()
            .find(|o| o.username == username)
            .cloned())
    }

    async fn find_repo(&mut self, ownerid: i64, name: &str) -> Result<Option<Repo>, DbError> {
        self.stats.repo_queries.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self
            .tables
            .repos
            .iter()
            .find(|r| r.ownerid == ownerid && r.name == name)
            .cloned())
    }
}

impl Drop for MemorySession {
    fn drop(&mut self) {
        self.stats.sessions_released.fetch_add(1, Ordering::SeqCst);
    }
}
