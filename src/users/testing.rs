//! Test doubles for the user store and hasher.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use super::password::PasswordHasher;
use super::repo::{StoreError, UserStore};
use super::repo_types::{NewUser, User};

/// Cheap salted stand-in for argon2: `fake$<salt>$<plain>`.
#[derive(Debug, Default)]
pub struct FakeHasher {
    salt: AtomicU64,
}

impl PasswordHasher for FakeHasher {
    fn hash(&self, plain: &str) -> anyhow::Result<String> {
        let salt = self.salt.fetch_add(1, Ordering::Relaxed);
        Ok(format!("fake${}${}", salt, plain))
    }

    fn verify(&self, plain: &str, hash: &str) -> anyhow::Result<bool> {
        let mut parts = hash.splitn(3, '$');
        match (parts.next(), parts.next(), parts.next()) {
            (Some("fake"), Some(_), Some(stored)) => Ok(stored == plain),
            _ => anyhow::bail!("not a fake hash"),
        }
    }
}

#[derive(Debug, Default)]
pub struct BrokenHasher;

impl PasswordHasher for BrokenHasher {
    fn hash(&self, _plain: &str) -> anyhow::Result<String> {
        anyhow::bail!("hasher offline")
    }

    fn verify(&self, _plain: &str, _hash: &str) -> anyhow::Result<bool> {
        anyhow::bail!("hasher offline")
    }
}

/// Every call fails as if the pool could not hand out a connection.
#[derive(Debug, Default)]
pub struct UnavailableStore;

#[async_trait]
impl UserStore for UnavailableStore {
    async fn find_by_id(&self, _id: i64) -> Result<Option<User>, StoreError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }
    async fn find_by_email(&self, _email: &str) -> Result<Option<User>, StoreError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }
    async fn exists_by_id(&self, _id: i64) -> Result<bool, StoreError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }
    async fn insert(&self, _user: NewUser) -> Result<User, StoreError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }
    async fn update(&self, _user: &User) -> Result<Option<User>, StoreError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }
    async fn delete_by_id(&self, _id: i64) -> Result<bool, StoreError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }
    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }
}

/// Lookups never find anything, inserts hit the unique constraint: what a
/// create sees when a concurrent insert of the same email commits between
/// its lookup and its own insert.
#[derive(Debug, Default)]
pub struct RacedInsertStore;

#[async_trait]
impl UserStore for RacedInsertStore {
    async fn find_by_id(&self, _id: i64) -> Result<Option<User>, StoreError> {
        Ok(None)
    }
    async fn find_by_email(&self, _email: &str) -> Result<Option<User>, StoreError> {
        Ok(None)
    }
    async fn exists_by_id(&self, _id: i64) -> Result<bool, StoreError> {
        Ok(false)
    }
    async fn insert(&self, _user: NewUser) -> Result<User, StoreError> {
        Err(StoreError::UniqueViolation)
    }
    async fn update(&self, _user: &User) -> Result<Option<User>, StoreError> {
        Err(StoreError::UniqueViolation)
    }
    async fn delete_by_id(&self, _id: i64) -> Result<bool, StoreError> {
        Ok(false)
    }
    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        Ok(Vec::new())
    }
}
