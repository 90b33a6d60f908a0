use std::collections::BTreeMap;

use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use crate::users::repo_types::{NewUser, User};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The email is already taken by another row.
    #[error("unique constraint violated on users.email")]
    UniqueViolation,
    #[error("store unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),
}

/// Persistence for user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn exists_by_id(&self, id: i64) -> Result<bool, StoreError>;
    /// Stores a new row and returns it with its assigned id.
    async fn insert(&self, user: NewUser) -> Result<User, StoreError>;
    /// Rewrites username, email and hash of an existing row. `None` if the row is gone.
    async fn update(&self, user: &User) -> Result<Option<User>, StoreError>;
    /// Returns whether a row was removed.
    async fn delete_by_id(&self, id: i64) -> Result<bool, StoreError>;
    /// All users, ascending by id.
    async fn find_all(&self) -> Result<Vec<User>, StoreError>;
}

// ---- Postgres ----

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

fn map_write_error(e: sqlx::Error) -> StoreError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => StoreError::UniqueViolation,
        _ => StoreError::Unavailable(e),
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, StoreError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)"#,
        )
        .bind(id)
        .fetch_one(&self.db)
        .await?;
        Ok(exists)
    }

    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password_hash, created_at
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.db)
        .await
        .map_err(map_write_error)
    }

    async fn update(&self, user: &User) -> Result<Option<User>, StoreError> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
               SET username = $2, email = $3, password_hash = $4
             WHERE id = $1
            RETURNING id, username, email, password_hash, created_at
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_optional(&self.db)
        .await
        .map_err(map_write_error)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, StoreError> {
        let res = sqlx::query(r#"DELETE FROM users WHERE id = $1"#)
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        let rows = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM users
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }
}

// ---- In-memory ----

#[derive(Debug)]
struct MemoryRows {
    rows: BTreeMap<i64, User>,
    next_id: i64,
}

/// Keeps users in process memory with the same email constraint as the table.
#[derive(Debug)]
pub struct MemoryUserStore {
    inner: RwLock<MemoryRows>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryRows {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.rows.values().find(|u| u.email == email).cloned())
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.inner.read().await.rows.contains_key(&id))
    }

    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.rows.values().any(|u| u.email == user.email) {
            return Err(StoreError::UniqueViolation);
        }

        let id = inner.next_id;
        inner.next_id += 1;
        let stored = User {
            id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: OffsetDateTime::now_utc(),
        };
        inner.rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, user: &User) -> Result<Option<User>, StoreError> {
        let mut inner = self.inner.write().await;
        if inner
            .rows
            .values()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(StoreError::UniqueViolation);
        }

        let Some(row) = inner.rows.get_mut(&user.id) else {
            return Ok(None);
        };
        row.username = user.username.clone();
        row.email = user.email.clone();
        row.password_hash = user.password_hash.clone();
        Ok(Some(row.clone()))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.inner.write().await.rows.remove(&id).is_some())
    }

    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.inner.read().await.rows.values().cloned().collect())
    }
}
