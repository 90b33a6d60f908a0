use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

/// User record in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,                    // assigned by the store
    pub username: String,
    pub email: String,              // unique across users
    #[serde(skip_serializing)]
    pub password_hash: String,      // Argon2 PHC string, never exposed
    pub created_at: OffsetDateTime,
}

/// A user that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}
