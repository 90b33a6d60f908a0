use serde::{Deserialize, Serialize};

/// Request body for creating or updating a user.
///
/// Any `id` sent by the client is ignored: ids come from the store or the path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: Option<String>, // plaintext, hashed before it reaches the store
}

/// Public part of the user returned to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserView {
    pub id: i64,
    pub username: String,
    pub email: String,
}
