use std::sync::Arc;

use tracing::{debug, info};

use crate::users::{
    dto::{UserRequest, UserView},
    error::UserError,
    mapper,
    password::PasswordHasher,
    repo::UserStore,
};

/// Business rules of the user lifecycle: uniqueness, hashing and not-found.
///
/// Input reaching this layer has already passed request validation.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { store, hasher }
    }

    pub async fn create_user(&self, input: UserRequest) -> Result<UserView, UserError> {
        if self.store.find_by_email(&input.email).await?.is_some() {
            return Err(UserError::DuplicateEmail);
        }

        let hash = self
            .hasher
            .hash(input.password.as_deref().unwrap_or_default())
            .map_err(UserError::Hashing)?;
        // A concurrent insert of the same email surfaces here as DuplicateEmail.
        let user = self.store.insert(mapper::from_request(&input, hash)).await?;

        info!(user_id = user.id, email = %user.email, "user created");
        Ok(mapper::to_view(&user))
    }

    pub async fn list_users(&self) -> Result<Vec<UserView>, UserError> {
        let users = self.store.find_all().await?;
        debug!(count = users.len(), "users listed");
        Ok(users.iter().map(mapper::to_view).collect())
    }

    pub async fn get_user(&self, id: i64) -> Result<UserView, UserError> {
        self.store
            .find_by_id(id)
            .await?
            .map(|u| mapper::to_view(&u))
            .ok_or(UserError::NotFound(id))
    }

    /// Overwrites username and email; rehashes only when a non-empty password is given.
    pub async fn update_user(&self, id: i64, input: UserRequest) -> Result<UserView, UserError> {
        let mut user = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        if let Some(owner) = self.store.find_by_email(&input.email).await? {
            if owner.id != id {
                return Err(UserError::DuplicateEmail);
            }
        }

        mapper::apply_request(&mut user, &input);
        if let Some(plain) = input.password.as_deref().filter(|p| !p.is_empty()) {
            user.password_hash = self.hasher.hash(plain).map_err(UserError::Hashing)?;
        }

        let saved = self
            .store
            .update(&user)
            .await?
            .ok_or(UserError::NotFound(id))?;

        info!(user_id = saved.id, "user updated");
        Ok(mapper::to_view(&saved))
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), UserError> {
        if !self.store.delete_by_id(id).await? {
            return Err(UserError::NotFound(id));
        }
        info!(user_id = id, "user deleted");
        Ok(())
    }
}
