use crate::state::AppState;
use axum::Router;

pub mod dto;
pub mod error;
pub mod handlers;
mod mapper;
pub mod password;
pub mod repo;
pub mod repo_types;
pub mod services;
mod validation;
#[cfg(test)]
pub(crate) mod testing;

pub fn router() -> Router<AppState> {
    handlers::user_routes()
}
