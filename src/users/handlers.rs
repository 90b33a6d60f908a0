use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tracing::{instrument, warn};

use crate::{
    state::AppState,
    users::{
        dto::{UserRequest, UserView},
        validation::{validate_create, validate_update},
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

fn bad_request(msg: String) -> Response {
    warn!(reason = %msg, "invalid user payload");
    (StatusCode::BAD_REQUEST, msg).into_response()
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(mut payload): Json<UserRequest>,
) -> Result<Json<UserView>, Response> {
    validate_create(&mut payload).map_err(bad_request)?;

    let user = state
        .users
        .create_user(payload)
        .await
        .map_err(IntoResponse::into_response)?;
    Ok(Json(user))
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserView>>, Response> {
    let users = state
        .users
        .list_users()
        .await
        .map_err(IntoResponse::into_response)?;
    Ok(Json(users))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserView>, Response> {
    let user = state
        .users
        .get_user(id)
        .await
        .map_err(IntoResponse::into_response)?;
    Ok(Json(user))
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(mut payload): Json<UserRequest>,
) -> Result<Json<UserView>, Response> {
    validate_update(&mut payload).map_err(bad_request)?;

    let user = state
        .users
        .update_user(id, payload)
        .await
        .map_err(IntoResponse::into_response)?;
    Ok(Json(user))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, Response> {
    state
        .users
        .delete_user(id)
        .await
        .map_err(IntoResponse::into_response)?;
    Ok(StatusCode::NO_CONTENT)
}
