use axum::{
    extract::{Path, State},
    Extension,
};
use jobspring_types::{User, UserPayload};
use validator::Validate;

use crate::auth::{ownership, AuthUser};
use crate::error::{ApiError, ApiResult};
use crate::extract::Json;
use crate::models::NewUser;
use crate::repository::InsertOutcome;
use crate::AppState;

/// `GET /users/:uid`, only for the user themselves.
pub async fn get_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(uid): Path<String>,
) -> ApiResult<Json<Option<User>>> {
    ownership::ensure_same_user(&user, &uid)?;

    let found = state.store.find_user_by_uid(&uid).await?;
    Ok(Json(found))
}

/// `POST /users`
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<UserPayload>,
) -> ApiResult<Json<User>> {
    payload.validate()?;

    match state.store.insert_user(NewUser::from(payload)).await? {
        InsertOutcome::Created(user) => {
            tracing::info!("Created user {}", user.uid);
            Ok(Json(user))
        }
        InsertOutcome::Duplicate => Err(ApiError::conflict(
            "A user with this email already exists",
        )),
    }
}

/// `PUT /users`: insert, or merge into the record holding the same email.
pub async fn upsert_user(
    State(state): State<AppState>,
    Json(payload): Json<UserPayload>,
) -> ApiResult<Json<User>> {
    payload.validate()?;

    let user = state
        .store
        .upsert_user_by_email(NewUser::from(payload))
        .await?;

    Ok(Json(user))
}
