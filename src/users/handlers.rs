use axum::{
    extract::{Path, State},
    routing::{post, put},
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::dto::{BiotypeUpdate, CreatedUserResponse, ResultResponse, UserListResponse, UserPayload};
use super::{repo, services};
use crate::{error::ApiError, state::AppState};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        // collection is reachable with and without the trailing slash
        .route("/users", post(create_user).get(list_active_users))
        .route("/users/", post(create_user).get(list_active_users))
        .route("/users/:id", put(update_user).delete(deactivate_user))
        .route("/users/:id/biotype", put(update_biotype))
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(mut payload): Json<UserPayload>,
) -> Result<Json<CreatedUserResponse>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();
    if !services::is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::InvalidEmail);
    }

    let id_rol = services::resolve_role(payload.id_rol, state.config.default_role_id);
    let new_id = repo::create_with_profile(&state.db, &payload, id_rol).await?;

    info!(user_id = new_id, id_rol, "user and clinical profile created");
    Ok(Json(CreatedUserResponse {
        resultado: "Usuario y Perfil creados con éxito".into(),
        id: new_id,
    }))
}

#[instrument(skip(state))]
pub async fn list_active_users(
    State(state): State<AppState>,
) -> Result<Json<UserListResponse>, ApiError> {
    let users = repo::list_active(&state.db).await?;
    Ok(Json(UserListResponse { resultado: users }))
}

/// Full overwrite of the mutable fields; the path id wins over any id in
/// the body. cedula and estado stay as they are.
#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    Json(mut payload): Json<UserPayload>,
) -> Result<Json<ResultResponse>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();
    if !services::is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::InvalidEmail);
    }

    let id_rol = services::resolve_role(payload.id_rol, state.config.default_role_id);
    repo::update(&state.db, user_id, &payload, id_rol).await?;

    info!(user_id, id_rol, "user updated");
    Ok(Json(ResultResponse {
        resultado: "Usuario y Rol actualizados con éxito".into(),
    }))
}

/// Soft delete. The account flips to 'Inactivo' and drops out of the
/// listing; the row and its clinical profile stay put.
#[instrument(skip(state))]
pub async fn deactivate_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<ResultResponse>, ApiError> {
    repo::deactivate(&state.db, user_id).await?;

    info!(user_id, "user deactivated");
    Ok(Json(ResultResponse {
        resultado: "Cuenta de usuario desactivada correctamente".into(),
    }))
}

/// Endpoint for the external classifier. Reports success even when no
/// profile row matched; callers treat this as fire-and-forget.
#[instrument(skip(state, body))]
pub async fn update_biotype(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    Json(body): Json<BiotypeUpdate>,
) -> Result<Json<ResultResponse>, ApiError> {
    repo::update_biotype(&state.db, user_id, &body.biotipo, body.confianza_ia).await?;

    info!(user_id, biotipo = %body.biotipo, confianza_ia = body.confianza_ia, "biotype updated");
    Ok(Json(ResultResponse {
        resultado: "Biotipo actualizado por IA".into(),
    }))
}
