//! Auth API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use crate::auth::{self, CurrentUser, Role};
use crate::core::ServerState;
use crate::db::models::{ProfileUpdate, UserCreate, UserPublic};
use crate::db::repository::UserRepository;
use crate::utils::time::now_ms;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_PASSWORD_LEN, MAX_SHORT_TEXT_LEN,
    MIN_PASSWORD_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::AppResponse;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<Role>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token plus the user it belongs to
#[derive(Debug, Serialize)]
pub struct AuthData {
    pub token: String,
    pub user: UserPublic,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub is_active: bool,
}

#[derive(Debug, Deserialize)]
pub struct RoleUpdateRequest {
    pub role: Role,
}

/// Register a new account and hand back a token
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<Json<AppResponse<AuthData>>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_email(&payload.email)?;
    if payload.password.len() < MIN_PASSWORD_LEN || payload.password.len() > MAX_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "Password must be between {MIN_PASSWORD_LEN} and {MAX_PASSWORD_LEN} characters"
        )));
    }
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.address, "address", MAX_ADDRESS_LEN)?;

    let password_hash = auth::hash_password(&payload.password)?;
    let now = now_ms();
    let repo = UserRepository::new(state.get_db().clone());
    let user = repo
        .create(UserCreate {
            name: payload.name,
            email: payload.email,
            password_hash,
            role: payload.role.unwrap_or(Role::Customer),
            phone: payload.phone,
            address: payload.address,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
        .await?;

    let token = issue_token(&state, &user.id, &user.name, user.role)?;
    tracing::info!(email = %user.email, "User registered");
    Ok(Json(AppResponse::success(AuthData {
        token,
        user: user.public(),
    })))
}

/// Exchange credentials for a token
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<AppResponse<AuthData>>> {
    let repo = UserRepository::new(state.get_db().clone());
    let user = repo
        .find_by_email(&payload.email)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    if !auth::verify_password(&payload.password, &user.password_hash) {
        tracing::warn!(target: "security", email = %payload.email, "Failed login attempt");
        return Err(AppError::invalid_credentials());
    }
    if !user.is_active {
        return Err(AppError::forbidden("Account is deactivated"));
    }

    let token = issue_token(&state, &user.id, &user.name, user.role)?;
    Ok(Json(AppResponse::success(AuthData {
        token,
        user: user.public(),
    })))
}

/// The authenticated user's profile
pub async fn me(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AppResponse<UserPublic>>> {
    let repo = UserRepository::new(state.get_db().clone());
    let record = repo
        .find_by_id(&user.id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(Json(AppResponse::success(record.public())))
}

/// Update own name / phone / address
pub async fn update_profile(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ProfileUpdate>,
) -> AppResult<Json<AppResponse<UserPublic>>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.address, "address", MAX_ADDRESS_LEN)?;

    let repo = UserRepository::new(state.get_db().clone());
    let updated = repo.update_profile(&user.id, payload).await?;
    Ok(Json(AppResponse::success(updated.public())))
}

/// List all users (admin)
pub async fn list_users(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<UserPublic>>>> {
    let repo = UserRepository::new(state.get_db().clone());
    let users = repo.find_all().await?;
    Ok(Json(AppResponse::success(
        users.iter().map(|u| u.public()).collect(),
    )))
}

/// Fetch one user (admin)
pub async fn get_user(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<UserPublic>>> {
    let repo = UserRepository::new(state.get_db().clone());
    let user = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {} not found", id)))?;
    Ok(Json(AppResponse::success(user.public())))
}

/// Activate / deactivate an account (admin)
pub async fn update_user_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusUpdateRequest>,
) -> AppResult<Json<AppResponse<UserPublic>>> {
    let repo = UserRepository::new(state.get_db().clone());
    let updated = repo.set_active(&id, payload.is_active).await?;
    tracing::info!(user = %id, is_active = payload.is_active, "User status changed");
    Ok(Json(AppResponse::success(updated.public())))
}

/// Change a user's role (admin)
pub async fn update_user_role(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<RoleUpdateRequest>,
) -> AppResult<Json<AppResponse<UserPublic>>> {
    let repo = UserRepository::new(state.get_db().clone());
    let updated = repo.set_role(&id, payload.role).await?;
    tracing::info!(user = %id, role = %payload.role, "User role changed");
    Ok(Json(AppResponse::success(updated.public())))
}

fn issue_token(
    state: &ServerState,
    user_id: &Option<surrealdb::RecordId>,
    name: &str,
    role: Role,
) -> AppResult<String> {
    let id = user_id
        .as_ref()
        .map(|id| id.to_string())
        .ok_or_else(|| AppError::internal("User record without id"))?;
    state
        .get_jwt_service()
        .generate_token(&id, name, role)
        .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))
}

fn validate_email(email: &str) -> AppResult<()> {
    let email = email.trim();
    validate_required_text(email, "email", MAX_EMAIL_LEN)?;
    let valid = email.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
    });
    if !valid {
        return Err(AppError::validation("Please include a valid email"));
    }
    Ok(())
}
