use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use flightfinder_core::user::{
    default_approval, normalize_usertype, ApprovalStatus, LoginRequest, RegisterRequest, User,
};

use crate::error::{internal, AppError};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/approve-operator", post(approve_operator))
        .route("/reject-operator", post(reject_operator))
        .route("/fetch-user/{id}", get(fetch_user))
        .route("/fetch-users", get(fetch_users))
}

// ============================================================================
// Request/Response Models
// ============================================================================

/// Wire shape of a user record. The credential hash never leaves the server.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub usertype: String,
    pub approval: ApprovalStatus,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            usertype: user.usertype,
            approval: user.approval,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ApprovalRequest {
    pub id: Uuid,
}

#[derive(Debug, Serialize)]
struct AckResponse {
    message: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /register
async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    if req.username.trim().is_empty() || req.email.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::ValidationError(
            "username, email and password are required".to_string(),
        ));
    }

    let usertype = normalize_usertype(&req.usertype);
    if usertype.is_empty() {
        return Err(AppError::ValidationError("usertype is required".to_string()));
    }

    // Pre-check, backed by the unique index on email.
    let existing = state.users.find_by_email(&req.email).await.map_err(internal)?;
    if existing.is_some() {
        return Err(AppError::ConflictError("User already exists".to_string()));
    }

    let user = User {
        id: Uuid::new_v4(),
        username: req.username,
        email: req.email,
        password: hash_password(&req.password)?,
        approval: default_approval(&usertype),
        usertype,
        created_at: Utc::now(),
    };

    state.users.create_user(&user).await.map_err(internal)?;

    info!("Registered user {} as {}", user.id, user.usertype);

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// POST /login
///
/// The failure message is uniform across "no such user" and "wrong password"
/// so the endpoint cannot be used for account enumeration.
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state
        .users
        .find_by_email(&req.email)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::AuthenticationError("Invalid email or password".to_string()))?;

    if !verify_password(&req.password, &user.password)? {
        return Err(AppError::AuthenticationError(
            "Invalid email or password".to_string(),
        ));
    }

    Ok(Json(UserResponse::from(user)))
}

/// POST /approve-operator
async fn approve_operator(
    State(state): State<AppState>,
    Json(req): Json<ApprovalRequest>,
) -> Result<Json<AckResponse>, AppError> {
    set_approval(&state, req.id, ApprovalStatus::Approved).await?;
    Ok(Json(AckResponse { message: "approved!".to_string() }))
}

/// POST /reject-operator
async fn reject_operator(
    State(state): State<AppState>,
    Json(req): Json<ApprovalRequest>,
) -> Result<Json<AckResponse>, AppError> {
    set_approval(&state, req.id, ApprovalStatus::Rejected).await?;
    Ok(Json(AckResponse { message: "rejected!".to_string() }))
}

// Admin action overwrites the approval field regardless of its current value.
async fn set_approval(
    state: &AppState,
    id: Uuid,
    approval: ApprovalStatus,
) -> Result<(), AppError> {
    let updated = state.users.set_approval(id, approval).await.map_err(internal)?;
    if !updated {
        return Err(AppError::NotFoundError("User not found".to_string()));
    }
    info!("Set approval of user {} to {}", id, approval.as_str());
    Ok(())
}

/// GET /fetch-user/:id
async fn fetch_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state
        .users
        .find_by_id(id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::NotFoundError("User not found".to_string()))?;

    Ok(Json(UserResponse::from(user)))
}

/// GET /fetch-users
async fn fetch_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = state.users.list_users().await.map_err(internal)?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

// ============================================================================
// Password Hashing
// ============================================================================

/// Hash a password with Argon2 and a fresh random salt.
fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::InternalServerError(format!("Password hashing failed: {}", e)))
}

/// Verify a password against a stored hash. Never a plaintext comparison.
fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::InternalServerError(format!("Invalid stored hash: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
