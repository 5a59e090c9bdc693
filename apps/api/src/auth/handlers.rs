//! Axum route handlers for registration, login, and token management.

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::auth::jwt::issue_token;
use crate::auth::password::{check_strength, hash_password, verify_password};
use crate::errors::AppError;
use crate::models::user::{UserProfile, UserRow};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct DemoLoginRequest {
    pub email: String,
}

/// POST /api/auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    validate_name("first_name", &request.first_name)?;
    validate_name("last_name", &request.last_name)?;
    validate_email(&request.email)?;
    check_strength(&request.password).map_err(AppError::Validation)?;

    let existing = sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE email = $1")
        .bind(&request.email)
        .fetch_optional(&state.db)
        .await?;

    if existing.is_some() {
        return Err(AppError::Conflict(
            "A user with this email already exists".to_string(),
        ));
    }

    let password_hash = hash_password(&request.password)?;

    let user = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (id, first_name, last_name, email, password_hash)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&request.first_name)
    .bind(&request.last_name)
    .bind(&request.email)
    .bind(&password_hash)
    .fetch_one(&state.db)
    .await?;

    info!("Registered user {}", user.id);

    let token = issue_token(&state.config.jwt_secret, user.id, &user.email)
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User registered successfully",
            "user": UserProfile::from(user),
            "token": token,
        })),
    ))
}

/// POST /api/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    validate_email(&request.email)?;
    if request.password.is_empty() {
        return Err(AppError::Validation("password is required".to_string()));
    }

    let user = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE email = $1")
        .bind(&request.email)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

    if !user.is_active {
        return Err(AppError::Unauthorized(
            "Your account has been deactivated".to_string(),
        ));
    }

    if !verify_password(&request.password, &user.password_hash) {
        return Err(AppError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    let token = issue_token(&state.config.jwt_secret, user.id, &user.email)
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok(Json(json!({
        "message": "Login successful",
        "user": UserProfile::from(user),
        "token": token,
    })))
}

/// POST /api/auth/demo-login
///
/// Finds or creates a demo account for the given email. Kept so the demo
/// front-end works without a registration flow.
pub async fn handle_demo_login(
    State(state): State<AppState>,
    Json(request): Json<DemoLoginRequest>,
) -> Result<Json<Value>, AppError> {
    if request.email.trim().is_empty() {
        return Err(AppError::Validation(
            "Email is required for demo login".to_string(),
        ));
    }

    let existing = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE email = $1")
        .bind(&request.email)
        .fetch_optional(&state.db)
        .await?;

    let user = match existing {
        Some(user) => user,
        None => {
            let password_hash = hash_password("demo-password")?;
            sqlx::query_as::<_, UserRow>(
                r#"
                INSERT INTO users (id, first_name, last_name, email, password_hash, company_name)
                VALUES ($1, 'John', 'Doe', $2, $3, 'Demo Company')
                RETURNING *
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(&request.email)
            .bind(&password_hash)
            .fetch_one(&state.db)
            .await?
        }
    };

    let token = issue_token(&state.config.jwt_secret, user.id, &user.email)
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok(Json(json!({
        "message": "Demo login successful",
        "user": UserProfile::from(user),
        "token": token,
    })))
}

/// GET /api/auth/profile
pub async fn handle_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Value>, AppError> {
    let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
        .bind(user.id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(json!({ "user": UserProfile::from(row) })))
}

/// POST /api/auth/refresh
pub async fn handle_refresh(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Value>, AppError> {
    let token = issue_token(&state.config.jwt_secret, user.id, &user.email)
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok(Json(json!({
        "message": "Token refreshed successfully",
        "token": token,
    })))
}

// ────────────────────────────────────────────────────────────────────────────
// Validation
// ────────────────────────────────────────────────────────────────────────────

pub(crate) fn validate_name(field: &str, value: &str) -> Result<(), AppError> {
    let len = value.trim().chars().count();
    if !(2..=50).contains(&len) {
        return Err(AppError::Validation(format!(
            "{field} must be between 2 and 50 characters"
        )));
    }
    Ok(())
}

/// Shape check only. Real validation is delivery.
pub(crate) fn validate_email(value: &str) -> Result<(), AppError> {
    let trimmed = value.trim();
    let valid = trimmed.len() >= 3
        && trimmed.contains('@')
        && !trimmed.starts_with('@')
        && !trimmed.ends_with('@');
    if !valid {
        return Err(AppError::Validation(
            "A valid email address is required".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name_bounds() {
        assert!(validate_name("first_name", "Jo").is_ok());
        assert!(validate_name("first_name", "J").is_err());
        assert!(validate_name("first_name", &"x".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_email_shapes() {
        assert!(validate_email("a@b.com").is_ok());
        assert!(validate_email("missing-at.com").is_err());
        assert!(validate_email("@leading.com").is_err());
        assert!(validate_email("trailing@").is_err());
    }
}
