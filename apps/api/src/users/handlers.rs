//! Axum route handlers for the Users API: profile management, password
//! change, and a paginated directory listing.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::auth::handlers::{validate_email, validate_name};
use crate::auth::password::{check_strength, hash_password, verify_password};
use crate::errors::AppError;
use crate::models::user::{UserProfile, UserRow};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub search: Option<String>,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    10
}

/// GET /api/users/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Value>, AppError> {
    let row = fetch_user(&state, user.id).await?;
    Ok(Json(json!({ "user": UserProfile::from(row) })))
}

/// PUT /api/users/profile
pub async fn handle_update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<Value>, AppError> {
    if let Some(first_name) = &request.first_name {
        validate_name("first_name", first_name)?;
    }
    if let Some(last_name) = &request.last_name {
        validate_name("last_name", last_name)?;
    }
    if let Some(email) = &request.email {
        validate_email(email)?;
    }

    let current = fetch_user(&state, user.id).await?;

    // Reject email changes that collide with another account
    if let Some(new_email) = &request.email {
        if *new_email != current.email {
            let taken = sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE email = $1")
                .bind(new_email)
                .fetch_optional(&state.db)
                .await?;
            if taken.is_some() {
                return Err(AppError::Conflict(
                    "A user with this email already exists".to_string(),
                ));
            }
        }
    }

    let updated = sqlx::query_as::<_, UserRow>(
        r#"
        UPDATE users SET
            first_name = COALESCE($2, first_name),
            last_name = COALESCE($3, last_name),
            email = COALESCE($4, email),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(user.id)
    .bind(&request.first_name)
    .bind(&request.last_name)
    .bind(&request.email)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(json!({
        "message": "Profile updated successfully",
        "user": UserProfile::from(updated),
    })))
}

/// POST /api/users/change-password
pub async fn handle_change_password(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<Json<Value>, AppError> {
    if request.current_password.is_empty() {
        return Err(AppError::Validation(
            "current_password is required".to_string(),
        ));
    }
    check_strength(&request.new_password).map_err(AppError::Validation)?;

    let row = fetch_user(&state, user.id).await?;

    if !verify_password(&request.current_password, &row.password_hash) {
        return Err(AppError::Unauthorized(
            "Current password is incorrect".to_string(),
        ));
    }

    let new_hash = hash_password(&request.new_password)?;

    sqlx::query("UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1")
        .bind(user.id)
        .bind(&new_hash)
        .execute(&state.db)
        .await?;

    Ok(Json(json!({ "message": "Password changed successfully" })))
}

/// GET /api/users
///
/// Paginated listing with optional name/email search. Accessible to any
/// authenticated user; there is no admin role.
pub async fn handle_list_users(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<Value>, AppError> {
    let page = query.page.max(1);
    let limit = query.limit.clamp(1, 100);
    let offset = (page - 1) * limit;

    let total = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM users
        WHERE $1::text IS NULL
           OR first_name ILIKE '%' || $1 || '%'
           OR last_name ILIKE '%' || $1 || '%'
           OR email ILIKE '%' || $1 || '%'
        "#,
    )
    .bind(&query.search)
    .fetch_one(&state.db)
    .await?;

    let rows = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT * FROM users
        WHERE $1::text IS NULL
           OR first_name ILIKE '%' || $1 || '%'
           OR last_name ILIKE '%' || $1 || '%'
           OR email ILIKE '%' || $1 || '%'
        ORDER BY created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(&query.search)
    .bind(limit)
    .bind(offset)
    .fetch_all(&state.db)
    .await?;

    let users: Vec<UserProfile> = rows.into_iter().map(UserProfile::from).collect();

    Ok(Json(json!({
        "users": users,
        "pagination": {
            "total": total,
            "page": page,
            "limit": limit,
            "pages": (total + limit - 1) / limit,
        }
    })))
}

async fn fetch_user(state: &AppState, id: Uuid) -> Result<UserRow, AppError> {
    sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_defaults() {
        let query: ListUsersQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 10);
        assert!(query.search.is_none());
    }
}
