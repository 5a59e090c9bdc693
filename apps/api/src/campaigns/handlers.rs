//! Axum route handlers for campaigns: CRUD, lifecycle status, analytics,
//! public lookups, and attached generated images.
//!
//! Every owner-scoped query binds both the campaign id and the caller's
//! user id so a row belonging to someone else reads as not-found.

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::campaigns::validation::{
    compute_ctr, validate_budget, validate_campaign_style, validate_product_description,
    validate_product_name, validate_product_type, validate_status,
};
use crate::content::slogans::{generate_slogans, SloganRequest};
use crate::errors::AppError;
use crate::models::campaign::CampaignRow;
use crate::models::user::UserRow;
use crate::state::AppState;

const OWNER_SCOPE_MESSAGE: &str =
    "Campaign not found or you do not have permission to access it";

// ────────────────────────────────────────────────────────────────────────────
// Request payloads
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListCampaignsQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    10
}

/// Full payload including the contact snapshot.
#[derive(Debug, Deserialize)]
pub struct CreateCampaignRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub company_name: String,
    pub product_name: String,
    pub product_type: String,
    pub product_description: String,
    pub campaign_style: String,
    #[serde(default)]
    pub current_slogan: Option<String>,
    #[serde(default)]
    pub target_audience: Option<String>,
    #[serde(default)]
    pub budget: Option<f64>,
}

/// Reduced payload: contact fields come from the caller's account.
#[derive(Debug, Deserialize)]
pub struct QuickCreateCampaignRequest {
    pub product_name: String,
    pub product_type: String,
    pub product_description: String,
    pub campaign_style: String,
    #[serde(default)]
    pub current_slogan: Option<String>,
    #[serde(default)]
    pub target_audience: Option<String>,
    #[serde(default)]
    pub budget: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCampaignRequest {
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub product_description: Option<String>,
    #[serde(default)]
    pub campaign_style: Option<String>,
    #[serde(default)]
    pub current_slogan: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub budget: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateAnalyticsRequest {
    #[serde(default)]
    pub impressions: Option<i32>,
    #[serde(default)]
    pub clicks: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct EmailLookupQuery {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct AttachImageRequest {
    pub data_url: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub meta: Option<Value>,
}

// ────────────────────────────────────────────────────────────────────────────
// CRUD
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/campaigns
pub async fn handle_list_campaigns(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ListCampaignsQuery>,
) -> Result<Json<Value>, AppError> {
    if let Some(status) = &query.status {
        validate_status(status)?;
    }

    let page = query.page.max(1);
    let limit = query.limit.clamp(1, 100);
    let offset = (page - 1) * limit;

    let total = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM campaigns
        WHERE user_id = $1
          AND ($2::text IS NULL OR status = $2)
          AND ($3::text IS NULL
               OR product_name ILIKE '%' || $3 || '%'
               OR product_description ILIKE '%' || $3 || '%'
               OR company_name ILIKE '%' || $3 || '%')
        "#,
    )
    .bind(user.id)
    .bind(&query.status)
    .bind(&query.search)
    .fetch_one(&state.db)
    .await?;

    let rows = sqlx::query_as::<_, CampaignRow>(
        r#"
        SELECT * FROM campaigns
        WHERE user_id = $1
          AND ($2::text IS NULL OR status = $2)
          AND ($3::text IS NULL
               OR product_name ILIKE '%' || $3 || '%'
               OR product_description ILIKE '%' || $3 || '%'
               OR company_name ILIKE '%' || $3 || '%')
        ORDER BY created_at DESC
        LIMIT $4 OFFSET $5
        "#,
    )
    .bind(user.id)
    .bind(&query.status)
    .bind(&query.search)
    .bind(limit)
    .bind(offset)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(json!({
        "campaigns": rows,
        "pagination": {
            "total": total,
            "page": page,
            "limit": limit,
            "pages": (total + limit - 1) / limit,
        }
    })))
}

/// GET /api/campaigns/:id
pub async fn handle_get_campaign(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let campaign = fetch_owned_campaign(&state, id, user.id).await?;
    Ok(Json(json!({ "campaign": campaign })))
}

/// POST /api/campaigns
pub async fn handle_create_campaign(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateCampaignRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    validate_product_name(&request.product_name)?;
    validate_product_description(&request.product_description)?;
    validate_product_type(&request.product_type)?;
    validate_campaign_style(&request.campaign_style)?;
    validate_budget(request.budget)?;

    let campaign = insert_campaign(
        &state,
        user.id,
        ContactSnapshot {
            first_name: request.first_name.clone(),
            last_name: request.last_name.clone(),
            email: request.email.clone(),
            phone: request.phone.clone(),
            company_name: request.company_name.clone(),
        },
        ProductFields {
            product_name: request.product_name.clone(),
            product_type: request.product_type.clone(),
            product_description: request.product_description.clone(),
            campaign_style: request.campaign_style.clone(),
            current_slogan: request.current_slogan.clone(),
            budget: request.budget,
        },
    )
    .await?;

    let campaign =
        enrich_with_slogans(&state, campaign, request.target_audience.as_deref()).await;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Campaign created successfully",
            "campaign": campaign,
        })),
    ))
}

/// POST /api/campaigns/create
///
/// Same as the full create, but the contact snapshot is taken from the
/// caller's user record.
pub async fn handle_quick_create_campaign(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<QuickCreateCampaignRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    validate_product_name(&request.product_name)?;
    validate_product_description(&request.product_description)?;
    validate_product_type(&request.product_type)?;
    validate_campaign_style(&request.campaign_style)?;
    validate_budget(request.budget)?;

    let account = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
        .bind(user.id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let campaign = insert_campaign(
        &state,
        user.id,
        ContactSnapshot {
            first_name: account.first_name,
            last_name: account.last_name,
            email: account.email,
            phone: None,
            company_name: account
                .company_name
                .unwrap_or_else(|| "Unknown Company".to_string()),
        },
        ProductFields {
            product_name: request.product_name.clone(),
            product_type: request.product_type.clone(),
            product_description: request.product_description.clone(),
            campaign_style: request.campaign_style.clone(),
            current_slogan: request.current_slogan.clone(),
            budget: request.budget,
        },
    )
    .await?;

    let campaign =
        enrich_with_slogans(&state, campaign, request.target_audience.as_deref()).await;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Campaign created successfully",
            "campaign": campaign,
        })),
    ))
}

/// PUT /api/campaigns/:id
pub async fn handle_update_campaign(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCampaignRequest>,
) -> Result<Json<Value>, AppError> {
    if let Some(product_name) = &request.product_name {
        validate_product_name(product_name)?;
    }
    if let Some(product_description) = &request.product_description {
        validate_product_description(product_description)?;
    }
    if let Some(product_type) = &request.product_type {
        validate_product_type(product_type)?;
    }
    if let Some(campaign_style) = &request.campaign_style {
        validate_campaign_style(campaign_style)?;
    }
    validate_budget(request.budget)?;

    fetch_owned_campaign(&state, id, user.id).await?;

    let updated = sqlx::query_as::<_, CampaignRow>(
        r#"
        UPDATE campaigns SET
            product_name = COALESCE($3, product_name),
            product_type = COALESCE($4, product_type),
            product_description = COALESCE($5, product_description),
            campaign_style = COALESCE($6, campaign_style),
            current_slogan = COALESCE($7, current_slogan),
            phone = COALESCE($8, phone),
            budget = COALESCE($9, budget),
            updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user.id)
    .bind(&request.product_name)
    .bind(&request.product_type)
    .bind(&request.product_description)
    .bind(&request.campaign_style)
    .bind(&request.current_slogan)
    .bind(&request.phone)
    .bind(request.budget)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(json!({
        "message": "Campaign updated successfully",
        "campaign": updated,
    })))
}

/// DELETE /api/campaigns/:id
pub async fn handle_delete_campaign(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let result = sqlx::query("DELETE FROM campaigns WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user.id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(OWNER_SCOPE_MESSAGE.to_string()));
    }

    info!("Deleted campaign {id}");
    Ok(Json(json!({ "message": "Campaign deleted successfully" })))
}

// ────────────────────────────────────────────────────────────────────────────
// Lifecycle & analytics
// ────────────────────────────────────────────────────────────────────────────

/// PATCH /api/campaigns/:id/status
pub async fn handle_update_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Value>, AppError> {
    validate_status(&request.status)?;

    let updated = sqlx::query_as::<_, CampaignRow>(
        r#"
        UPDATE campaigns SET status = $3, updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user.id)
    .bind(&request.status)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(OWNER_SCOPE_MESSAGE.to_string()))?;

    Ok(Json(json!({
        "message": "Campaign status updated successfully",
        "campaign": updated,
    })))
}

/// PATCH /api/campaigns/:id/analytics
///
/// Absolute counter updates; omitted fields keep their stored value. CTR is
/// recomputed server-side from the resulting counters.
pub async fn handle_update_analytics(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateAnalyticsRequest>,
) -> Result<Json<Value>, AppError> {
    if let Some(impressions) = request.impressions {
        if impressions < 0 {
            return Err(AppError::Validation(
                "impressions must be a non-negative number".to_string(),
            ));
        }
    }
    if let Some(clicks) = request.clicks {
        if clicks < 0 {
            return Err(AppError::Validation(
                "clicks must be a non-negative number".to_string(),
            ));
        }
    }

    let current = fetch_owned_campaign(&state, id, user.id).await?;

    let impressions = request.impressions.unwrap_or(current.impressions);
    let clicks = request.clicks.unwrap_or(current.clicks);
    let ctr = compute_ctr(impressions, clicks);

    let updated = sqlx::query_as::<_, CampaignRow>(
        r#"
        UPDATE campaigns SET impressions = $3, clicks = $4, ctr = $5, updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user.id)
    .bind(impressions)
    .bind(clicks)
    .bind(ctr)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(json!({
        "message": "Campaign analytics updated successfully",
        "campaign": updated,
    })))
}

/// GET /api/campaigns/analytics/user
pub async fn handle_user_analytics(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Value>, AppError> {
    let (total, active, total_budget, avg_ctr) =
        sqlx::query_as::<_, (i64, i64, Option<f64>, Option<f64>)>(
            r#"
            SELECT
                COUNT(*),
                COUNT(*) FILTER (WHERE status = 'active'),
                SUM(budget),
                AVG(ctr) FILTER (WHERE ctr > 0)
            FROM campaigns
            WHERE user_id = $1
            "#,
        )
        .bind(user.id)
        .fetch_one(&state.db)
        .await?;

    Ok(Json(json!({
        "analytics": {
            "total_campaigns": total,
            "active_campaigns": active,
            "total_budget": total_budget.unwrap_or(0.0),
            "average_ctr": avg_ctr.unwrap_or(0.0),
        }
    })))
}

// ────────────────────────────────────────────────────────────────────────────
// Public lookups (unauthenticated, read-only)
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/campaigns/analytics?email=
pub async fn handle_analytics_by_email(
    State(state): State<AppState>,
    Query(query): Query<EmailLookupQuery>,
) -> Result<(HeaderMap, Json<Value>), AppError> {
    if query.email.trim().is_empty() {
        return Err(AppError::Validation("email is required".to_string()));
    }

    let (total, active, total_budget, avg_ctr) =
        sqlx::query_as::<_, (i64, i64, Option<f64>, Option<f64>)>(
            r#"
            SELECT
                COUNT(*),
                COUNT(*) FILTER (WHERE status = 'active'),
                SUM(budget),
                AVG(ctr) FILTER (WHERE ctr > 0)
            FROM campaigns
            WHERE email = $1
            "#,
        )
        .bind(&query.email)
        .fetch_one(&state.db)
        .await?;

    Ok((
        no_store_headers(),
        Json(json!({
            "analytics": {
                "total_campaigns": total,
                "active_campaigns": active,
                "total_budget": total_budget.unwrap_or(0.0),
                "average_ctr": avg_ctr.unwrap_or(0.0),
            }
        })),
    ))
}

/// GET /api/campaigns/by-email?email=
///
/// Returns a reduced projection only, never the full row.
pub async fn handle_campaigns_by_email(
    State(state): State<AppState>,
    Query(query): Query<EmailLookupQuery>,
) -> Result<(HeaderMap, Json<Value>), AppError> {
    if query.email.trim().is_empty() {
        return Err(AppError::Validation("email is required".to_string()));
    }

    let rows = sqlx::query_as::<_, CampaignRow>(
        "SELECT * FROM campaigns WHERE email = $1 ORDER BY created_at DESC",
    )
    .bind(&query.email)
    .fetch_all(&state.db)
    .await?;

    let campaigns: Vec<Value> = rows
        .iter()
        .map(|row| {
            json!({
                "id": row.id,
                "product_name": row.product_name,
                "product_type": row.product_type,
                "campaign_style": row.campaign_style,
                "budget": row.budget,
                "created_at": row.created_at,
                "uploaded_files": row.uploaded_files,
            })
        })
        .collect();

    Ok((no_store_headers(), Json(json!({ "campaigns": campaigns }))))
}

fn no_store_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    headers
}

// ────────────────────────────────────────────────────────────────────────────
// Attached images
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/campaigns/:id/images
///
/// Stores a generated image descriptor in the campaign's JSON attachment
/// list, newest first.
pub async fn handle_attach_image(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<AttachImageRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    if !request.data_url.starts_with("data:image/") {
        return Err(AppError::Validation(
            "data_url must be a data:image/ URL".to_string(),
        ));
    }

    let campaign = fetch_owned_campaign(&state, id, user.id).await?;

    let descriptor = json!({
        "id": Utc::now().timestamp_millis().to_string(),
        "type": "image",
        "source": request.source.as_deref().unwrap_or("generated"),
        "created_at": Utc::now(),
        "data_url": request.data_url,
        "meta": request.meta.unwrap_or(Value::Null),
    });

    let mut files = match campaign.uploaded_files {
        Value::Array(items) => items,
        _ => Vec::new(),
    };
    files.insert(0, descriptor.clone());

    let updated = sqlx::query_as::<_, CampaignRow>(
        r#"
        UPDATE campaigns SET uploaded_files = $3, updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user.id)
    .bind(Value::Array(files))
    .fetch_one(&state.db)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Image attached successfully",
            "file": descriptor,
            "campaign": updated,
        })),
    ))
}

/// DELETE /api/campaigns/:id/images/:file_id
pub async fn handle_detach_image(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, file_id)): Path<(Uuid, String)>,
) -> Result<Json<Value>, AppError> {
    let campaign = fetch_owned_campaign(&state, id, user.id).await?;

    let files = match campaign.uploaded_files {
        Value::Array(items) => items,
        _ => Vec::new(),
    };

    let before = files.len();
    let remaining: Vec<Value> = files
        .into_iter()
        .filter(|file| file.get("id").and_then(Value::as_str) != Some(file_id.as_str()))
        .collect();

    if remaining.len() == before {
        return Err(AppError::NotFound("Image not found".to_string()));
    }

    sqlx::query(
        "UPDATE campaigns SET uploaded_files = $3, updated_at = NOW() WHERE id = $1 AND user_id = $2",
    )
    .bind(id)
    .bind(user.id)
    .bind(Value::Array(remaining))
    .execute(&state.db)
    .await?;

    Ok(Json(json!({ "message": "Image removed successfully" })))
}

// ────────────────────────────────────────────────────────────────────────────
// Shared plumbing
// ────────────────────────────────────────────────────────────────────────────

struct ContactSnapshot {
    first_name: String,
    last_name: String,
    email: String,
    phone: Option<String>,
    company_name: String,
}

struct ProductFields {
    product_name: String,
    product_type: String,
    product_description: String,
    campaign_style: String,
    current_slogan: Option<String>,
    budget: Option<f64>,
}

async fn insert_campaign(
    state: &AppState,
    user_id: Uuid,
    contact: ContactSnapshot,
    product: ProductFields,
) -> Result<CampaignRow, AppError> {
    let campaign = sqlx::query_as::<_, CampaignRow>(
        r#"
        INSERT INTO campaigns (
            id, user_id,
            first_name, last_name, email, phone, company_name,
            product_name, product_type, product_description,
            campaign_style, current_slogan, budget
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&contact.first_name)
    .bind(&contact.last_name)
    .bind(&contact.email)
    .bind(&contact.phone)
    .bind(&contact.company_name)
    .bind(&product.product_name)
    .bind(&product.product_type)
    .bind(&product.product_description)
    .bind(&product.campaign_style)
    .bind(&product.current_slogan)
    .bind(product.budget)
    .fetch_one(&state.db)
    .await?;

    info!("Created campaign {} for user {user_id}", campaign.id);
    Ok(campaign)
}

/// Runs slogan generation for a freshly created campaign and stores the
/// result. Best-effort: a storage failure logs a warning and returns the
/// campaign as inserted, never failing the create.
async fn enrich_with_slogans(
    state: &AppState,
    campaign: CampaignRow,
    target_audience: Option<&str>,
) -> CampaignRow {
    let request = SloganRequest {
        product_name: campaign.product_name.clone(),
        product_description: campaign.product_description.clone(),
        campaign_style: campaign.campaign_style.clone(),
        target_audience: target_audience.map(str::to_string),
        max_tokens: None,
    };

    let result = generate_slogans(state.text_provider(), &request).await;

    let generated_content = json!({
        "slogans": result.slogans,
        "recommended": result.recommended,
    });

    let stored = sqlx::query_as::<_, CampaignRow>(
        r#"
        UPDATE campaigns SET generated_slogan = $2, generated_content = $3, updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(campaign.id)
    .bind(&result.recommended)
    .bind(&generated_content)
    .fetch_one(&state.db)
    .await;

    match stored {
        Ok(row) => row,
        Err(e) => {
            warn!(
                "Failed to store generated slogans for campaign {}: {e}",
                campaign.id
            );
            campaign
        }
    }
}

async fn fetch_owned_campaign(
    state: &AppState,
    id: Uuid,
    user_id: Uuid,
) -> Result<CampaignRow, AppError> {
    sqlx::query_as::<_, CampaignRow>("SELECT * FROM campaigns WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(OWNER_SCOPE_MESSAGE.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_defaults() {
        let query: ListCampaignsQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 10);
        assert!(query.status.is_none());
        assert!(query.search.is_none());
    }

    #[test]
    fn test_attach_image_requires_data_url_scheme() {
        let request: AttachImageRequest =
            serde_json::from_value(json!({ "data_url": "https://cdn.example.com/x.png" }))
                .unwrap();
        assert!(!request.data_url.starts_with("data:image/"));

        let request: AttachImageRequest =
            serde_json::from_value(json!({ "data_url": "data:image/png;base64,AAAA" })).unwrap();
        assert!(request.data_url.starts_with("data:image/"));
        assert!(request.source.is_none());
    }
}
