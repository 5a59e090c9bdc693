//! Axum route handlers for the AI content API.
//!
//! Policy for missing provider credentials: endpoints with deterministic
//! fallback content (slogans, images) degrade gracefully and still return
//! 200; free-form text endpoints uniformly return 503 PROVIDER_UNAVAILABLE.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::ai_client::GenerationParams;
use crate::auth::extractor::AuthUser;
use crate::content::images::{generate_images, ImageBrief, ImageGenerationOutcome};
use crate::content::prompts;
use crate::content::slogans::{generate_slogans, SloganRequest, SloganSet};
use crate::content::templates;
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateTextRequest {
    pub prompt: String,
    #[serde(default = "default_text_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_text_tokens() -> u32 {
    1000
}

fn default_temperature() -> f32 {
    0.7
}

#[derive(Debug, Serialize)]
pub struct GenerateTextResponse {
    pub success: bool,
    pub generated_text: String,
    pub usage: UsageStats,
}

/// Character-count based usage accounting. The provider does not report
/// token usage on this endpoint, so these are approximations.
#[derive(Debug, Serialize)]
pub struct UsageStats {
    pub prompt_tokens: usize,
    pub completion_tokens: usize,
    pub total_tokens: usize,
}

#[derive(Debug, Deserialize)]
pub struct TemplateContentRequest {
    pub product_name: String,
    pub product_description: String,
    pub campaign_style: String,
    #[serde(default)]
    pub target_audience: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MarketingCopyRequest {
    pub product_name: String,
    pub target_audience: String,
    #[serde(default = "default_professional")]
    pub tone: String,
    #[serde(default = "default_content_type")]
    pub content_type: String,
    #[serde(default)]
    pub key_benefits: Vec<String>,
    #[serde(default = "default_copy_tokens")]
    pub max_tokens: u32,
}

fn default_professional() -> String {
    "professional".to_string()
}

fn default_content_type() -> String {
    "general".to_string()
}

fn default_copy_tokens() -> u32 {
    500
}

#[derive(Debug, Deserialize)]
pub struct SocialPostRequest {
    pub topic: String,
    #[serde(default = "default_platform")]
    pub platform: String,
    #[serde(default = "default_engaging")]
    pub tone: String,
    #[serde(default = "default_true")]
    pub include_hashtags: bool,
    #[serde(default = "default_post_length")]
    pub max_length: u32,
}

fn default_platform() -> String {
    "general".to_string()
}

fn default_engaging() -> String {
    "engaging".to_string()
}

fn default_true() -> bool {
    true
}

fn default_post_length() -> u32 {
    280
}

#[derive(Debug, Deserialize)]
pub struct EmailRequest {
    pub subject: String,
    #[serde(default = "default_recipient")]
    pub recipient_type: String,
    #[serde(default = "default_goal")]
    pub goal: String,
    #[serde(default = "default_professional")]
    pub tone: String,
    #[serde(default)]
    pub key_points: Vec<String>,
}

fn default_recipient() -> String {
    "customer".to_string()
}

fn default_goal() -> String {
    "inform".to_string()
}

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    pub content: String,
    #[serde(default = "default_summary_length")]
    pub max_length: u32,
    #[serde(default = "default_concise")]
    pub style: String,
}

fn default_summary_length() -> u32 {
    200
}

fn default_concise() -> String {
    "concise".to_string()
}

#[derive(Debug, Deserialize)]
pub struct GenerateImagesRequest {
    pub product_name: String,
    pub product_description: String,
    #[serde(default)]
    pub campaign_style: String,
    pub selected_tagline: String,
    #[serde(default = "default_image_type")]
    pub image_type: String,
    #[serde(default)]
    pub product_type: Option<String>,
}

fn default_image_type() -> String {
    "product_mockup".to_string()
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/ai/generate-text
pub async fn handle_generate_text(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(request): Json<GenerateTextRequest>,
) -> Result<Json<GenerateTextResponse>, AppError> {
    if request.prompt.trim().is_empty() {
        return Err(AppError::Validation("Prompt is required".to_string()));
    }

    let provider = state.text_provider().ok_or(AppError::ProviderUnavailable)?;

    let text = provider
        .generate(
            &request.prompt,
            GenerationParams {
                max_output_tokens: request.max_tokens,
                temperature: request.temperature,
            },
        )
        .await
        .map_err(|e| AppError::Provider(e.to_string()))?;

    let usage = UsageStats {
        prompt_tokens: request.prompt.chars().count(),
        completion_tokens: text.chars().count(),
        total_tokens: request.prompt.chars().count() + text.chars().count(),
    };

    Ok(Json(GenerateTextResponse {
        success: true,
        generated_text: text,
        usage,
    }))
}

/// POST /api/ai/generate-slogans
///
/// The core generation pipeline. Always returns 200 with populated content
/// once the required fields are present; provider failures degrade to the
/// deterministic fallback sets inside `generate_slogans`.
pub async fn handle_generate_slogans(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(request): Json<SloganRequest>,
) -> Result<Json<Value>, AppError> {
    validate_required(&[
        ("product_name", &request.product_name),
        ("product_description", &request.product_description),
        ("campaign_style", &request.campaign_style),
    ])?;

    let result: SloganSet = generate_slogans(state.text_provider(), &request).await;

    Ok(Json(json!({
        "success": true,
        "generated_content": result,
        "metadata": {
            "product_name": request.product_name,
            "product_description": request.product_description,
            "campaign_style": request.campaign_style,
            "target_audience": request.target_audience,
        }
    })))
}

/// POST /api/ai/generate-ad-copy
pub async fn handle_generate_ad_copy(
    _user: AuthUser,
    Json(request): Json<TemplateContentRequest>,
) -> Result<Json<Value>, AppError> {
    validate_template_request(&request)?;

    let ad_copies = templates::ad_copies(
        &request.product_name,
        &request.product_description,
        request.target_audience.as_deref(),
    );
    let recommended = ad_copies[0].text.clone();

    Ok(Json(json!({
        "success": true,
        "generated_content": { "ad_copies": ad_copies, "recommended": recommended },
        "metadata": template_metadata(&request),
    })))
}

/// POST /api/ai/generate-headlines
pub async fn handle_generate_headlines(
    _user: AuthUser,
    Json(request): Json<TemplateContentRequest>,
) -> Result<Json<Value>, AppError> {
    validate_template_request(&request)?;

    let headlines =
        templates::headlines(&request.product_name, request.target_audience.as_deref());
    let recommended = headlines[0].text.clone();

    Ok(Json(json!({
        "success": true,
        "generated_content": { "headlines": headlines, "recommended": recommended },
        "metadata": template_metadata(&request),
    })))
}

/// POST /api/ai/generate-descriptions
pub async fn handle_generate_descriptions(
    _user: AuthUser,
    Json(request): Json<TemplateContentRequest>,
) -> Result<Json<Value>, AppError> {
    validate_template_request(&request)?;

    let descriptions =
        templates::descriptions(&request.product_name, &request.product_description);
    let recommended = descriptions[0].text.clone();

    Ok(Json(json!({
        "success": true,
        "generated_content": { "descriptions": descriptions, "recommended": recommended },
        "metadata": template_metadata(&request),
    })))
}

/// POST /api/ai/generate-marketing-copy
pub async fn handle_generate_marketing_copy(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(request): Json<MarketingCopyRequest>,
) -> Result<Json<Value>, AppError> {
    validate_required(&[
        ("product_name", &request.product_name),
        ("target_audience", &request.target_audience),
    ])?;

    let provider = state.text_provider().ok_or(AppError::ProviderUnavailable)?;

    let prompt = prompts::marketing_copy_prompt(
        &request.product_name,
        &request.target_audience,
        &request.tone,
        &request.content_type,
        &request.key_benefits,
    );

    let text = provider
        .generate(
            &prompt,
            GenerationParams {
                max_output_tokens: request.max_tokens,
                temperature: 0.7,
            },
        )
        .await
        .map_err(|e| AppError::Provider(e.to_string()))?;

    Ok(Json(json!({
        "success": true,
        "marketing_copy": text,
        "metadata": {
            "product_name": request.product_name,
            "target_audience": request.target_audience,
            "tone": request.tone,
            "content_type": request.content_type,
            "key_benefits": request.key_benefits,
        }
    })))
}

/// POST /api/ai/generate-social-post
pub async fn handle_generate_social_post(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(request): Json<SocialPostRequest>,
) -> Result<Json<Value>, AppError> {
    if request.topic.trim().is_empty() {
        return Err(AppError::Validation("Topic is required".to_string()));
    }

    let provider = state.text_provider().ok_or(AppError::ProviderUnavailable)?;

    let prompt = prompts::social_post_prompt(
        &request.topic,
        &request.platform,
        &request.tone,
        request.include_hashtags,
        request.max_length,
    );

    // Rough chars-to-tokens estimate for the output budget
    let max_output_tokens = (request.max_length as f64 * 0.25).ceil() as u32;

    let text = provider
        .generate(
            &prompt,
            GenerationParams {
                max_output_tokens,
                temperature: 0.8,
            },
        )
        .await
        .map_err(|e| AppError::Provider(e.to_string()))?;

    let character_count = text.chars().count();

    Ok(Json(json!({
        "success": true,
        "social_post": text,
        "metadata": {
            "topic": request.topic,
            "platform": request.platform,
            "tone": request.tone,
            "include_hashtags": request.include_hashtags,
            "character_count": character_count,
        }
    })))
}

/// POST /api/ai/generate-email
pub async fn handle_generate_email(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(request): Json<EmailRequest>,
) -> Result<Json<Value>, AppError> {
    if request.subject.trim().is_empty() {
        return Err(AppError::Validation("Email subject is required".to_string()));
    }

    let provider = state.text_provider().ok_or(AppError::ProviderUnavailable)?;

    let prompt = prompts::email_prompt(
        &request.subject,
        &request.recipient_type,
        &request.goal,
        &request.tone,
        &request.key_points,
    );

    let text = provider
        .generate(
            &prompt,
            GenerationParams {
                max_output_tokens: 800,
                temperature: 0.7,
            },
        )
        .await
        .map_err(|e| AppError::Provider(e.to_string()))?;

    Ok(Json(json!({
        "success": true,
        "email_content": text,
        "metadata": {
            "subject": request.subject,
            "recipient_type": request.recipient_type,
            "goal": request.goal,
            "tone": request.tone,
            "key_points": request.key_points,
        }
    })))
}

/// POST /api/ai/summarize
pub async fn handle_summarize(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(request): Json<SummarizeRequest>,
) -> Result<Json<Value>, AppError> {
    if request.content.trim().is_empty() {
        return Err(AppError::Validation(
            "Content to summarize is required".to_string(),
        ));
    }

    let provider = state.text_provider().ok_or(AppError::ProviderUnavailable)?;

    let prompt = prompts::summarize_prompt(&request.content, request.max_length, &request.style);
    let max_output_tokens = (request.max_length as f64 * 1.5).ceil() as u32;

    let summary = provider
        .generate(
            &prompt,
            GenerationParams {
                max_output_tokens,
                temperature: 0.5,
            },
        )
        .await
        .map_err(|e| AppError::Provider(e.to_string()))?;

    Ok(Json(json!({
        "success": true,
        "summary": summary,
        "metadata": {
            "original_length": request.content.chars().count(),
            "summary_length": summary.chars().count(),
            "style": request.style,
            "max_length": request.max_length,
        }
    })))
}

/// POST /api/ai/generate-images
pub async fn handle_generate_images(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(request): Json<GenerateImagesRequest>,
) -> Result<Json<Value>, AppError> {
    validate_required(&[
        ("product_name", &request.product_name),
        ("product_description", &request.product_description),
        ("selected_tagline", &request.selected_tagline),
    ])?;

    let brief = ImageBrief {
        product_name: &request.product_name,
        product_description: &request.product_description,
        campaign_style: &request.campaign_style,
        selected_tagline: &request.selected_tagline,
        image_type: &request.image_type,
        product_type: request.product_type.as_deref(),
    };

    let outcome: ImageGenerationOutcome = generate_images(
        state.text_provider(),
        state.image_client(),
        &brief,
        state.config.ai_enhance_images,
    )
    .await;

    Ok(Json(json!({
        "success": true,
        "content_type": "images_only",
        "generated_content": { "message": "Images generated successfully" },
        "generated_images": outcome.generated_images,
        "processed_prompt": outcome.processed_prompt,
        "clipdrop": outcome.clipdrop,
        "clipdrop_error": outcome.clipdrop_error,
    })))
}

/// GET /api/ai/status
///
/// Reports which provider credentials are configured, without exposing them.
pub async fn handle_ai_status(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "gemini_available": state.text_provider.is_some(),
        "clipdrop_available": state.image_client.is_some(),
        "image_enhancement": state.config.ai_enhance_images,
        "image_generation": "ClipDrop API (primary) + placeholder SVG (fallback)",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Validation helpers
// ────────────────────────────────────────────────────────────────────────────

fn validate_required(fields: &[(&str, &str)]) -> Result<(), AppError> {
    for (name, value) in fields {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!("{name} is required")));
        }
    }
    Ok(())
}

fn validate_template_request(request: &TemplateContentRequest) -> Result<(), AppError> {
    validate_required(&[
        ("product_name", &request.product_name),
        ("product_description", &request.product_description),
        ("campaign_style", &request.campaign_style),
    ])
}

fn template_metadata(request: &TemplateContentRequest) -> Value {
    json!({
        "product_name": request.product_name,
        "product_description": request.product_description,
        "campaign_style": request.campaign_style,
        "target_audience": request.target_audience,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required_rejects_blank() {
        let err = validate_required(&[("product_name", "  ")]).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_validate_required_accepts_filled() {
        assert!(validate_required(&[("product_name", "Acme"), ("style", "bold")]).is_ok());
    }

    #[test]
    fn test_generate_text_request_defaults() {
        let request: GenerateTextRequest =
            serde_json::from_str(r#"{"prompt": "write a haiku"}"#).unwrap();
        assert_eq!(request.max_tokens, 1000);
        assert!((request.temperature - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn test_social_post_request_defaults() {
        let request: SocialPostRequest =
            serde_json::from_str(r#"{"topic": "product launch"}"#).unwrap();
        assert_eq!(request.platform, "general");
        assert!(request.include_hashtags);
        assert_eq!(request.max_length, 280);
    }
}
