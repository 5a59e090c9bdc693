pub mod health;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::auth::handlers as auth;
use crate::campaigns::handlers as campaigns;
use crate::content::handlers as ai;
use crate::state::AppState;
use crate::users::handlers as users;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/api/auth/register", post(auth::handle_register))
        .route("/api/auth/login", post(auth::handle_login))
        .route("/api/auth/demo-login", post(auth::handle_demo_login))
        .route("/api/auth/profile", get(auth::handle_profile))
        .route("/api/auth/refresh", post(auth::handle_refresh))
        // Users
        .route("/api/users", get(users::handle_list_users))
        .route(
            "/api/users/profile",
            get(users::handle_get_profile).put(users::handle_update_profile),
        )
        .route(
            "/api/users/change-password",
            post(users::handle_change_password),
        )
        // Campaigns
        .route(
            "/api/campaigns",
            get(campaigns::handle_list_campaigns).post(campaigns::handle_create_campaign),
        )
        .route(
            "/api/campaigns/create",
            post(campaigns::handle_quick_create_campaign),
        )
        // Static segments must be registered before "/:id" siblings that
        // would otherwise capture them.
        .route(
            "/api/campaigns/analytics",
            get(campaigns::handle_analytics_by_email),
        )
        .route(
            "/api/campaigns/analytics/user",
            get(campaigns::handle_user_analytics),
        )
        .route(
            "/api/campaigns/by-email",
            get(campaigns::handle_campaigns_by_email),
        )
        .route(
            "/api/campaigns/:id",
            get(campaigns::handle_get_campaign)
                .put(campaigns::handle_update_campaign)
                .delete(campaigns::handle_delete_campaign),
        )
        .route(
            "/api/campaigns/:id/status",
            patch(campaigns::handle_update_status),
        )
        .route(
            "/api/campaigns/:id/analytics",
            patch(campaigns::handle_update_analytics),
        )
        .route(
            "/api/campaigns/:id/images",
            post(campaigns::handle_attach_image),
        )
        .route(
            "/api/campaigns/:id/images/:file_id",
            delete(campaigns::handle_detach_image),
        )
        // AI content generation
        .route("/api/ai/generate-text", post(ai::handle_generate_text))
        .route(
            "/api/ai/generate-slogans",
            post(ai::handle_generate_slogans),
        )
        .route("/api/ai/generate-ad-copy", post(ai::handle_generate_ad_copy))
        .route(
            "/api/ai/generate-headlines",
            post(ai::handle_generate_headlines),
        )
        .route(
            "/api/ai/generate-descriptions",
            post(ai::handle_generate_descriptions),
        )
        .route(
            "/api/ai/generate-marketing-copy",
            post(ai::handle_generate_marketing_copy),
        )
        .route(
            "/api/ai/generate-social-post",
            post(ai::handle_generate_social_post),
        )
        .route("/api/ai/generate-email", post(ai::handle_generate_email))
        .route("/api/ai/summarize", post(ai::handle_summarize))
        .route(
            "/api/ai/generate-images",
            post(ai::handle_generate_images),
        )
        .route("/api/ai/status", get(ai::handle_ai_status))
        .with_state(state)
}
