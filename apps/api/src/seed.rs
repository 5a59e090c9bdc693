//! Idempotent sample data for local development and demos.

use serde_json::json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::auth::password::hash_password;
use crate::errors::AppError;

const DEMO_EMAIL: &str = "john.doe@test.com";
const DEMO_PASSWORD: &str = "Test@123";

/// Inserts a demo user and one finished campaign if they do not already
/// exist. Safe to run on every startup.
pub async fn seed_sample_data(db: &PgPool) -> Result<(), AppError> {
    let existing = sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE email = $1")
        .bind(DEMO_EMAIL)
        .fetch_optional(db)
        .await?;

    let user_id = match existing {
        Some(id) => id,
        None => {
            let password_hash = hash_password(DEMO_PASSWORD)?;
            let id = sqlx::query_scalar::<_, Uuid>(
                r#"
                INSERT INTO users (id, first_name, last_name, email, password_hash, company_name)
                VALUES ($1, 'John', 'Doe', $2, $3, 'TechCorp Solutions')
                RETURNING id
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(DEMO_EMAIL)
            .bind(&password_hash)
            .fetch_one(db)
            .await?;
            info!("Seeded demo user {DEMO_EMAIL}");
            id
        }
    };

    let has_campaign = sqlx::query_scalar::<_, Uuid>(
        "SELECT id FROM campaigns WHERE user_id = $1 AND product_name = $2",
    )
    .bind(user_id)
    .bind("Smart Home Optimizer")
    .fetch_optional(db)
    .await?;

    if has_campaign.is_some() {
        return Ok(());
    }

    let recommended = "Empower Your Home, Optimize Your Savings.";
    let generated_content = json!({
        "slogans": [
            {
                "text": recommended,
                "explanation": "Auto-generated Professional tagline"
            },
            {
                "text": "Smart Living, Smarter Savings.",
                "explanation": "Auto-generated Professional tagline"
            },
            {
                "text": "Your Home, Intelligently Optimized.",
                "explanation": "Auto-generated Professional tagline"
            }
        ],
        "recommended": recommended,
    });

    sqlx::query(
        r#"
        INSERT INTO campaigns (
            id, user_id,
            first_name, last_name, email, company_name,
            product_name, product_type, product_description,
            campaign_style, generated_slogan, generated_content,
            status, budget, impressions, clicks, ctr
        )
        VALUES (
            $1, $2,
            'John', 'Doe', $3, 'TechCorp Solutions',
            'Smart Home Optimizer', 'SaaS/Software',
            'An AI-driven platform that learns household routines and trims energy waste automatically.',
            'Professional', $4, $5,
            'completed', 5000, 12500, 430, 3.44
        )
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(DEMO_EMAIL)
    .bind(recommended)
    .bind(&generated_content)
    .execute(db)
    .await?;

    info!("Seeded sample campaign for {DEMO_EMAIL}");
    Ok(())
}
