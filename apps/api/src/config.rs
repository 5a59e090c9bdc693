use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Required variables fail startup; provider keys are optional so the
/// service stays usable in demo/offline mode.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    /// Gemini text-generation key. Absent → slogan generation serves
    /// deterministic fallback content; other AI endpoints return 503.
    pub gemini_api_key: Option<String>,
    /// ClipDrop text-to-image key. Absent → placeholder SVG images.
    pub clipdrop_api_key: Option<String>,
    /// When false, the image endpoint skips the prompt-enhancement pass.
    pub ai_enhance_images: bool,
    pub seed_sample_data: bool,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            jwt_secret: require_env("JWT_SECRET")?,
            gemini_api_key: optional_env("GOOGLE_GEMINI_API_KEY"),
            clipdrop_api_key: optional_env("CLIPDROP_API_KEY"),
            ai_enhance_images: std::env::var("AI_ENHANCE_IMAGES")
                .map(|v| v != "false")
                .unwrap_or(true),
            seed_sample_data: std::env::var("SEED_SAMPLE_DATA")
                .map(|v| v != "false")
                .unwrap_or(true),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Treats unset and empty values the same: an empty key is no key.
fn optional_env(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => Some(v),
        _ => None,
    }
}
