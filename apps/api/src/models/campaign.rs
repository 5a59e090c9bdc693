use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Allowed product types for a campaign.
pub const PRODUCT_TYPES: [&str; 5] = [
    "Physical Product",
    "Digital Product",
    "Service",
    "SaaS/Software",
    "Other",
];

/// Allowed campaign styles.
pub const CAMPAIGN_STYLES: [&str; 5] = [
    "Professional",
    "Creative",
    "Minimalist",
    "Bold & Edgy",
    "Playful",
];

/// Allowed lifecycle statuses.
pub const CAMPAIGN_STATUSES: [&str; 5] = ["draft", "active", "paused", "completed", "cancelled"];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CampaignRow {
    pub id: Uuid,
    pub user_id: Uuid,
    // Contact snapshot captured at creation time
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company_name: String,
    // Product
    pub product_name: String,
    pub product_type: String,
    pub product_description: String,
    // Campaign
    pub campaign_style: String,
    pub current_slogan: Option<String>,
    pub generated_slogan: Option<String>,
    pub generated_content: Option<Value>,
    pub status: String,
    pub budget: Option<f64>,
    // Analytics
    pub impressions: i32,
    pub clicks: i32,
    pub ctr: f64,
    /// JSON array of attached image descriptors, newest first.
    pub uploaded_files: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_set_matches_lifecycle() {
        assert!(CAMPAIGN_STATUSES.contains(&"draft"));
        assert!(CAMPAIGN_STATUSES.contains(&"cancelled"));
        assert_eq!(CAMPAIGN_STATUSES.len(), 5);
    }
}
