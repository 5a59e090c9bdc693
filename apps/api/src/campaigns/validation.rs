//! Field validation for campaign create/update payloads.

use crate::errors::AppError;
use crate::models::campaign::{CAMPAIGN_STATUSES, CAMPAIGN_STYLES, PRODUCT_TYPES};

pub fn validate_product_name(value: &str) -> Result<(), AppError> {
    let len = value.trim().chars().count();
    if !(1..=100).contains(&len) {
        return Err(AppError::Validation(
            "product_name must be between 1 and 100 characters".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_product_description(value: &str) -> Result<(), AppError> {
    let len = value.trim().chars().count();
    if !(10..=1000).contains(&len) {
        return Err(AppError::Validation(
            "product_description must be between 10 and 1000 characters".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_product_type(value: &str) -> Result<(), AppError> {
    if !PRODUCT_TYPES.contains(&value) {
        return Err(AppError::Validation(format!(
            "product_type must be one of: {}",
            PRODUCT_TYPES.join(", ")
        )));
    }
    Ok(())
}

pub fn validate_campaign_style(value: &str) -> Result<(), AppError> {
    if !CAMPAIGN_STYLES.contains(&value) {
        return Err(AppError::Validation(format!(
            "campaign_style must be one of: {}",
            CAMPAIGN_STYLES.join(", ")
        )));
    }
    Ok(())
}

pub fn validate_status(value: &str) -> Result<(), AppError> {
    if !CAMPAIGN_STATUSES.contains(&value) {
        return Err(AppError::Validation(format!(
            "Status must be one of: {}",
            CAMPAIGN_STATUSES.join(", ")
        )));
    }
    Ok(())
}

pub fn validate_budget(value: Option<f64>) -> Result<(), AppError> {
    if let Some(budget) = value {
        if !budget.is_finite() || budget <= 0.0 {
            return Err(AppError::Validation(
                "budget must be a positive number".to_string(),
            ));
        }
    }
    Ok(())
}

/// Click-through rate as a percentage.
pub fn compute_ctr(impressions: i32, clicks: i32) -> f64 {
    if impressions > 0 {
        (clicks as f64 / impressions as f64) * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_type_enumeration() {
        assert!(validate_product_type("SaaS/Software").is_ok());
        assert!(validate_product_type("Groceries").is_err());
    }

    #[test]
    fn test_campaign_style_enumeration() {
        assert!(validate_campaign_style("Bold & Edgy").is_ok());
        assert!(validate_campaign_style("bold & edgy").is_err());
    }

    #[test]
    fn test_status_enumeration() {
        assert!(validate_status("paused").is_ok());
        assert!(validate_status("archived").is_err());
    }

    #[test]
    fn test_description_bounds() {
        assert!(validate_product_description("long enough text").is_ok());
        assert!(validate_product_description("too short").is_err());
        assert!(validate_product_description(&"x".repeat(1001)).is_err());
    }

    #[test]
    fn test_budget_must_be_positive() {
        assert!(validate_budget(None).is_ok());
        assert!(validate_budget(Some(100.0)).is_ok());
        assert!(validate_budget(Some(0.0)).is_err());
        assert!(validate_budget(Some(-5.0)).is_err());
        assert!(validate_budget(Some(f64::NAN)).is_err());
    }

    #[test]
    fn test_ctr_computation() {
        assert_eq!(compute_ctr(0, 10), 0.0);
        assert_eq!(compute_ctr(200, 10), 5.0);
        assert_eq!(compute_ctr(100, 0), 0.0);
    }
}
