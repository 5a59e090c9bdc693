//! Slogan generation — the content pipeline behind campaign creation.
//!
//! Flow: availability check → prompt → provider call → strict/loose parse →
//! deterministic top-up → explanation attachment → result assembly.
//!
//! This operation never fails once its inputs are validated: provider and
//! parse failures degrade to canned content so the endpoint always returns
//! a usable result. The only caller-visible error is missing required
//! input, rejected by the handler before `generate_slogans` runs.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::ai_client::{GenerationParams, TextGenerator};
use crate::content::fallback::{
    default_recommended, offline_items, top_up_taglines,
};
use crate::content::parse::parse_taglines;
use crate::content::prompts::slogan_prompt;

/// Slogans per result. Fixed by product contract.
pub const SLOGAN_COUNT: usize = 5;
/// Word cap for a single tagline.
pub const MAX_TAGLINE_WORDS: usize = 8;

const DEFAULT_MAX_TOKENS: u32 = 1000;
const SLOGAN_TEMPERATURE: f32 = 0.7;

/// Validated input for one generation run. Constructed per request,
/// never persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct SloganRequest {
    pub product_name: String,
    pub product_description: String,
    pub campaign_style: String,
    #[serde(default)]
    pub target_audience: Option<String>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

/// One generated marketing string with its explanatory label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedItem {
    pub text: String,
    pub explanation: String,
}

/// Exactly `SLOGAN_COUNT` items; `recommended` equals the first item's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SloganSet {
    pub slogans: Vec<GeneratedItem>,
    pub recommended: String,
}

/// Runs the full slogan pipeline. Infallible by design: any provider or
/// parse failure yields the deterministic offline set instead.
pub async fn generate_slogans(
    provider: Option<&dyn TextGenerator>,
    request: &SloganRequest,
) -> SloganSet {
    let Some(provider) = provider else {
        info!(
            "No text provider configured, serving offline slogans for {}",
            request.product_name
        );
        return offline_set(&request.product_name, &request.campaign_style);
    };

    let prompt = slogan_prompt(
        &request.product_name,
        &request.product_description,
        &request.campaign_style,
        request.target_audience.as_deref(),
        SLOGAN_COUNT,
        MAX_TAGLINE_WORDS,
    );

    let params = GenerationParams {
        max_output_tokens: request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        temperature: SLOGAN_TEMPERATURE,
    };

    let raw = match provider.generate(&prompt, params).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Slogan generation call failed, serving offline set: {e}");
            return offline_set(&request.product_name, &request.campaign_style);
        }
    };

    let mut taglines = parse_taglines(&raw, SLOGAN_COUNT, MAX_TAGLINE_WORDS).into_items();

    // Parsed items stay in front; synthesized ones only pad the tail.
    if taglines.len() < SLOGAN_COUNT {
        taglines.extend(top_up_taglines(&request.product_name));
        taglines.truncate(SLOGAN_COUNT);
    }

    let slogans: Vec<GeneratedItem> = taglines
        .into_iter()
        .map(|text| GeneratedItem {
            text,
            explanation: format!("Auto-generated {} tagline", request.campaign_style),
        })
        .collect();

    let recommended = slogans
        .first()
        .map(|item| item.text.clone())
        .unwrap_or_else(|| default_recommended(&request.product_name));

    SloganSet {
        slogans,
        recommended,
    }
}

/// Builds a complete result from the offline set, recovering identifying
/// fields best-effort. Used for both the unconfigured-provider path and the
/// total-failure path.
pub fn offline_set(product_name: &str, campaign_style: &str) -> SloganSet {
    let product_name = non_empty_or(product_name, "Your Product");
    let campaign_style = non_empty_or(campaign_style, "professional");

    let slogans = offline_items(product_name, campaign_style);
    let recommended = slogans
        .first()
        .map(|item| item.text.clone())
        .unwrap_or_else(|| default_recommended(product_name));

    SloganSet {
        slogans,
        recommended,
    }
}

fn non_empty_or<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.trim().is_empty() {
        default
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai_client::AiError;
    use async_trait::async_trait;

    /// Mock provider returning a fixed response.
    struct FixedProvider(String);

    #[async_trait]
    impl TextGenerator for FixedProvider {
        async fn generate(&self, _: &str, _: GenerationParams) -> Result<String, AiError> {
            Ok(self.0.clone())
        }
    }

    /// Mock provider that always fails.
    struct FailingProvider;

    #[async_trait]
    impl TextGenerator for FailingProvider {
        async fn generate(&self, _: &str, _: GenerationParams) -> Result<String, AiError> {
            Err(AiError::Api {
                status: 500,
                message: "boom".to_string(),
            })
        }
    }

    fn acme_request() -> SloganRequest {
        SloganRequest {
            product_name: "Acme".to_string(),
            product_description: "Rocket-powered roller skates".to_string(),
            campaign_style: "professional".to_string(),
            target_audience: None,
            max_tokens: None,
        }
    }

    #[tokio::test]
    async fn test_strict_json_success_preserves_order() {
        let provider =
            FixedProvider(r#"["Go faster", "Save more", "Think smart", "Act now", "Win big"]"#.to_string());
        let result = generate_slogans(Some(&provider), &acme_request()).await;

        assert_eq!(result.slogans.len(), 5);
        let texts: Vec<&str> = result.slogans.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["Go faster", "Save more", "Think smart", "Act now", "Win big"]);
        assert_eq!(result.recommended, "Go faster");
        for item in &result.slogans {
            assert_eq!(item.explanation, "Auto-generated professional tagline");
        }
    }

    #[tokio::test]
    async fn test_malformed_output_tops_up_with_templates() {
        let provider = FixedProvider("Go faster\nJSON\nSave more".to_string());
        let result = generate_slogans(Some(&provider), &acme_request()).await;

        assert_eq!(result.slogans.len(), 5);
        assert_eq!(result.slogans[0].text, "Go faster");
        assert_eq!(result.slogans[1].text, "Save more");
        for synthesized in &result.slogans[2..] {
            assert!(
                synthesized.text.contains("Acme"),
                "top-up template missing product name: {}",
                synthesized.text
            );
        }
        assert_eq!(result.recommended, "Go faster");
    }

    #[tokio::test]
    async fn test_provider_error_yields_fallback_set() {
        let result = generate_slogans(Some(&FailingProvider), &acme_request()).await;

        assert_eq!(result.slogans.len(), 5);
        for item in &result.slogans {
            assert_eq!(item.explanation, "Fallback professional tagline");
        }
        assert_eq!(result.recommended, result.slogans[0].text);
    }

    #[tokio::test]
    async fn test_no_provider_is_deterministic() {
        let first = generate_slogans(None, &acme_request()).await;
        let second = generate_slogans(None, &acme_request()).await;
        assert_eq!(first, second);
        assert_eq!(first.slogans.len(), 5);
    }

    #[tokio::test]
    async fn test_cardinality_is_always_five() {
        for raw in [
            "".to_string(),
            "One usable line".to_string(),
            r#"["only one real tagline"]"#.to_string(),
            "complete nonsense } { null".to_string(),
        ] {
            let provider = FixedProvider(raw.clone());
            let result = generate_slogans(Some(&provider), &acme_request()).await;
            assert_eq!(result.slogans.len(), 5, "raw = {raw:?}");
        }
    }

    #[tokio::test]
    async fn test_recommended_always_equals_first_item() {
        let cases = [
            r#"["Go faster", "Save more"]"#,
            "nothing parseable }",
            "Line one works fine\nLine two works too",
        ];
        for raw in cases {
            let provider = FixedProvider(raw.to_string());
            let result = generate_slogans(Some(&provider), &acme_request()).await;
            assert_eq!(result.recommended, result.slogans[0].text, "raw = {raw:?}");
        }
    }

    #[tokio::test]
    async fn test_reserved_tokens_never_become_slogans() {
        let provider = FixedProvider("null\nJSON\n{\nundefined\nerror".to_string());
        let result = generate_slogans(Some(&provider), &acme_request()).await;
        for item in &result.slogans {
            let lower = item.text.to_lowercase();
            assert!(!["null", "json", "{", "undefined", "error"].contains(&lower.as_str()));
        }
    }

    #[tokio::test]
    async fn test_heuristic_items_respect_word_cap() {
        let provider = FixedProvider(
            "Way too many words in this line to ever pass the filter here\nTight and punchy"
                .to_string(),
        );
        let result = generate_slogans(Some(&provider), &acme_request()).await;
        assert_eq!(result.slogans[0].text, "Tight and punchy");
    }

    #[test]
    fn test_offline_set_recovers_missing_fields() {
        let set = offline_set("", "");
        assert!(set.slogans[0].text.contains("Your Product"));
        assert_eq!(set.slogans[0].explanation, "Fallback professional tagline");
    }
}
