//! Marketing image generation.
//!
//! Pipeline: optional prompt enhancement through the text provider →
//! ClipDrop text-to-image when configured → inline SVG placeholder when no
//! image could be produced. The endpoint degrades instead of failing: a
//! placeholder data URL is always available.

use base64::Engine;
use serde::Serialize;
use tracing::{info, warn};

use crate::ai_client::clipdrop::{ClipDropClient, ClipDropMeta};
use crate::ai_client::{GenerationParams, TextGenerator};
use crate::content::prompts::image_enhancement_prompt;

/// Enhanced prompts are clamped to this many characters.
const MAX_ENHANCED_PROMPT_CHARS: usize = 300;

#[derive(Debug, Clone, Serialize)]
pub struct ImageGenerationOutcome {
    pub generated_images: Vec<String>,
    pub processed_prompt: Option<String>,
    pub clipdrop: Option<ClipDropMeta>,
    pub clipdrop_error: Option<String>,
}

pub struct ImageBrief<'a> {
    pub product_name: &'a str,
    pub product_description: &'a str,
    pub campaign_style: &'a str,
    pub selected_tagline: &'a str,
    pub image_type: &'a str,
    pub product_type: Option<&'a str>,
}

/// Runs the image pipeline. `text_provider` is only consulted when
/// `enhance` is set; its failures are logged and ignored.
pub async fn generate_images(
    text_provider: Option<&dyn TextGenerator>,
    image_client: Option<&ClipDropClient>,
    brief: &ImageBrief<'_>,
    enhance: bool,
) -> ImageGenerationOutcome {
    let processed_prompt = if enhance {
        match text_provider {
            Some(provider) => enhance_prompt(provider, brief).await,
            None => None,
        }
    } else {
        None
    };

    let final_prompt = processed_prompt
        .clone()
        .unwrap_or_else(|| compact_prompt(brief));

    let mut generated_images = Vec::new();
    let mut clipdrop_meta = None;
    let mut clipdrop_error = None;

    if let Some(client) = image_client {
        info!("Calling ClipDrop text-to-image API");
        match client.text_to_image(&final_prompt).await {
            Ok((data_url, meta)) => {
                generated_images.push(data_url);
                clipdrop_meta = Some(meta);
            }
            Err(e) => {
                warn!("ClipDrop call failed: {e}");
                clipdrop_error = Some(e.to_string());
            }
        }
    }

    if generated_images.is_empty() {
        info!("Falling back to placeholder SVG");
        generated_images.push(placeholder_svg_data_url(
            brief.product_name,
            brief.campaign_style,
            brief.selected_tagline,
        ));
    }

    ImageGenerationOutcome {
        generated_images,
        processed_prompt,
        clipdrop: clipdrop_meta,
        clipdrop_error,
    }
}

/// Asks the text provider to compress the brief into comma-separated image
/// tokens. Output is flattened to one line, stripped of quotes and a
/// leading "json" marker, and clamped to 300 chars.
async fn enhance_prompt(
    provider: &dyn TextGenerator,
    brief: &ImageBrief<'_>,
) -> Option<String> {
    let prompt = image_enhancement_prompt(
        brief.product_name,
        brief.product_type,
        brief.product_description,
        brief.campaign_style,
        brief.selected_tagline,
        brief.image_type,
    );

    let params = GenerationParams {
        max_output_tokens: 120,
        temperature: 0.2,
    };

    match provider.generate(&prompt, params).await {
        Ok(raw) => {
            let cleaned = clean_enhanced_prompt(&raw);
            if cleaned.is_empty() {
                None
            } else {
                info!("Enhanced image prompt: {}", excerpt_for_log(&cleaned));
                Some(cleaned)
            }
        }
        Err(e) => {
            warn!("Prompt enhancement failed, using compact prompt: {e}");
            None
        }
    }
}

fn clean_enhanced_prompt(raw: &str) -> String {
    let first_line = raw.lines().next().unwrap_or("").trim();
    let stripped: String = first_line
        .chars()
        .filter(|c| !matches!(c, '`' | '"' | '\''))
        .collect();
    let stripped = stripped.trim();
    let without_marker = match stripped.get(..4) {
        Some(prefix) if prefix.eq_ignore_ascii_case("json") => stripped[4..].trim_start(),
        _ => stripped,
    };

    // Collapse runs of whitespace, then turn sentence periods into commas
    // to keep the token-list shape the image API expects.
    let collapsed = without_marker.split_whitespace().collect::<Vec<_>>().join(" ");
    let comma_form = collapsed.replace(". ", ", ").trim_end_matches('.').to_string();

    comma_form.chars().take(MAX_ENHANCED_PROMPT_CHARS).collect()
}

/// Deterministic compact prompt used when enhancement is off or failed.
fn compact_prompt(brief: &ImageBrief<'_>) -> String {
    let mut parts: Vec<String> = vec![
        brief.product_type.unwrap_or("SaaS").to_string(),
        brief.image_type.to_string(),
        brief.product_name.to_string(),
        "marketing image".to_string(),
        brief.campaign_style.to_string(),
        "clean minimal".to_string(),
        "soft diffused light".to_string(),
        "4k, ultra-detailed".to_string(),
    ];
    if !brief.selected_tagline.trim().is_empty() {
        parts.push(format!("tagline: {}", brief.selected_tagline));
    }
    parts.retain(|p| !p.trim().is_empty());
    parts.join(", ")
}

/// Branded placeholder returned when no real image was generated.
fn placeholder_svg_data_url(product_name: &str, campaign_style: &str, tagline: &str) -> String {
    let svg = format!(
        r##"<svg width="512" height="512" xmlns="http://www.w3.org/2000/svg">
  <rect width="512" height="512" fill="#f8fafc"/>
  <rect x="40" y="40" width="432" height="432" rx="24" fill="#ffffff" stroke="#cbd5e1" stroke-width="2"/>
  <circle cx="256" cy="180" r="40" fill="#3b82f6" opacity="0.8"/>
  <text x="256" y="350" font-family="system-ui" font-size="18" font-weight="600" text-anchor="middle" fill="#1e293b">{product_name}</text>
  <text x="256" y="380" font-family="system-ui" font-size="12" text-anchor="middle" fill="#64748b">{style} STYLE</text>
  <text x="256" y="410" font-family="system-ui" font-size="10" text-anchor="middle" fill="#94a3b8">{tagline}</text>
</svg>"##,
        product_name = xml_escape(product_name),
        style = xml_escape(&campaign_style.to_uppercase()),
        tagline = xml_escape(tagline),
    );

    let encoded = base64::engine::general_purpose::STANDARD.encode(svg.as_bytes());
    format!("data:image/svg+xml;base64,{encoded}")
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn excerpt_for_log(s: &str) -> String {
    s.chars().take(100).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai_client::AiError;
    use async_trait::async_trait;

    struct FixedProvider(String);

    #[async_trait]
    impl TextGenerator for FixedProvider {
        async fn generate(&self, _: &str, _: GenerationParams) -> Result<String, AiError> {
            Ok(self.0.clone())
        }
    }

    fn brief<'a>() -> ImageBrief<'a> {
        ImageBrief {
            product_name: "Acme",
            product_description: "Rocket skates",
            campaign_style: "creative",
            selected_tagline: "Go faster",
            image_type: "product_mockup",
            product_type: None,
        }
    }

    #[test]
    fn test_clean_enhanced_prompt_single_line_no_quotes() {
        let raw = "json \"modern dashboard, KPI charts\"\nsecond line ignored";
        let cleaned = clean_enhanced_prompt(raw);
        assert_eq!(cleaned, "modern dashboard, KPI charts");
    }

    #[test]
    fn test_clean_enhanced_prompt_clamps_length() {
        let raw = "tok, ".repeat(200);
        let cleaned = clean_enhanced_prompt(&raw);
        assert!(cleaned.chars().count() <= 300);
    }

    #[test]
    fn test_clean_enhanced_prompt_periods_become_commas() {
        let cleaned = clean_enhanced_prompt("sleek device. studio light. 4k.");
        assert_eq!(cleaned, "sleek device, studio light, 4k");
    }

    #[test]
    fn test_compact_prompt_contains_core_tokens() {
        let p = compact_prompt(&brief());
        assert!(p.starts_with("SaaS, product_mockup, Acme"));
        assert!(p.ends_with("tagline: Go faster"));
    }

    #[test]
    fn test_compact_prompt_omits_blank_tagline() {
        let mut b = brief();
        b.selected_tagline = " ";
        assert!(!compact_prompt(&b).contains("tagline:"));
    }

    #[test]
    fn test_placeholder_svg_is_data_url_with_product() {
        let url = placeholder_svg_data_url("Acme", "creative", "Go faster");
        assert!(url.starts_with("data:image/svg+xml;base64,"));
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(url.trim_start_matches("data:image/svg+xml;base64,"))
            .unwrap();
        let svg = String::from_utf8(decoded).unwrap();
        assert!(svg.contains("Acme"));
        assert!(svg.contains("CREATIVE STYLE"));
    }

    #[tokio::test]
    async fn test_no_clients_yields_placeholder() {
        let outcome = generate_images(None, None, &brief(), true).await;
        assert_eq!(outcome.generated_images.len(), 1);
        assert!(outcome.generated_images[0].starts_with("data:image/svg+xml"));
        assert!(outcome.processed_prompt.is_none());
        assert!(outcome.clipdrop.is_none());
    }

    #[tokio::test]
    async fn test_enhancement_used_when_available() {
        let provider = FixedProvider("minimal hero shot, soft light".to_string());
        let outcome = generate_images(Some(&provider), None, &brief(), true).await;
        assert_eq!(
            outcome.processed_prompt.as_deref(),
            Some("minimal hero shot, soft light")
        );
    }

    #[tokio::test]
    async fn test_enhancement_skipped_when_disabled() {
        let provider = FixedProvider("should not be used".to_string());
        let outcome = generate_images(Some(&provider), None, &brief(), false).await;
        assert!(outcome.processed_prompt.is_none());
    }
}
