//! Prompt construction for the provider-backed content endpoints.

/// Prompt for slogan generation. Instructs the model to return a bare JSON
/// array of strings; parsing still tolerates prose (see `parse`).
pub fn slogan_prompt(
    product_name: &str,
    product_description: &str,
    campaign_style: &str,
    target_audience: Option<&str>,
    max_items: usize,
    max_words: usize,
) -> String {
    let style = campaign_style.replace('_', " ");
    let audience_part = match target_audience {
        Some(audience) if !audience.trim().is_empty() => {
            format!("Target audience: {audience}.\n")
        }
        _ => String::new(),
    };

    format!(
        "Generate exactly {max_items} concise marketing taglines (each <= {max_words} words) for a campaign.\n\
        Product: {product_name}. Description: {product_description}. Style: {style}.\n\
        {audience_part}\
        Return ONLY a valid JSON array of strings like [\"tagline1\", \"tagline2\"]\n\
        with no additional text, explanations, or formatting."
    )
}

/// Prompt for free-form marketing copy.
pub fn marketing_copy_prompt(
    product_name: &str,
    target_audience: &str,
    tone: &str,
    content_type: &str,
    key_benefits: &[String],
) -> String {
    let benefits_part = if key_benefits.is_empty() {
        String::new()
    } else {
        format!("Key benefits: {}.\n", key_benefits.join(", "))
    };

    format!(
        "Generate engaging marketing copy for \"{product_name}\" targeting {target_audience}.\n\
        Use a {tone} tone of voice.\n\
        Content type: {content_type}.\n\
        {benefits_part}\
        Create compelling, persuasive copy that highlights the value proposition and encourages action."
    )
}

/// Prompt for a social media post, with a platform-specific clause.
pub fn social_post_prompt(
    topic: &str,
    platform: &str,
    tone: &str,
    include_hashtags: bool,
    max_length: u32,
) -> String {
    let platform_part = match platform.to_lowercase().as_str() {
        "twitter" | "x" => "Keep it under 280 characters, make it punchy and engaging.",
        "linkedin" => "Make it professional yet engaging, suitable for business networking.",
        "instagram" => "Make it visually descriptive and engaging, suitable for image captions.",
        "facebook" => "Make it conversational and community-oriented.",
        _ => "Make it engaging and suitable for social media.",
    };

    let hashtag_part = if include_hashtags {
        "Include 3-5 relevant hashtags at the end."
    } else {
        "Do not include hashtags."
    };

    format!(
        "Generate a social media post about: \"{topic}\".\n\
        Platform: {platform}\n\
        Tone: {tone}\n\
        {platform_part}\n\
        {hashtag_part}\n\
        Keep the length appropriate for the platform (max {max_length} characters)."
    )
}

/// Prompt for structured marketing email content.
pub fn email_prompt(
    subject: &str,
    recipient_type: &str,
    goal: &str,
    tone: &str,
    key_points: &[String],
) -> String {
    let points_part = if key_points.is_empty() {
        String::new()
    } else {
        format!("Key points to include: {}.\n", key_points.join(", "))
    };

    format!(
        "Generate a professional email with the subject: \"{subject}\".\n\
        Recipient type: {recipient_type}\n\
        Goal: {goal}\n\
        Tone: {tone}\n\
        {points_part}\
        Structure the email with:\n\
        1. A compelling subject line\n\
        2. A personalized greeting\n\
        3. An engaging introduction\n\
        4. The main content body\n\
        5. A clear call-to-action\n\
        6. A professional sign-off\n\n\
        Keep it concise but impactful."
    )
}

/// Prompt for content summarization.
pub fn summarize_prompt(content: &str, max_length: u32, style: &str) -> String {
    format!(
        "Please summarize the following content in a {style} style, keeping it under {max_length} words:\n\n\
        \"{content}\"\n\n\
        Focus on the key points and main ideas. Make it clear and engaging."
    )
}

/// Prompt asking the text model to compress an image brief into short
/// comma-separated tokens for the text-to-image API.
pub fn image_enhancement_prompt(
    product_name: &str,
    product_type: Option<&str>,
    product_description: &str,
    campaign_style: &str,
    selected_tagline: &str,
    image_type: &str,
) -> String {
    let product_type = product_type.unwrap_or("software/service");
    format!(
        "You are optimizing a prompt for a text-to-image API.\n\
        Return a single, comma-separated prompt with short tokens only (no sentences), \
        max 300 characters, no quotes, no line breaks.\n\
        Include: subject, key visual cues, composition, lighting, quality tokens, \
        style tokens for {campaign_style}, and the tagline as a short token.\n\
        Context: product={product_name}; type={product_type}; tagline={selected_tagline}; \
        brief={product_description}; image_type={image_type}.\n\
        Example output format: modern SaaS dashboard, KPI charts, world map heatpoints, \
        soft diffused light, 4k, ultra-detailed, minimal, creative style, tagline: Smarter ads bigger impact"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slogan_prompt_embeds_fields_and_replaces_underscores() {
        let prompt = slogan_prompt("Acme", "Rocket skates", "bold_edgy", None, 5, 8);
        assert!(prompt.contains("exactly 5"));
        assert!(prompt.contains("<= 8 words"));
        assert!(prompt.contains("Product: Acme."));
        assert!(prompt.contains("Style: bold edgy."));
        assert!(prompt.contains("JSON array"));
        assert!(!prompt.contains("Target audience"));
    }

    #[test]
    fn test_slogan_prompt_includes_audience_only_when_present() {
        let with = slogan_prompt("Acme", "d", "professional", Some("coyotes"), 5, 8);
        assert!(with.contains("Target audience: coyotes."));

        let blank = slogan_prompt("Acme", "d", "professional", Some("   "), 5, 8);
        assert!(!blank.contains("Target audience"));
    }

    #[test]
    fn test_social_post_prompt_platform_clauses() {
        let tw = social_post_prompt("launch", "Twitter", "engaging", true, 280);
        assert!(tw.contains("under 280 characters"));
        assert!(tw.contains("3-5 relevant hashtags"));

        let generic = social_post_prompt("launch", "mastodon", "engaging", false, 500);
        assert!(generic.contains("suitable for social media"));
        assert!(generic.contains("Do not include hashtags"));
    }

    #[test]
    fn test_email_prompt_key_points_optional() {
        let without = email_prompt("Hello", "customer", "inform", "professional", &[]);
        assert!(!without.contains("Key points"));

        let points = vec!["fast".to_string(), "cheap".to_string()];
        let with = email_prompt("Hello", "customer", "inform", "professional", &points);
        assert!(with.contains("Key points to include: fast, cheap."));
    }
}
