//! Deterministic template content for ad copy, headlines, and product
//! descriptions. No provider call: these variants are assembled from the
//! campaign fields, with description excerpts truncated to keep copy short.

use super::slogans::GeneratedItem;

/// Char-safe prefix of `s`, with an ellipsis marker when truncated.
fn excerpt(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_chars).collect();
        format!("{cut}...")
    }
}

pub fn ad_copies(
    product_name: &str,
    product_description: &str,
    target_audience: Option<&str>,
) -> Vec<GeneratedItem> {
    let mut copies = vec![
        GeneratedItem {
            text: format!(
                "Discover {product_name} - the revolutionary solution that's changing the game. {}",
                excerpt(product_description, 100)
            ),
            explanation: "Focuses on discovery and innovation".to_string(),
        },
        GeneratedItem {
            text: format!(
                "Ready to transform your business? {product_name} delivers results that matter. {}",
                excerpt(product_description, 80)
            ),
            explanation: "Emphasizes transformation and results".to_string(),
        },
        GeneratedItem {
            text: format!(
                "Join thousands who trust {product_name} for their success. {}",
                excerpt(product_description, 90)
            ),
            explanation: "Uses social proof and trust".to_string(),
        },
    ];

    if let Some(audience) = target_audience.filter(|a| !a.trim().is_empty()) {
        copies.push(GeneratedItem {
            text: format!(
                "Perfect for {audience}: {product_name} delivers exactly what you need. {}",
                excerpt(product_description, 70)
            ),
            explanation: format!("Targets {audience} specifically"),
        });
    }

    copies
}

pub fn headlines(product_name: &str, target_audience: Option<&str>) -> Vec<GeneratedItem> {
    let mut headlines = vec![
        GeneratedItem {
            text: format!("Introducing {product_name}: The Future is Here"),
            explanation: "Creates excitement and forward-thinking".to_string(),
        },
        GeneratedItem {
            text: format!("Why {product_name} is the Choice of Professionals"),
            explanation: "Appeals to professional credibility".to_string(),
        },
        GeneratedItem {
            text: format!("Get More Done with {product_name}"),
            explanation: "Focuses on productivity and efficiency".to_string(),
        },
    ];

    if let Some(audience) = target_audience.filter(|a| !a.trim().is_empty()) {
        headlines.push(GeneratedItem {
            text: format!("{audience} Love {product_name} - Here's Why"),
            explanation: format!("Directly addresses {audience}"),
        });
    }

    headlines
}

pub fn descriptions(product_name: &str, product_description: &str) -> Vec<GeneratedItem> {
    vec![
        GeneratedItem {
            text: format!(
                "{product_name} is a cutting-edge solution designed to deliver exceptional results. {product_description}"
            ),
            explanation: "Comprehensive and detailed description".to_string(),
        },
        GeneratedItem {
            text: format!(
                "Experience the power of {product_name}. {}",
                excerpt(product_description, 150)
            ),
            explanation: "Focuses on experience and benefits".to_string(),
        },
        GeneratedItem {
            text: format!(
                "{product_name} combines innovation with reliability to provide the perfect solution for your needs. {}",
                excerpt(product_description, 120)
            ),
            explanation: "Emphasizes innovation and reliability".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ad_copies_three_without_audience() {
        let copies = ad_copies("Acme", "A description of sufficient length", None);
        assert_eq!(copies.len(), 3);
    }

    #[test]
    fn test_ad_copies_audience_variant_appended_last() {
        let copies = ad_copies("Acme", "desc here", Some("developers"));
        assert_eq!(copies.len(), 4);
        assert!(copies[3].text.contains("Perfect for developers"));
        assert_eq!(copies[3].explanation, "Targets developers specifically");
    }

    #[test]
    fn test_blank_audience_is_ignored() {
        assert_eq!(ad_copies("Acme", "desc", Some("  ")).len(), 3);
        assert_eq!(headlines("Acme", Some("")).len(), 3);
    }

    #[test]
    fn test_excerpt_truncates_on_char_boundary() {
        // Multibyte input must not panic or split a codepoint
        let s = "héllo wörld ".repeat(20);
        let out = excerpt(&s, 100);
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), 103);
    }

    #[test]
    fn test_excerpt_short_input_untouched() {
        assert_eq!(excerpt("short", 100), "short");
    }

    #[test]
    fn test_descriptions_always_three() {
        let descs = descriptions("Acme", "Something long enough to truncate");
        assert_eq!(descs.len(), 3);
        assert!(descs[0].text.contains("Acme"));
    }
}
