//! Deterministic canned content. Two independent sets:
//!
//! * top-up templates pad a partially parsed list to the full count and are
//!   labeled like real output;
//! * offline templates replace the whole result when the provider is
//!   unconfigured or the call failed, labeled as fallback content.
//!
//! Both sets are static so repeated calls with the same input are
//! byte-identical.

use super::slogans::GeneratedItem;

/// Used when parsing produced fewer than the requested number of taglines.
/// Real parsed items always precede these.
pub fn top_up_taglines(product_name: &str) -> Vec<String> {
    vec![
        format!("{product_name}: Where Innovation Meets Excellence"),
        format!("Transform Your Business with {product_name}"),
        format!("{product_name} - Your Gateway to Success"),
        format!("Unlock Potential with {product_name}"),
        format!("{product_name}: Excellence Redefined"),
    ]
}

/// Used when the provider is unavailable or the call failed outright.
/// Distinct wording from the top-up set.
pub fn offline_taglines(product_name: &str) -> Vec<String> {
    vec![
        format!("{product_name}: Smarter results, faster growth"),
        format!("Power your impact with {product_name}"),
        format!("{product_name} - Optimize. Automate. Win."),
        format!("Make every ad count with {product_name}"),
        format!("{product_name}: AI that drives performance"),
    ]
}

/// Last-resort recommended slogan for an empty list.
pub fn default_recommended(product_name: &str) -> String {
    format!("{product_name}: Your Success Partner")
}

/// Wraps the offline set as a complete item list.
pub fn offline_items(product_name: &str, campaign_style: &str) -> Vec<GeneratedItem> {
    offline_taglines(product_name)
        .into_iter()
        .map(|text| GeneratedItem {
            text,
            explanation: format!("Fallback {campaign_style} tagline"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_sets_have_five_entries() {
        assert_eq!(top_up_taglines("Acme").len(), 5);
        assert_eq!(offline_taglines("Acme").len(), 5);
    }

    #[test]
    fn test_sets_are_disjoint() {
        let top_up = top_up_taglines("Acme");
        for offline in offline_taglines("Acme") {
            assert!(!top_up.contains(&offline));
        }
    }

    #[test]
    fn test_every_template_mentions_the_product() {
        for s in top_up_taglines("Acme").iter().chain(offline_taglines("Acme").iter()) {
            assert!(s.contains("Acme"), "template missing product name: {s}");
        }
    }

    #[test]
    fn test_offline_items_are_tagged_fallback() {
        let items = offline_items("Acme", "professional");
        assert_eq!(items.len(), 5);
        for item in items {
            assert_eq!(item.explanation, "Fallback professional tagline");
        }
    }

    #[test]
    fn test_deterministic_across_calls() {
        assert_eq!(offline_taglines("Acme"), offline_taglines("Acme"));
        assert_eq!(top_up_taglines("Acme"), top_up_taglines("Acme"));
    }
}
