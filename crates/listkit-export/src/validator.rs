//! Channel-rule validation and readiness scoring.
//!
//! `validate` is a pure function: identical (view, channel) inputs always
//! yield an identical result. Exporter strategies delegate here so a rule
//! can never be enforced differently at two call sites.

use listkit_models::{BulletPolicy, Channel, ResolvedListingView, ValidationResult};

/// Points subtracted per distinct error category.
const ERROR_PENALTY: u32 = 25;

/// Points subtracted per distinct warning category.
const WARNING_PENALTY: u32 = 10;

/// Rule categories. Scoring penalizes each category once, no matter how
/// many individual messages it produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleCategory {
    Title,
    Description,
    Tags,
    Bullets,
    Images,
    Materials,
}

/// Validate a resolved view against a channel's rules.
pub fn validate(view: &ResolvedListingView, channel: &Channel) -> ValidationResult {
    let rules = &channel.rules;
    let mut errors: Vec<(RuleCategory, String)> = Vec::new();
    let mut warnings: Vec<(RuleCategory, String)> = Vec::new();

    // Required fields
    if view.title.trim().is_empty() {
        errors.push((RuleCategory::Title, "Title is required".to_string()));
    }
    if view.description.trim().is_empty() {
        errors.push((
            RuleCategory::Description,
            "Description is required".to_string(),
        ));
    }

    // Length limits
    let title_len = view.title.chars().count() as u32;
    if title_len > rules.title_max_length {
        errors.push((
            RuleCategory::Title,
            format!(
                "Title is {} characters; {} allows at most {}",
                title_len, channel.display_name, rules.title_max_length
            ),
        ));
    }
    let description_len = view.description.chars().count() as u32;
    if description_len > rules.description_max_length {
        errors.push((
            RuleCategory::Description,
            format!(
                "Description is {} characters; {} allows at most {}",
                description_len, channel.display_name, rules.description_max_length
            ),
        ));
    }

    // Tags
    if let Some(tag_rule) = &rules.tags {
        let count = view.tags.len() as u32;
        if count < tag_rule.min_count || count > tag_rule.max_count {
            errors.push((
                RuleCategory::Tags,
                format!(
                    "Tag count {} is outside the allowed range {}-{}",
                    count, tag_rule.min_count, tag_rule.max_count
                ),
            ));
        }
        for tag in &view.tags {
            let len = tag.chars().count() as u32;
            if len > tag_rule.max_length {
                errors.push((
                    RuleCategory::Tags,
                    format!(
                        "Tag '{}' is {} characters; maximum is {}",
                        tag, len, tag_rule.max_length
                    ),
                ));
            }
        }
    }

    // Bullet points
    if let Some(bullet_rule) = &rules.bullets {
        let count = view.bullet_points.len() as u32;
        if count < bullet_rule.required_count {
            let message = format!(
                "{} expects {} bullet points; listing has {}",
                channel.display_name, bullet_rule.required_count, count
            );
            match bullet_rule.policy {
                BulletPolicy::Require => errors.push((RuleCategory::Bullets, message)),
                BulletPolicy::Warn => warnings.push((RuleCategory::Bullets, message)),
            }
        }
    }

    // Images
    let image_count = view.images.len() as u32;
    if image_count < rules.min_images {
        errors.push((
            RuleCategory::Images,
            format!(
                "{} requires at least {} image(s); listing has {}",
                channel.display_name, rules.min_images, image_count
            ),
        ));
    } else if let Some(recommended) = rules.recommended_images {
        if image_count < recommended {
            warnings.push((
                RuleCategory::Images,
                format!(
                    "{} listings perform best with {} or more images; listing has {}",
                    channel.display_name, recommended, image_count
                ),
            ));
        }
    }

    // Materials
    if rules.requires_materials && view.materials.is_empty() {
        warnings.push((
            RuleCategory::Materials,
            format!("{} listings usually include materials", channel.display_name),
        ));
    }

    let score = compute_score(&errors, &warnings);
    ValidationResult::new(
        score,
        errors.into_iter().map(|(_, m)| m).collect(),
        warnings.into_iter().map(|(_, m)| m).collect(),
    )
}

/// Start at 100, subtract a fixed penalty per distinct error category and a
/// smaller one per distinct warning category, floor at 0.
fn compute_score(
    errors: &[(RuleCategory, String)],
    warnings: &[(RuleCategory, String)],
) -> u8 {
    let error_categories = distinct_categories(errors);
    let warning_categories = distinct_categories(warnings);

    let penalty = error_categories * ERROR_PENALTY + warning_categories * WARNING_PENALTY;
    100u32.saturating_sub(penalty) as u8
}

fn distinct_categories(messages: &[(RuleCategory, String)]) -> u32 {
    let mut seen: Vec<RuleCategory> = Vec::new();
    for (category, _) in messages {
        if !seen.contains(category) {
            seen.push(*category);
        }
    }
    seen.len() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ChannelRegistry;
    use listkit_models::{ImageRef, SCORE_GOOD_THRESHOLD};

    fn view() -> ResolvedListingView {
        ResolvedListingView {
            title: "Hand-thrown ceramic mug".to_string(),
            description: "A sturdy mug with a matte glaze, thrown on the wheel.".to_string(),
            price: 32.0,
            quantity: 4,
            category: "Kitchen".to_string(),
            tags: vec!["mug".to_string(), "ceramic".to_string()],
            bullet_points: vec![],
            materials: vec!["stoneware".to_string()],
            images: vec![
                ImageRef::new("https://img.example/1.jpg", 1),
                ImageRef::new("https://img.example/2.jpg", 2),
                ImageRef::new("https://img.example/3.jpg", 3),
                ImageRef::new("https://img.example/4.jpg", 4),
                ImageRef::new("https://img.example/5.jpg", 5),
            ],
            video_url: None,
            custom_fields: Default::default(),
            channel_slug: Some("etsy".to_string()),
        }
    }

    fn channel(slug: &str) -> listkit_models::Channel {
        ChannelRegistry::standard()
            .channel_for_slug(slug)
            .unwrap()
            .clone()
    }

    #[test]
    fn test_clean_listing_is_ready() {
        let result = validate(&view(), &channel("etsy"));
        assert!(result.is_ready);
        assert_eq!(result.score, 100);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_validate_is_pure() {
        let v = view();
        let c = channel("etsy");
        assert_eq!(validate(&v, &c), validate(&v, &c));
    }

    #[test]
    fn test_missing_title_blocks() {
        let mut v = view();
        v.title = "  ".to_string();
        let result = validate(&v, &channel("etsy"));
        assert!(!result.is_ready);
        assert!(result.errors.iter().any(|e| e.contains("Title is required")));
    }

    #[test]
    fn test_title_over_limit_blocks() {
        let mut v = view();
        v.title = "x".repeat(150);
        let result = validate(&v, &channel("etsy"));
        assert!(!result.is_ready);
        assert!(result
            .errors
            .iter()
            .any(|e| e.contains("150 characters") && e.contains("140")));
    }

    #[test]
    fn test_tag_count_over_limit_blocks() {
        let mut v = view();
        v.tags = (0..14).map(|i| format!("tag{i}")).collect();
        let result = validate(&v, &channel("etsy"));
        assert!(!result.is_ready);
        assert!(result.errors.iter().any(|e| e.contains("outside the allowed range")));
    }

    #[test]
    fn test_long_tag_blocks_per_tag() {
        let mut v = view();
        v.tags = vec![
            "ok".to_string(),
            "this tag is far too long for etsy".to_string(),
        ];
        let result = validate(&v, &channel("etsy"));
        assert!(!result.is_ready);
        assert_eq!(
            result.errors.iter().filter(|e| e.contains("maximum is 20")).count(),
            1
        );
    }

    #[test]
    fn test_zero_images_blocks_and_scores_below_good() {
        let mut v = view();
        v.images.clear();
        let result = validate(&v, &channel("etsy"));
        assert!(!result.is_ready);
        assert!(result.errors.iter().any(|e| e.contains("at least 1 image")));
        assert!(result.score < SCORE_GOOD_THRESHOLD);
    }

    #[test]
    fn test_recommended_images_warns_without_blocking() {
        let mut v = view();
        v.images.truncate(2);
        let result = validate(&v, &channel("etsy"));
        assert!(result.is_ready);
        assert!(result.warnings.iter().any(|w| w.contains("5 or more images")));
        assert_eq!(result.score, 90);
    }

    #[test]
    fn test_bullet_policy_require_blocks() {
        let result = validate(&view(), &channel("amazon-handmade"));
        assert!(!result.is_ready);
        assert!(result
            .errors
            .iter()
            .any(|e| e.contains("expects 5 bullet points")));
    }

    #[test]
    fn test_bullet_policy_warn_does_not_block() {
        let mut v = view();
        v.bullet_points = vec!["Food safe".to_string()];
        let result = validate(&v, &channel("ebay"));
        assert!(result.is_ready);
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("expects 3 bullet points")));
    }

    #[test]
    fn test_score_counts_categories_once() {
        let mut v = view();
        // Two tag violations, one category: 100 - 25 = 75
        v.tags = vec![
            "this tag is far too long for etsy".to_string(),
            "another tag that exceeds the cap".to_string(),
        ];
        let result = validate(&v, &channel("etsy"));
        assert_eq!(result.score, 75);
    }

    #[test]
    fn test_score_floors_at_zero() {
        let v = ResolvedListingView {
            title: String::new(),
            description: String::new(),
            price: 0.0,
            quantity: 0,
            category: String::new(),
            tags: (0..14).map(|i| format!("a-very-long-tag-number-{i}")).collect(),
            bullet_points: vec![],
            materials: vec![],
            images: vec![],
            video_url: None,
            custom_fields: Default::default(),
            channel_slug: None,
        };
        let result = validate(&v, &channel("etsy"));
        assert!(!result.is_ready);
        // Title + Description + Tags + Images errors, Materials warning
        assert_eq!(result.score, 0);
    }
}
