//! Exporter strategies for marketplace bulk-upload files.
//!
//! Each channel family has its own exporter implementing the
//! [`ChannelExporter`] trait. Dispatch is an explicit registry lookup that
//! fails loudly on an unknown slug; there is no fallback implementation.

use std::collections::HashMap;
use std::sync::Arc;

use listkit_models::{Channel, ExportArtifact, PreflightCheck, ResolvedListingView, ValidationResult};

use crate::error::{ExportError, ExportResult};

pub mod amazon;
pub mod ebay;
pub mod etsy;
pub mod shopify;

pub use amazon::AmazonHandmadeExporter;
pub use ebay::EbayExporter;
pub use etsy::EtsyExporter;
pub use shopify::ShopifyExporter;

/// Strategy interface implemented once per channel family.
pub trait ChannelExporter: std::fmt::Debug + Send + Sync {
    /// Validate the resolved view against the channel's rules, including
    /// any family-specific constraints beyond the shared rule set.
    fn validate(&self, view: &ResolvedListingView, channel: &Channel) -> ValidationResult;

    /// Generate the channel's flat export payload. Checker-only families
    /// return [`ExportError::GenerationUnsupported`].
    fn generate(
        &self,
        view: &ResolvedListingView,
        channel: &Channel,
    ) -> ExportResult<ExportArtifact>;

    /// Whether `generate` can produce a flat file for this family.
    fn supports_generation(&self) -> bool {
        true
    }

    /// Human-readable preflight checklist for the editor UI.
    fn preflight_checks(
        &self,
        view: &ResolvedListingView,
        channel: &Channel,
    ) -> Vec<PreflightCheck>;
}

/// Registry mapping channel slug to exporter implementation.
pub struct ExporterRegistry {
    exporters: HashMap<&'static str, Arc<dyn ChannelExporter>>,
}

impl ExporterRegistry {
    /// Build the standard registry.
    ///
    /// Wix Stores and Squarespace both import Shopify-compatible product
    /// CSVs, so all three slugs share the [`ShopifyExporter`]; this is a
    /// deliberate reuse of one flat-file shape, not a missing
    /// implementation. Amazon Handmade registers the checker-only exporter.
    pub fn standard() -> Self {
        let mut exporters: HashMap<&'static str, Arc<dyn ChannelExporter>> = HashMap::new();

        exporters.insert("etsy", Arc::new(EtsyExporter));

        let shopify: Arc<dyn ChannelExporter> = Arc::new(ShopifyExporter);
        exporters.insert("shopify", Arc::clone(&shopify));
        exporters.insert("wix", Arc::clone(&shopify));
        exporters.insert("squarespace", shopify);

        exporters.insert("ebay", Arc::new(EbayExporter));
        exporters.insert("amazon-handmade", Arc::new(AmazonHandmadeExporter));

        Self { exporters }
    }

    /// Slugs with a registered exporter, sorted for stable error payloads.
    pub fn supported_slugs(&self) -> Vec<String> {
        let mut slugs: Vec<String> = self.exporters.keys().map(|s| s.to_string()).collect();
        slugs.sort();
        slugs
    }

    /// Look up the exporter for a slug; unknown slugs fail with the
    /// supported list, never a silent default.
    pub fn exporter_for_slug(&self, slug: &str) -> ExportResult<Arc<dyn ChannelExporter>> {
        self.exporters
            .get(slug)
            .cloned()
            .ok_or_else(|| ExportError::UnsupportedChannel {
                requested: slug.to_string(),
                supported: self.supported_slugs(),
            })
    }
}

impl Default for ExporterRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Shared preflight checklist built from the channel rule set.
///
/// Family exporters start from this list and append their own checks so the
/// checklist and the validator read the rules identically.
pub(crate) fn rule_checks(
    view: &ResolvedListingView,
    channel: &Channel,
) -> Vec<PreflightCheck> {
    use listkit_models::BulletPolicy;

    let rules = &channel.rules;
    let mut checks = Vec::new();

    let title_len = view.title.chars().count() as u32;
    checks.push(if view.title.trim().is_empty() {
        PreflightCheck::fail("Title", "Listing has a title", "Title is empty")
    } else if title_len > rules.title_max_length {
        PreflightCheck::fail(
            "Title",
            format!("Title fits within {} characters", rules.title_max_length),
            format!("Title is {title_len} characters"),
        )
    } else {
        PreflightCheck::pass(
            "Title",
            format!("Title fits within {} characters", rules.title_max_length),
        )
    });

    let description_len = view.description.chars().count() as u32;
    checks.push(if view.description.trim().is_empty() {
        PreflightCheck::fail(
            "Description",
            "Listing has a description",
            "Description is empty",
        )
    } else if description_len > rules.description_max_length {
        PreflightCheck::fail(
            "Description",
            format!(
                "Description fits within {} characters",
                rules.description_max_length
            ),
            format!("Description is {description_len} characters"),
        )
    } else {
        PreflightCheck::pass("Description", "Listing has a description within limits")
    });

    if let Some(tag_rule) = &rules.tags {
        let count = view.tags.len() as u32;
        let over_length = view
            .tags
            .iter()
            .filter(|t| t.chars().count() as u32 > tag_rule.max_length)
            .count();
        checks.push(
            if count < tag_rule.min_count || count > tag_rule.max_count {
                PreflightCheck::fail(
                    "Tags",
                    format!(
                        "Between {} and {} tags",
                        tag_rule.min_count, tag_rule.max_count
                    ),
                    format!("Listing has {count} tags"),
                )
            } else if over_length > 0 {
                PreflightCheck::fail(
                    "Tags",
                    format!("Each tag within {} characters", tag_rule.max_length),
                    format!("{over_length} tag(s) too long"),
                )
            } else {
                PreflightCheck::pass(
                    "Tags",
                    format!(
                        "Between {} and {} tags, each within {} characters",
                        tag_rule.min_count, tag_rule.max_count, tag_rule.max_length
                    ),
                )
            },
        );
    }

    if let Some(bullet_rule) = &rules.bullets {
        let count = view.bullet_points.len() as u32;
        checks.push(if count >= bullet_rule.required_count {
            PreflightCheck::pass(
                "Key features",
                format!("{} bullet points provided", bullet_rule.required_count),
            )
        } else {
            let description =
                format!("{} expects {} bullet points", channel.display_name, bullet_rule.required_count);
            let detail = format!("Listing has {count}");
            match bullet_rule.policy {
                BulletPolicy::Require => PreflightCheck::fail("Key features", description, detail),
                BulletPolicy::Warn => PreflightCheck::warning("Key features", description, detail),
            }
        });
    }

    let image_count = view.images.len() as u32;
    checks.push(if image_count < rules.min_images {
        PreflightCheck::fail(
            "Images",
            format!("At least {} image(s)", rules.min_images),
            format!("Listing has {image_count}"),
        )
    } else if rules
        .recommended_images
        .is_some_and(|recommended| image_count < recommended)
    {
        PreflightCheck::warning(
            "Images",
            format!(
                "{} or more images recommended",
                rules.recommended_images.unwrap_or_default()
            ),
            format!("Listing has {image_count}"),
        )
    } else {
        PreflightCheck::pass("Images", "Enough images for this channel")
    });

    if rules.requires_materials {
        checks.push(if view.materials.is_empty() {
            PreflightCheck::warning(
                "Materials",
                format!("{} listings usually include materials", channel.display_name),
                "No materials listed",
            )
        } else {
            PreflightCheck::pass("Materials", "Materials are listed")
        });
    }

    checks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ChannelRegistry;
    use listkit_models::{CheckStatus, ImageRef};

    fn view() -> ResolvedListingView {
        ResolvedListingView {
            title: "Hand-thrown ceramic mug".to_string(),
            description: "A sturdy mug.".to_string(),
            price: 32.0,
            quantity: 4,
            category: "Kitchen".to_string(),
            tags: vec!["mug".to_string()],
            bullet_points: vec![],
            materials: vec!["stoneware".to_string()],
            images: vec![ImageRef::new("https://img.example/1.jpg", 1)],
            video_url: None,
            custom_fields: Default::default(),
            channel_slug: None,
        }
    }

    #[test]
    fn test_unknown_slug_fails_with_supported_list() {
        let registry = ExporterRegistry::standard();
        let err = registry.exporter_for_slug("bonanza").unwrap_err();
        match err {
            ExportError::UnsupportedChannel {
                requested,
                supported,
            } => {
                assert_eq!(requested, "bonanza");
                assert_eq!(
                    supported,
                    vec![
                        "amazon-handmade",
                        "ebay",
                        "etsy",
                        "shopify",
                        "squarespace",
                        "wix"
                    ]
                );
            }
            other => panic!("expected UnsupportedChannel, got {other:?}"),
        }
    }

    #[test]
    fn test_wix_and_squarespace_share_shopify_exporter() {
        let registry = ExporterRegistry::standard();
        let channels = ChannelRegistry::standard();
        let v = view();

        // All three generate the Shopify product-CSV header.
        for slug in ["shopify", "wix", "squarespace"] {
            let exporter = registry.exporter_for_slug(slug).unwrap();
            let channel = channels.channel_for_slug(slug).unwrap();
            let artifact = exporter.generate(&v, channel).unwrap();
            let text = String::from_utf8(artifact.content).unwrap();
            assert!(
                text.starts_with("Handle,Title,Body (HTML)"),
                "{slug} should produce a Shopify-shaped CSV"
            );
        }
    }

    #[test]
    fn test_rule_checks_mirror_validator_outcomes() {
        let channels = ChannelRegistry::standard();
        let etsy = channels.channel_for_slug("etsy").unwrap();

        let mut v = view();
        v.images.clear();
        let checks = rule_checks(&v, etsy);

        let images = checks.iter().find(|c| c.name == "Images").unwrap();
        assert_eq!(images.status, CheckStatus::Fail);

        let validation = crate::validator::validate(&v, etsy);
        assert!(!validation.is_ready);
    }
}
