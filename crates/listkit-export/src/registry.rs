//! Immutable catalog of channel definitions.
//!
//! One entry per supported marketplace: slug, display name, default export
//! format and the content rule set. Rules are data; the exporter strategies
//! own all channel-specific behavior.

use listkit_models::{
    BulletPolicy, BulletRule, Channel, ChannelId, ChannelRules, FormatCategory, TagRule,
};

use crate::error::{ExportError, ExportResult};

/// Catalog of known channels, built once at startup.
pub struct ChannelRegistry {
    channels: Vec<Channel>,
}

impl ChannelRegistry {
    /// Build the standard catalog. Channel IDs are stable slugs prefixed
    /// with `chan-` so seed data and fixtures line up across environments.
    pub fn standard() -> Self {
        let channels = vec![
            Channel::new(
                ChannelId::from_string("chan-etsy"),
                "etsy",
                "Etsy",
                FormatCategory::FlatText,
                ChannelRules {
                    title_max_length: 140,
                    description_max_length: 102_400,
                    tags: Some(TagRule {
                        min_count: 1,
                        max_count: 13,
                        max_length: 20,
                    }),
                    bullets: None,
                    min_images: 1,
                    recommended_images: Some(5),
                    requires_materials: true,
                },
            ),
            Channel::new(
                ChannelId::from_string("chan-amazon-handmade"),
                "amazon-handmade",
                "Amazon Handmade",
                FormatCategory::Document,
                ChannelRules {
                    title_max_length: 200,
                    description_max_length: 2_000,
                    tags: None,
                    bullets: Some(BulletRule {
                        required_count: 5,
                        policy: BulletPolicy::Require,
                    }),
                    min_images: 1,
                    recommended_images: Some(7),
                    requires_materials: false,
                },
            ),
            Channel::new(
                ChannelId::from_string("chan-ebay"),
                "ebay",
                "eBay",
                FormatCategory::FlatText,
                ChannelRules {
                    title_max_length: 80,
                    description_max_length: 500_000,
                    tags: None,
                    bullets: Some(BulletRule {
                        required_count: 3,
                        policy: BulletPolicy::Warn,
                    }),
                    min_images: 1,
                    recommended_images: None,
                    requires_materials: false,
                },
            ),
            Channel::new(
                ChannelId::from_string("chan-shopify"),
                "shopify",
                "Shopify",
                FormatCategory::FlatText,
                ChannelRules {
                    title_max_length: 255,
                    description_max_length: 65_535,
                    tags: Some(TagRule {
                        min_count: 0,
                        max_count: 250,
                        max_length: 255,
                    }),
                    bullets: None,
                    min_images: 1,
                    recommended_images: None,
                    requires_materials: false,
                },
            ),
            Channel::new(
                ChannelId::from_string("chan-wix"),
                "wix",
                "Wix Stores",
                FormatCategory::FlatText,
                ChannelRules {
                    title_max_length: 80,
                    description_max_length: 8_000,
                    tags: Some(TagRule {
                        min_count: 0,
                        max_count: 30,
                        max_length: 30,
                    }),
                    bullets: None,
                    min_images: 1,
                    recommended_images: None,
                    requires_materials: false,
                },
            ),
            Channel::new(
                ChannelId::from_string("chan-squarespace"),
                "squarespace",
                "Squarespace",
                FormatCategory::FlatText,
                ChannelRules {
                    title_max_length: 100,
                    description_max_length: 10_000,
                    tags: None,
                    bullets: None,
                    min_images: 1,
                    recommended_images: None,
                    requires_materials: false,
                },
            ),
        ];

        Self { channels }
    }

    /// All channels in the catalog.
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// Slugs of every known channel.
    pub fn supported_slugs(&self) -> Vec<String> {
        self.channels.iter().map(|c| c.slug.clone()).collect()
    }

    /// Look up a channel by slug. Unknown slugs fail loudly, enumerating
    /// the catalog, rather than defaulting.
    pub fn channel_for_slug(&self, slug: &str) -> ExportResult<&Channel> {
        self.channels
            .iter()
            .find(|c| c.slug == slug)
            .ok_or_else(|| ExportError::UnsupportedChannel {
                requested: slug.to_string(),
                supported: self.supported_slugs(),
            })
    }
}

impl Default for ChannelRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_slugs() {
        let registry = ChannelRegistry::standard();
        let slugs = registry.supported_slugs();
        assert_eq!(
            slugs,
            vec![
                "etsy",
                "amazon-handmade",
                "ebay",
                "shopify",
                "wix",
                "squarespace"
            ]
        );
    }

    #[test]
    fn test_lookup_known_slug() {
        let registry = ChannelRegistry::standard();
        let etsy = registry.channel_for_slug("etsy").unwrap();
        assert_eq!(etsy.display_name, "Etsy");
        assert_eq!(etsy.rules.title_max_length, 140);
        let tags = etsy.rules.tags.expect("etsy defines a tag rule");
        assert_eq!(tags.max_count, 13);
    }

    #[test]
    fn test_unknown_slug_enumerates_supported() {
        let registry = ChannelRegistry::standard();
        let err = registry.channel_for_slug("dawanda").unwrap_err();
        match err {
            ExportError::UnsupportedChannel {
                requested,
                supported,
            } => {
                assert_eq!(requested, "dawanda");
                assert!(supported.contains(&"etsy".to_string()));
                assert!(supported.contains(&"shopify".to_string()));
            }
            other => panic!("expected UnsupportedChannel, got {other:?}"),
        }
    }
}
