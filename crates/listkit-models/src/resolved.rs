//! The resolved listing view: base content merged with a channel override.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::listing::{ChannelOverride, ImageRef, ListingBase};

/// The merged, read-only result of applying a channel override over the
/// listing base. Computed per request, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ResolvedListingView {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub quantity: u32,
    pub category: String,
    pub tags: Vec<String>,
    pub bullet_points: Vec<String>,
    pub materials: Vec<String>,
    pub images: Vec<ImageRef>,
    pub video_url: Option<String>,
    pub custom_fields: HashMap<String, String>,
    /// Slug of the channel the view was resolved for (diagnostics only).
    pub channel_slug: Option<String>,
}

impl ResolvedListingView {
    /// Merge a base record with an optional channel override.
    ///
    /// For every overridable field the override value wins when present and
    /// non-empty; otherwise the base value is used. A missing or empty
    /// override array counts as "no override", not "override to empty" —
    /// listings saved before tags/bullets existed carry null arrays and must
    /// merge cleanly.
    pub fn resolve(base: &ListingBase, ov: Option<&ChannelOverride>) -> Self {
        let title = ov
            .and_then(|o| o.title.as_deref())
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(&base.title)
            .to_string();

        let description = ov
            .and_then(|o| o.description.as_deref())
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(&base.description)
            .to_string();

        let price = ov
            .and_then(|o| o.price)
            .filter(|p| p.is_finite() && *p > 0.0)
            .unwrap_or(base.price);

        let tags = non_empty_list(ov.and_then(|o| o.tags.as_ref())).unwrap_or_default();

        let bullet_points =
            non_empty_list(ov.and_then(|o| o.bullet_points.as_ref())).unwrap_or_default();

        let materials = non_empty_list(ov.and_then(|o| o.materials.as_ref()))
            .unwrap_or_else(|| base.materials.clone());

        let custom_fields = ov.map(|o| o.custom_fields.clone()).unwrap_or_default();

        Self {
            title,
            description,
            price,
            quantity: base.quantity,
            category: base.category.clone(),
            tags,
            bullet_points,
            materials,
            images: base.images.clone(),
            video_url: base.video_url.clone(),
            custom_fields,
            channel_slug: ov.map(|o| o.channel_slug.clone()),
        }
    }
}

/// Treat a null, missing or empty array as "no override".
fn non_empty_list(list: Option<&Vec<String>>) -> Option<Vec<String>> {
    list.filter(|l| !l.is_empty()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChannelId, ListingId};
    use chrono::Utc;

    fn base() -> ListingBase {
        ListingBase {
            id: ListingId::from_string("listing-1"),
            title: "Hand-thrown ceramic mug".to_string(),
            description: "A sturdy mug with a matte glaze.".to_string(),
            price: 32.0,
            quantity: 4,
            category: "Kitchen".to_string(),
            materials: vec!["stoneware".to_string(), "glaze".to_string()],
            images: vec![ImageRef::new("https://img.example/mug-1.jpg", 1)],
            video_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn override_for(slug: &str) -> ChannelOverride {
        ChannelOverride {
            channel_id: ChannelId::from_string("chan-1"),
            channel_slug: slug.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_without_override_uses_base() {
        let view = ResolvedListingView::resolve(&base(), None);
        assert_eq!(view.title, "Hand-thrown ceramic mug");
        assert_eq!(view.price, 32.0);
        assert_eq!(view.materials, vec!["stoneware", "glaze"]);
        assert!(view.tags.is_empty());
        assert!(view.channel_slug.is_none());
    }

    #[test]
    fn test_resolve_prefers_override_values() {
        let mut ov = override_for("etsy");
        ov.title = Some("Ceramic Mug | Handmade Stoneware".to_string());
        ov.tags = Some(vec!["mug".to_string(), "ceramic".to_string()]);
        ov.price = Some(35.5);

        let view = ResolvedListingView::resolve(&base(), Some(&ov));
        assert_eq!(view.title, "Ceramic Mug | Handmade Stoneware");
        assert_eq!(view.tags, vec!["mug", "ceramic"]);
        assert_eq!(view.price, 35.5);
        // Untouched fields still come from the base
        assert_eq!(view.description, "A sturdy mug with a matte glaze.");
        assert_eq!(view.channel_slug.as_deref(), Some("etsy"));
    }

    #[test]
    fn test_blank_override_title_falls_back() {
        let mut ov = override_for("etsy");
        ov.title = Some("   ".to_string());

        let view = ResolvedListingView::resolve(&base(), Some(&ov));
        assert_eq!(view.title, "Hand-thrown ceramic mug");
    }

    #[test]
    fn test_empty_override_arrays_are_not_overrides() {
        let mut ov = override_for("etsy");
        ov.tags = Some(vec![]);
        ov.materials = Some(vec![]);

        let view = ResolvedListingView::resolve(&base(), Some(&ov));
        assert!(view.tags.is_empty());
        // Empty materials override falls back to the base list
        assert_eq!(view.materials, vec!["stoneware", "glaze"]);
    }

    #[test]
    fn test_null_override_arrays_survive_deserialization() {
        // Overrides written by older editor versions carry null arrays.
        let json = r#"{
            "channel_id": "chan-1",
            "channel_slug": "etsy",
            "tags": null,
            "bullet_points": null,
            "materials": null
        }"#;
        let ov: ChannelOverride = serde_json::from_str(json).expect("should deserialize");
        let view = ResolvedListingView::resolve(&base(), Some(&ov));
        assert!(view.tags.is_empty());
        assert_eq!(view.materials, vec!["stoneware", "glaze"]);
    }

    #[test]
    fn test_invalid_override_price_falls_back() {
        let mut ov = override_for("ebay");
        ov.price = Some(0.0);
        let view = ResolvedListingView::resolve(&base(), Some(&ov));
        assert_eq!(view.price, 32.0);
    }
}
