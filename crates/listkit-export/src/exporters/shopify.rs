//! Shopify product-CSV exporter.
//!
//! Also serves Wix Stores and Squarespace, whose importers accept
//! Shopify-compatible product CSVs; see the registry in `exporters::mod`.

use listkit_models::{
    sanitize_filename_title, Channel, ExportArtifact, PreflightCheck, ResolvedListingView,
    ValidationResult,
};

use crate::error::{ExportError, ExportResult};
use crate::exporters::{rule_checks, ChannelExporter};
use crate::flatfile::FlatFileBuilder;
use crate::validator;

/// Exporter for the Shopify product-CSV shape.
#[derive(Debug)]
pub struct ShopifyExporter;

impl ChannelExporter for ShopifyExporter {
    fn validate(&self, view: &ResolvedListingView, channel: &Channel) -> ValidationResult {
        validator::validate(view, channel)
    }

    fn generate(
        &self,
        view: &ResolvedListingView,
        channel: &Channel,
    ) -> ExportResult<ExportArtifact> {
        let validation = self.validate(view, channel);
        if !validation.is_ready {
            return Err(ExportError::validation(validation));
        }

        let handle = sanitize_filename_title(&view.title).replace('_', "-");
        let body_html = description_as_html(view);

        let mut builder = FlatFileBuilder::csv();
        builder.row([
            "Handle",
            "Title",
            "Body (HTML)",
            "Vendor",
            "Type",
            "Tags",
            "Published",
            "Variant Price",
            "Variant Inventory Qty",
            "Image Src",
            "Image Position",
            "Image Alt Text",
            "Status",
        ]);

        // First row carries the full record; one extra row per additional image.
        let first_image = view.images.first();
        let record_row: Vec<String> = vec![
            handle.clone(),
            view.title.clone(),
            body_html,
            String::new(),
            view.category.clone(),
            view.tags.join(", "),
            "TRUE".to_string(),
            format!("{:.2}", view.price),
            view.quantity.to_string(),
            first_image.map(|i| i.url.clone()).unwrap_or_default(),
            first_image.map(|_| "1".to_string()).unwrap_or_default(),
            first_image
                .and_then(|i| i.alt.clone())
                .unwrap_or_default(),
            "active".to_string(),
        ];
        builder.row(&record_row);
        for (idx, image) in view.images.iter().enumerate().skip(1) {
            let image_row: Vec<String> = vec![
                handle.clone(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                image.url.clone(),
                (idx + 1).to_string(),
                image.alt.clone().unwrap_or_default(),
                String::new(),
            ];
            builder.row(&image_row);
        }

        let file_name = format!(
            "{}_{}_bulk_upload.csv",
            sanitize_filename_title(&view.title),
            channel.slug
        );
        Ok(ExportArtifact::text(file_name, builder.finish(), "text/csv"))
    }

    fn preflight_checks(
        &self,
        view: &ResolvedListingView,
        channel: &Channel,
    ) -> Vec<PreflightCheck> {
        rule_checks(view, channel)
    }
}

/// Shopify's Body (HTML) column: paragraphs plus a feature list when the
/// listing has bullets.
fn description_as_html(view: &ResolvedListingView) -> String {
    let mut html = String::new();
    for paragraph in view.description.split("\n\n").filter(|p| !p.trim().is_empty()) {
        html.push_str("<p>");
        html.push_str(&escape_html(paragraph.trim()));
        html.push_str("</p>");
    }
    if !view.bullet_points.is_empty() {
        html.push_str("<ul>");
        for bullet in &view.bullet_points {
            html.push_str("<li>");
            html.push_str(&escape_html(bullet));
            html.push_str("</li>");
        }
        html.push_str("</ul>");
    }
    html
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ChannelRegistry;
    use listkit_models::ImageRef;

    fn shopify() -> Channel {
        ChannelRegistry::standard()
            .channel_for_slug("shopify")
            .unwrap()
            .clone()
    }

    fn view() -> ResolvedListingView {
        let mut second = ImageRef::new("https://img.example/2.jpg", 2);
        second.alt = Some("Side view".to_string());
        ResolvedListingView {
            title: "Walnut serving board".to_string(),
            description: "End-grain walnut board.\n\nHand finished with oil & wax.".to_string(),
            price: 75.0,
            quantity: 2,
            category: "Kitchen".to_string(),
            tags: vec!["walnut".to_string(), "board".to_string()],
            bullet_points: vec!["Food safe".to_string()],
            materials: vec!["walnut".to_string()],
            images: vec![ImageRef::new("https://img.example/1.jpg", 1), second],
            video_url: None,
            custom_fields: Default::default(),
            channel_slug: Some("shopify".to_string()),
        }
    }

    #[test]
    fn test_generate_one_row_per_image() {
        let artifact = ShopifyExporter.generate(&view(), &shopify()).unwrap();
        let text = String::from_utf8(artifact.content).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        // Header + full record + one continuation row for the second image
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("walnut-serving-board,"));
        assert!(lines[2].contains("https://img.example/2.jpg"));
        assert!(lines[2].contains("Side view"));
    }

    #[test]
    fn test_body_html_escapes_and_lists() {
        let html = description_as_html(&view());
        assert!(html.contains("<p>End-grain walnut board.</p>"));
        assert!(html.contains("oil &amp; wax"));
        assert!(html.contains("<li>Food safe</li>"));
    }

    #[test]
    fn test_file_name_uses_channel_slug() {
        let channels = ChannelRegistry::standard();
        let wix = channels.channel_for_slug("wix").unwrap();
        let artifact = ShopifyExporter.generate(&view(), wix).unwrap();
        assert_eq!(artifact.file_name, "walnut_serving_board_wix_bulk_upload.csv");
    }
}
