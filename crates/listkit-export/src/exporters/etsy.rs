//! Etsy bulk-edit CSV exporter.

use listkit_models::{
    sanitize_filename_title, Channel, ExportArtifact, PreflightCheck, ResolvedListingView,
    ValidationResult,
};

use crate::error::{ExportError, ExportResult};
use crate::exporters::{rule_checks, ChannelExporter};
use crate::flatfile::FlatFileBuilder;
use crate::validator;

/// Characters Etsy rejects in tags.
const ETSY_TAG_FORBIDDEN: [char; 4] = ['&', '<', '>', '$'];

/// Etsy supports up to ten listing photos in the bulk file.
const ETSY_MAX_IMAGE_COLUMNS: usize = 10;

/// Exporter for Etsy's bulk-edit CSV shape.
#[derive(Debug)]
pub struct EtsyExporter;

impl ChannelExporter for EtsyExporter {
    fn validate(&self, view: &ResolvedListingView, channel: &Channel) -> ValidationResult {
        let mut result = validator::validate(view, channel);

        // Etsy additionally rejects tags containing markup/symbol characters.
        let mut any_forbidden = false;
        for tag in &view.tags {
            if tag.chars().any(|c| ETSY_TAG_FORBIDDEN.contains(&c)) {
                any_forbidden = true;
                result
                    .errors
                    .push(format!("Tag '{tag}' contains characters Etsy does not allow"));
            }
        }
        if any_forbidden {
            result.score = result.score.saturating_sub(25);
            result.is_ready = false;
        }
        result
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

        let mut header: Vec<String> = [
            "TITLE",
            "DESCRIPTION",
            "PRICE",
            "CURRENCY_CODE",
            "QUANTITY",
            "TAGS",
            "MATERIALS",
            "SECTION",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        for i in 1..=ETSY_MAX_IMAGE_COLUMNS {
            header.push(format!("IMAGE{i}"));
        }
        header.push("VIDEO".to_string());

        let mut row: Vec<String> = vec![
            view.title.clone(),
            view.description.clone(),
            format!("{:.2}", view.price),
            "USD".to_string(),
            view.quantity.to_string(),
            view.tags.join(","),
            view.materials.join(","),
            view.category.clone(),
        ];
        for i in 0..ETSY_MAX_IMAGE_COLUMNS {
            row.push(
                view.images
                    .get(i)
                    .map(|img| img.url.clone())
                    .unwrap_or_default(),
            );
        }
        row.push(view.video_url.clone().unwrap_or_default());

        let mut builder = FlatFileBuilder::csv();
        builder.row(&header);
        builder.row(&row);

        let file_name = format!(
            "{}_etsy_bulk_upload.csv",
            sanitize_filename_title(&view.title)
        );
        Ok(ExportArtifact::text(file_name, builder.finish(), "text/csv"))
    }

    fn preflight_checks(
        &self,
        view: &ResolvedListingView,
        channel: &Channel,
    ) -> Vec<PreflightCheck> {
        let mut checks = rule_checks(view, channel);

        let bad_tags: Vec<&String> = view
            .tags
            .iter()
            .filter(|t| t.chars().any(|c| ETSY_TAG_FORBIDDEN.contains(&c)))
            .collect();
        if !bad_tags.is_empty() {
            checks.push(PreflightCheck::fail(
                "Tag characters",
                "Tags avoid characters Etsy rejects (& < > $)",
                format!("{} tag(s) contain forbidden characters", bad_tags.len()),
            ));
        }

        checks
    }
}
