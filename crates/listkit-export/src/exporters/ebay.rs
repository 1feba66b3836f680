//! eBay File Exchange CSV exporter.

use listkit_models::{
    sanitize_filename_title, Channel, ExportArtifact, PreflightCheck, ResolvedListingView,
    ValidationResult,
};

use crate::error::{ExportError, ExportResult};
use crate::exporters::{rule_checks, ChannelExporter};
use crate::flatfile::FlatFileBuilder;
use crate::validator;

/// Exporter for eBay's File Exchange shape.
#[derive(Debug)]
pub struct EbayExporter;

impl ChannelExporter for EbayExporter {
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

        // Custom fields become item specifics; sorted so output is stable.
        let mut specifics: Vec<(&String, &String)> = view.custom_fields.iter().collect();
        specifics.sort_by_key(|(name, _)| name.as_str());

        let mut header: Vec<String> = [
            "Action",
            "Category",
            "Title",
            "Description",
            "PicURL",
            "Quantity",
            "StartPrice",
            "Format",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        for (name, _) in &specifics {
            header.push(format!("C:{name}"));
        }

        // File Exchange takes all picture URLs in one pipe-separated column.
        let pic_urls = view
            .images
            .iter()
            .map(|i| i.url.as_str())
            .collect::<Vec<_>>()
            .join("|");

        let mut row: Vec<String> = vec![
            "Add".to_string(),
            view.category.clone(),
            view.title.clone(),
            description_with_features(view),
            pic_urls,
            view.quantity.to_string(),
            format!("{:.2}", view.price),
            "FixedPrice".to_string(),
        ];
        for (_, value) in &specifics {
            row.push((*value).clone());
        }

        let mut builder = FlatFileBuilder::csv();
        builder.row(&header);
        builder.row(&row);

        let file_name = format!(
            "{}_ebay_bulk_upload.csv",
            sanitize_filename_title(&view.title)
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

/// eBay has no separate bullet column; features are appended to the
/// description as a plain-text list.
fn description_with_features(view: &ResolvedListingView) -> String {
    if view.bullet_points.is_empty() {
        return view.description.clone();
    }
    let mut text = view.description.clone();
    text.push_str("\n\nKey features:\n");
    for bullet in &view.bullet_points {
        text.push_str("- ");
        text.push_str(bullet);
        text.push('\n');
    }
    text
}
