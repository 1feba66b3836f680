//! Amazon Handmade checker.
//!
//! Validation and preflight are fully supported; flat-file generation is
//! not. Amazon's bulk path runs through category-specific flat-file
//! templates downloaded from Seller Central, which this subsystem does not
//! model, so `generate` refuses with an explicit signal instead of emitting
//! a file Amazon would reject. Document and package exports remain
//! available for Handmade sellers who enter listings manually.

use listkit_models::{
    Channel, ExportArtifact, PreflightCheck, ResolvedListingView, ValidationResult,
};

use crate::error::{ExportError, ExportResult};
use crate::exporters::{rule_checks, ChannelExporter};
use crate::validator;

/// Checker-only exporter for Amazon Handmade.
#[derive(Debug)]
pub struct AmazonHandmadeExporter;

impl ChannelExporter for AmazonHandmadeExporter {
    fn validate(&self, view: &ResolvedListingView, channel: &Channel) -> ValidationResult {
        validator::validate(view, channel)
    }

    fn generate(
        &self,
        _view: &ResolvedListingView,
        channel: &Channel,
    ) -> ExportResult<ExportArtifact> {
        Err(ExportError::GenerationUnsupported {
            slug: channel.slug.clone(),
        })
    }

    fn supports_generation(&self) -> bool {
        false
    }

    fn preflight_checks(
        &self,
        view: &ResolvedListingView,
        channel: &Channel,
    ) -> Vec<PreflightCheck> {
        let mut checks = rule_checks(view, channel);
        checks.push(PreflightCheck::warning(
            "Bulk upload",
            "Amazon Handmade bulk upload uses Seller Central flat-file templates",
            "Use the document or package export and enter the listing manually",
        ));
        checks
    }
}
