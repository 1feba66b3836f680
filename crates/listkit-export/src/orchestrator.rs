//! Export orchestration and the preflight read path.
//!
//! `ExportService` is the subsystem's single entry point: it fetches the
//! listing and channel, resolves the per-channel view, validates, dispatches
//! to the requested generator and records the outcome. Preflight runs the
//! same read path with no generation and no side effects.

use std::sync::Arc;

use chrono::Utc;
use metrics::counter;
use tracing::{info, warn};

use listkit_models::{
    Channel, ChannelId, ExportArtifact, ExportFormat, ExportLogEntry, ListingId, PreflightCheck,
    ResolvedListingView, ValidationResult,
};
use listkit_store::{ChannelListingAssociations, ChannelStore, ExportLog, ListingStore};

use crate::document::build_document;
use crate::error::{ExportError, ExportResult};
use crate::exporters::ExporterRegistry;
use crate::fetch::{download_images, ImageFetcher};
use crate::package::build_package;

/// Metric names.
mod names {
    pub const EXPORTS_TOTAL: &str = "listkit_exports_total";
    pub const EXPORT_FAILURES_TOTAL: &str = "listkit_export_failures_total";
}

/// Parameters of one export request.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub listing_id: ListingId,
    pub channel_id: ChannelId,
    pub format: ExportFormat,
    /// Include the channel's flat file inside a package export. Ignored for
    /// other formats; skipped silently for checker-only channels.
    pub include_flat_file: bool,
}

impl ExportRequest {
    pub fn new(listing_id: ListingId, channel_id: ChannelId, format: ExportFormat) -> Self {
        Self {
            listing_id,
            channel_id,
            format,
            include_flat_file: true,
        }
    }
}

/// A successful export: the artifact plus the validation that permitted it.
#[derive(Debug)]
pub struct ExportOutcome {
    pub artifact: ExportArtifact,
    pub validation: ValidationResult,
}

/// Preflight result: validation plus the itemized checklist.
#[derive(Debug)]
pub struct PreflightOutcome {
    pub channel: Channel,
    pub validation: ValidationResult,
    pub checks: Vec<PreflightCheck>,
}

/// The export engine's entry point.
pub struct ExportService {
    listings: Arc<dyn ListingStore>,
    channels: Arc<dyn ChannelStore>,
    export_log: Arc<dyn ExportLog>,
    associations: Arc<dyn ChannelListingAssociations>,
    exporters: ExporterRegistry,
    fetcher: Arc<dyn ImageFetcher>,
}

impl ExportService {
    pub fn new(
        listings: Arc<dyn ListingStore>,
        channels: Arc<dyn ChannelStore>,
        export_log: Arc<dyn ExportLog>,
        associations: Arc<dyn ChannelListingAssociations>,
        fetcher: Arc<dyn ImageFetcher>,
    ) -> Self {
        Self {
            listings,
            channels,
            export_log,
            associations,
            exporters: ExporterRegistry::standard(),
            fetcher,
        }
    }

    /// Slugs with a registered exporter.
    pub fn supported_slugs(&self) -> Vec<String> {
        self.exporters.supported_slugs()
    }

    /// Whether a channel's exporter can produce a flat file.
    pub fn supports_flat_file(&self, slug: &str) -> bool {
        self.exporters
            .exporter_for_slug(slug)
            .map(|e| e.supports_generation())
            .unwrap_or(false)
    }

    /// Generate an export artifact.
    ///
    /// Fails fast on missing inputs and blocking validation errors; nothing
    /// is generated until the listing is ready. On success the export is
    /// logged and the channel-listing association's exported-at marker is
    /// set (idempotent).
    pub async fn generate_export(&self, request: ExportRequest) -> ExportResult<ExportOutcome> {
        let (view, channel) = self
            .resolve_view(&request.listing_id, &request.channel_id)
            .await?;
        let exporter = self.exporters.exporter_for_slug(&channel.slug)?;

        let validation = exporter.validate(&view, &channel);
        if !validation.is_ready {
            warn!(
                listing_id = %request.listing_id,
                channel_slug = %channel.slug,
                errors = validation.errors.len(),
                "Export refused: listing is not ready"
            );
            counter!(names::EXPORT_FAILURES_TOTAL, "channel" => channel.slug.clone())
                .increment(1);
            self.export_log
                .append(ExportLogEntry::failure(
                    request.listing_id.clone(),
                    request.channel_id.clone(),
                    channel.slug.clone(),
                    request.format,
                    validation.errors.join("; "),
                    Some(validation.score),
                ))
                .await?;
            return Err(ExportError::validation(validation));
        }

        let artifact = match request.format {
            ExportFormat::FlatFile => exporter.generate(&view, &channel)?,
            ExportFormat::Document => {
                let downloads = download_images(self.fetcher.as_ref(), &view.images).await;
                build_document(&view, &channel, &downloads)?
            }
            ExportFormat::Package => {
                let downloads = download_images(self.fetcher.as_ref(), &view.images).await;
                let flat_file = if request.include_flat_file {
                    match exporter.generate(&view, &channel) {
                        Ok(flat) => Some(flat),
                        Err(ExportError::GenerationUnsupported { slug }) => {
                            info!(
                                channel_slug = %slug,
                                "Channel has no flat-file generator; packaging without one"
                            );
                            None
                        }
                        Err(other) => return Err(other),
                    }
                } else {
                    None
                };
                build_package(&view, &channel, &downloads, flat_file.as_ref())?
            }
        };

        self.export_log
            .append(ExportLogEntry::success(
                request.listing_id.clone(),
                request.channel_id.clone(),
                channel.slug.clone(),
                request.format,
                artifact.file_name.clone(),
                validation.score,
            ))
            .await?;
        self.associations
            .mark_exported(&request.listing_id, &request.channel_id, Utc::now())
            .await?;

        counter!(
            names::EXPORTS_TOTAL,
            "channel" => channel.slug.clone(),
            "format" => request.format.as_str()
        )
        .increment(1);
        info!(
            listing_id = %request.listing_id,
            channel_slug = %channel.slug,
            format = request.format.as_str(),
            file_name = %artifact.file_name,
            "Export generated"
        );

        Ok(ExportOutcome {
            artifact,
            validation,
        })
    }

    /// Validation and checklist with no generation and no side effects, so
    /// the editor can poll readiness before committing to an export.
    pub async fn preflight(
        &self,
        listing_id: &ListingId,
        channel_id: &ChannelId,
    ) -> ExportResult<PreflightOutcome> {
        let (view, channel) = self.resolve_view(listing_id, channel_id).await?;
        let exporter = self.exporters.exporter_for_slug(&channel.slug)?;

        let validation = exporter.validate(&view, &channel);
        let checks = exporter.preflight_checks(&view, &channel);

        Ok(PreflightOutcome {
            channel,
            validation,
            checks,
        })
    }

    async fn resolve_view(
        &self,
        listing_id: &ListingId,
        channel_id: &ChannelId,
    ) -> ExportResult<(ResolvedListingView, Channel)> {
        let record = self
            .listings
            .fetch_listing(listing_id)
            .await?
            .ok_or_else(|| ExportError::not_found(format!("listing {listing_id}")))?;

        let channel = self
            .channels
            .fetch_channel(channel_id)
            .await?
            .ok_or_else(|| ExportError::not_found(format!("channel {channel_id}")))?;

        let view = ResolvedListingView::resolve(&record.base, record.override_for(channel_id));
        Ok((view, channel))
    }
}
