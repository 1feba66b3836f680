//! Export engine for the ListKit backend.
//!
//! Converts a resolved listing view into marketplace-specific artifacts:
//! - delimited bulk-upload files, one exporter strategy per channel family
//! - a DOCX listing sheet with embedded product images
//! - a composite ZIP package (document + images + flat file + instructions)
//!
//! Validation gates every export: a listing with blocking errors never
//! reaches a generator. The [`orchestrator::ExportService`] is the single
//! entry point; [`orchestrator::ExportService::preflight`] exposes the same
//! validation as a side-effect-free read path.

pub mod document;
pub mod error;
pub mod exporters;
pub mod fetch;
pub mod flatfile;
pub mod orchestrator;
pub mod package;
pub mod registry;
pub mod validator;

pub use error::{ExportError, ExportResult};
pub use exporters::{ChannelExporter, ExporterRegistry};
pub use fetch::{HttpImageFetcher, ImageDownload, ImageFetcher};
pub use orchestrator::{ExportOutcome, ExportRequest, ExportService, PreflightOutcome};
pub use registry::ChannelRegistry;
pub use validator::validate;
