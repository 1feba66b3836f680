//! Composite export package builder.
//!
//! A package is a ZIP bundling everything a seller needs to list manually:
//! the DOCX listing sheet, an images folder, the channel's flat file when
//! one was requested, upload instructions and a plain-text copy-paste dump.
//! Images arrive pre-downloaded so the document and the images folder share
//! one fetch pass; a package is produced even when every download failed.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use listkit_models::{sanitize_filename_title, Channel, ExportArtifact, ResolvedListingView};

use crate::document::build_document;
use crate::error::ExportResult;
use crate::fetch::ImageDownload;

/// Build the composite package for a channel.
pub fn build_package(
    view: &ResolvedListingView,
    channel: &Channel,
    downloads: &[ImageDownload],
    flat_file: Option<&ExportArtifact>,
) -> ExportResult<ExportArtifact> {
    let document = build_document(view, channel, downloads)?;

    let buffer = Cursor::new(Vec::new());
    let mut zip = ZipWriter::new(buffer);
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    zip.start_file(&document.file_name, options)?;
    zip.write_all(&document.content)?;

    for download in downloads.iter().filter(|d| d.succeeded()) {
        let path = format!("images/{}", download.file_name);
        zip.start_file(&path, options)?;
        if let Some(bytes) = download.bytes() {
            zip.write_all(bytes)?;
        }
    }

    if let Some(flat) = flat_file {
        zip.start_file(flat_file_entry_name(channel, flat), options)?;
        zip.write_all(&flat.content)?;
    }

    zip.start_file("README.txt", options)?;
    zip.write_all(readme_text(view, channel, downloads, flat_file).as_bytes())?;

    zip.start_file("content_copy_paste.txt", options)?;
    zip.write_all(copy_paste_text(view, channel).as_bytes())?;

    let buffer = zip.finish()?;
    let file_name = format!(
        "{}_{}_package.zip",
        sanitize_filename_title(&view.title),
        channel.slug
    );
    Ok(ExportArtifact::binary(
        file_name,
        buffer.into_inner(),
        "application/zip",
    ))
}

/// Flat files keep a canonical in-archive name, `<slug>_bulk_upload.<ext>`,
/// independent of the standalone download filename.
fn flat_file_entry_name(channel: &Channel, flat: &ExportArtifact) -> String {
    let ext = flat
        .file_name
        .rsplit_once('.')
        .map(|(_, e)| e)
        .unwrap_or("csv");
    format!("{}_bulk_upload.{ext}", channel.slug)
}

fn readme_text(
    view: &ResolvedListingView,
    channel: &Channel,
    downloads: &[ImageDownload],
    flat_file: Option<&ExportArtifact>,
) -> String {
    let downloaded = downloads.iter().filter(|d| d.succeeded()).count();
    let failed = downloads.len() - downloaded;

    let mut text = String::new();
    text.push_str(&format!(
        "{} export package for {}\n",
        channel.display_name, view.title
    ));
    text.push_str("=================================================\n\n");
    text.push_str("Contents:\n");
    text.push_str(&format!(
        "- {}_{}.docx: formatted listing sheet with embedded images\n",
        sanitize_filename_title(&view.title),
        channel.slug
    ));
    text.push_str(&format!(
        "- images/: {downloaded} product image(s), numbered in listing order\n"
    ));
    if failed > 0 {
        text.push_str(&format!(
            "  ({failed} image(s) could not be downloaded and are missing; see the\n   placeholder lines in the listing sheet for their source URLs)\n"
        ));
    }
    if let Some(flat) = flat_file {
        text.push_str(&format!(
            "- {}: bulk-upload file for {}\n",
            flat_file_entry_name(channel, flat),
            channel.display_name
        ));
    }
    text.push_str("- content_copy_paste.txt: every field as plain text\n\n");

    text.push_str("Suggested workflow:\n");
    text.push_str(&format!(
        "1. Sign in to {} and start a new listing.\n",
        channel.display_name
    ));
    if flat_file.is_some() {
        text.push_str("2. Or use the bulk-upload file with the marketplace's CSV importer.\n");
        text.push_str("3. Upload the images from the images/ folder in numeric order.\n");
        text.push_str("4. Copy the remaining fields from content_copy_paste.txt.\n");
    } else {
        text.push_str("2. Upload the images from the images/ folder in numeric order.\n");
        text.push_str("3. Copy each field from content_copy_paste.txt into the listing form.\n");
    }
    text.push_str("\nGenerated by ListKit.\n");
    text
}

fn copy_paste_text(view: &ResolvedListingView, channel: &Channel) -> String {
    let mut text = String::new();
    let mut section = |name: &str, body: &str| {
        text.push_str(name);
        text.push('\n');
        text.push_str(&"-".repeat(name.len()));
        text.push('\n');
        text.push_str(body);
        text.push_str("\n\n");
    };

    section("CHANNEL", &channel.display_name);
    section("TITLE", &view.title);
    section("DESCRIPTION", &view.description);
    section("PRICE", &format!("{:.2}", view.price));
    section("QUANTITY", &view.quantity.to_string());
    section("CATEGORY", &view.category);
    section("TAGS / KEYWORDS", &view.tags.join(", "));
    section(
        "KEY FEATURES",
        &view
            .bullet_points
            .iter()
            .map(|b| format!("- {b}"))
            .collect::<Vec<_>>()
            .join("\n"),
    );
    section("MATERIALS", &view.materials.join(", "));

    let mut custom: Vec<(&String, &String)> = view.custom_fields.iter().collect();
    custom.sort_by_key(|(name, _)| name.as_str());
    if !custom.is_empty() {
        let body = custom
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join("\n");
        section("PRODUCT DETAILS", &body);
    }

    if let Some(video) = &view.video_url {
        section("VIDEO", video);
    }

    text
}
