//! DOCX listing-sheet builder.
//!
//! A DOCX file is a ZIP of XML parts plus media, so the builder assembles
//! the package part by part: content types, package relationships, the
//! document body, document relationships and one media entry per embedded
//! image. Images arrive pre-downloaded; a failed download becomes a
//! bracketed placeholder paragraph instead of aborting the document.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use listkit_models::{sanitize_filename_title, Channel, ExportArtifact, ResolvedListingView};

use crate::error::ExportResult;
use crate::fetch::ImageDownload;

/// MIME type for DOCX files.
pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Display extent of embedded images: 12 x 9 cm in EMUs.
const IMAGE_EXTENT_CX: u64 = 4_320_000;
const IMAGE_EXTENT_CY: u64 = 3_240_000;

/// Build the listing document for a channel.
pub fn build_document(
    view: &ResolvedListingView,
    channel: &Channel,
    downloads: &[ImageDownload],
) -> ExportResult<ExportArtifact> {
    let buffer = Cursor::new(Vec::new());
    let mut zip = ZipWriter::new(buffer);
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let embedded: Vec<&ImageDownload> = downloads.iter().filter(|d| d.succeeded()).collect();

    zip.start_file("[Content_Types].xml", options)?;
    zip.write_all(content_types_xml(&embedded).as_bytes())?;

    zip.start_file("_rels/.rels", options)?;
    zip.write_all(PACKAGE_RELS.as_bytes())?;

    zip.start_file("word/document.xml", options)?;
    zip.write_all(document_xml(view, channel, downloads).as_bytes())?;

    zip.start_file("word/_rels/document.xml.rels", options)?;
    zip.write_all(document_rels_xml(&embedded).as_bytes())?;

    for download in &embedded {
        let path = format!("word/media/{}", download.file_name);
        zip.start_file(&path, options)?;
        if let Some(bytes) = download.bytes() {
            zip.write_all(bytes)?;
        }
    }

    let buffer = zip.finish()?;
    let file_name = format!(
        "{}_{}.docx",
        sanitize_filename_title(&view.title),
        channel.slug
    );
    Ok(ExportArtifact::binary(
        file_name,
        buffer.into_inner(),
        DOCX_CONTENT_TYPE,
    ))
}

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

fn content_types_xml(embedded: &[&ImageDownload]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
"#,
    );

    // One Default per distinct media extension actually present.
    let mut extensions: Vec<&str> = embedded.iter().map(|d| d.extension()).collect();
    extensions.sort_unstable();
    extensions.dedup();
    for ext in extensions {
        let mime = match ext {
            "png" => "image/png",
            "gif" => "image/gif",
            "webp" => "image/webp",
            _ => "image/jpeg",
        };
        xml.push_str(&format!(
            "  <Default Extension=\"{ext}\" ContentType=\"{mime}\"/>\n"
        ));
    }

    xml.push_str(
        r#"  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#,
    );
    xml
}

fn document_rels_xml(embedded: &[&ImageDownload]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
"#,
    );
    for (i, download) in embedded.iter().enumerate() {
        xml.push_str(&format!(
            "  <Relationship Id=\"rIdImg{}\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/image\" Target=\"media/{}\"/>\n",
            i + 1,
            download.file_name
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

fn document_xml(
    view: &ResolvedListingView,
    channel: &Channel,
    downloads: &[ImageDownload],
) -> String {
    let mut body = String::new();

    heading(&mut body, &view.title, 32);
    paragraph(&mut body, &format!("Listing sheet for {}", channel.display_name));

    heading(&mut body, "Product Images", 26);
    let mut rel_index = 0usize;
    for download in downloads {
        if download.succeeded() {
            rel_index += 1;
            image_paragraph(&mut body, rel_index, download.index);
        } else {
            paragraph(
                &mut body,
                &format!("[Image {} unavailable: {}]", download.index, download.url),
            );
        }
    }

    heading(&mut body, "Description", 26);
    for para in view.description.split('\n').filter(|p| !p.trim().is_empty()) {
        paragraph(&mut body, para.trim());
    }

    heading(&mut body, "Tags / Keywords", 26);
    if !view.tags.is_empty() {
        paragraph(&mut body, &view.tags.join(", "));
    }

    heading(&mut body, "Key Features", 26);
    for bullet in &view.bullet_points {
        paragraph(&mut body, &format!("• {bullet}"));
    }

    heading(&mut body, "Materials", 26);
    if !view.materials.is_empty() {
        paragraph(&mut body, &view.materials.join(", "));
    }

    heading(&mut body, "Product Details", 26);
    paragraph(&mut body, &format!("Price: {:.2}", view.price));
    paragraph(&mut body, &format!("Quantity: {}", view.quantity));
    paragraph(&mut body, &format!("Category: {}", view.category));
    let mut custom: Vec<(&String, &String)> = view.custom_fields.iter().collect();
    custom.sort_by_key(|(name, _)| name.as_str());
    for (name, value) in custom {
        paragraph(&mut body, &format!("{name}: {value}"));
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing">
<w:body>
{body}</w:body>
</w:document>"#
    )
}

/// A bold paragraph sized `half_points` (w:sz units are half-points).
fn heading(out: &mut String, text: &str, half_points: u32) {
    out.push_str(&format!(
        "<w:p><w:r><w:rPr><w:b/><w:sz w:val=\"{}\"/></w:rPr><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>\n",
        half_points,
        escape_xml(text)
    ));
}

fn paragraph(out: &mut String, text: &str) {
    out.push_str(&format!(
        "<w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>\n",
        escape_xml(text)
    ));
}

/// An inline picture referencing relationship `rIdImg<rel_index>`.
fn image_paragraph(out: &mut String, rel_index: usize, image_number: usize) {
    out.push_str(&format!(
        r#"<w:p><w:r><w:drawing><wp:inline distT="0" distB="0" distL="0" distR="0"><wp:extent cx="{cx}" cy="{cy}"/><wp:docPr id="{id}" name="Image {num}"/><a:graphic xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture"><pic:pic xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture"><pic:nvPicPr><pic:cNvPr id="{id}" name="Image {num}"/><pic:cNvPicPr/></pic:nvPicPr><pic:blipFill><a:blip r:embed="rIdImg{rel}"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill><pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr></pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing></w:r></w:p>
"#,
        cx = IMAGE_EXTENT_CX,
        cy = IMAGE_EXTENT_CY,
        id = image_number,
        num = image_number,
        rel = rel_index,
    ));
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
