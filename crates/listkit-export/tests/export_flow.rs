//! End-to-end export flows against the in-memory store and a local HTTP
//! image host.

use std::io::Read;
use std::sync::Arc;

use chrono::Utc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use listkit_export::{
    ChannelRegistry, ExportRequest, ExportService, HttpImageFetcher,
};
use listkit_models::{
    ChannelId, ChannelOverride, ExportFormat, ImageRef, ListingBase, ListingId, ListingRecord,
};
use listkit_store::MemoryStore;

/// Tiny valid JPEG header; enough for the package to treat it as bytes.
const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46];

fn listing_with_images(id: &str, image_urls: Vec<String>) -> ListingRecord {
    ListingRecord {
        base: ListingBase {
            id: ListingId::from_string(id),
            title: "Hand-thrown ceramic mug".to_string(),
            description: "A sturdy mug with a matte glaze.".to_string(),
            price: 32.0,
            quantity: 4,
            category: "Mugs".to_string(),
            materials: vec!["stoneware".to_string()],
            images: image_urls
                .into_iter()
                .enumerate()
                .map(|(i, url)| ImageRef::new(url, i as u32 + 1))
                .collect(),
            video_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        },
        overrides: vec![ChannelOverride {
            channel_id: ChannelId::from_string("chan-etsy"),
            channel_slug: "etsy".to_string(),
            tags: Some(vec!["mug".to_string(), "ceramic".to_string()]),
            ..Default::default()
        }],
    }
}

async fn service_for(store: &MemoryStore) -> ExportService {
    store
        .seed_channels(ChannelRegistry::standard().channels().to_vec())
        .await;
    let shared = Arc::new(store.clone());
    ExportService::new(
        shared.clone(),
        shared.clone(),
        shared.clone(),
        shared,
        Arc::new(HttpImageFetcher::new()),
    )
}

#[tokio::test]
async fn package_export_downloads_real_images_and_tolerates_one_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/images/1.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(JPEG_BYTES))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/images/2.jpg"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/images/3.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(JPEG_BYTES))
        .mount(&server)
        .await;

    let store = MemoryStore::new();
    store
        .seed_listing(listing_with_images(
            "listing-1",
            vec![
                format!("{}/images/1.jpg", server.uri()),
                format!("{}/images/2.jpg", server.uri()),
                format!("{}/images/3.jpg", server.uri()),
            ],
        ))
        .await;
    let service = service_for(&store).await;

    let outcome = service
        .generate_export(ExportRequest::new(
            ListingId::from_string("listing-1"),
            ChannelId::from_string("chan-etsy"),
            ExportFormat::Package,
        ))
        .await
        .expect("package export should tolerate a failed download");

    // Write the archive to disk the way a caller would, then inspect it.
    let dir = tempfile::tempdir().unwrap();
    let archive_path = dir.path().join(&outcome.artifact.file_name);
    std::fs::write(&archive_path, &outcome.artifact.content).unwrap();

    let file = std::fs::File::open(&archive_path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();

    // Exactly two images, numbered by source position with a gap at 2.
    let images: Vec<&String> = names.iter().filter(|n| n.starts_with("images/")).collect();
    assert_eq!(images, vec!["images/image_1.jpg", "images/image_3.jpg"]);

    // One document, one README, one copy-paste file.
    assert_eq!(names.iter().filter(|n| n.ends_with(".docx")).count(), 1);
    assert_eq!(names.iter().filter(|n| *n == "README.txt").count(), 1);
    assert_eq!(
        names.iter().filter(|n| *n == "content_copy_paste.txt").count(),
        1
    );

    // The document carries a placeholder for the missing image.
    let mut doc_bytes = Vec::new();
    archive
        .by_name("hand_thrown_ceramic_mug_etsy.docx")
        .unwrap()
        .read_to_end(&mut doc_bytes)
        .unwrap();
    let mut doc = zip::ZipArchive::new(std::io::Cursor::new(doc_bytes)).unwrap();
    let mut xml = String::new();
    doc.by_name("word/document.xml")
        .unwrap()
        .read_to_string(&mut xml)
        .unwrap();
    assert!(xml.contains("[Image 2 unavailable"));
}

#[tokio::test]
async fn package_export_with_all_downloads_failing_still_produces_archive() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let store = MemoryStore::new();
    store
        .seed_listing(listing_with_images(
            "listing-1",
            vec![format!("{}/images/1.jpg", server.uri())],
        ))
        .await;
    let service = service_for(&store).await;

    let outcome = service
        .generate_export(ExportRequest::new(
            ListingId::from_string("listing-1"),
            ChannelId::from_string("chan-etsy"),
            ExportFormat::Package,
        ))
        .await
        .expect("a package must be produced even with zero images");

    let mut archive =
        zip::ZipArchive::new(std::io::Cursor::new(outcome.artifact.content)).unwrap();
    let names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();
    assert!(!names.iter().any(|n| n.starts_with("images/")));
    assert!(names.contains(&"README.txt".to_string()));
}

#[tokio::test]
async fn flat_file_export_skips_image_downloads_entirely() {
    // No mock server at all: flat files must not touch the network.
    let store = MemoryStore::new();
    store
        .seed_listing(listing_with_images(
            "listing-1",
            vec!["http://127.0.0.1:9/unreachable.jpg".to_string()],
        ))
        .await;
    let service = service_for(&store).await;

    let outcome = service
        .generate_export(ExportRequest::new(
            ListingId::from_string("listing-1"),
            ChannelId::from_string("chan-etsy"),
            ExportFormat::FlatFile,
        ))
        .await
        .expect("flat-file export needs no image downloads");

    let text = String::from_utf8(outcome.artifact.content).unwrap();
    assert!(text.starts_with("TITLE,DESCRIPTION"));
    assert!(text.contains("unreachable.jpg"));
}
