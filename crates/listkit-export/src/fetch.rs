//! Listing image downloads.
//!
//! Images are fetched one at a time to bound peak memory and avoid
//! hammering the image host. Every item yields a structured outcome; a
//! failed download is logged and skipped, never propagated, so package and
//! document builds always see the full per-image picture.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};
use url::Url;

use listkit_models::ImageRef;

/// Default per-request timeout for image downloads.
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Image extensions recognized when sniffing the source URL.
const KNOWN_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// Fallback extension when the URL gives no usable hint.
const DEFAULT_EXTENSION: &str = "jpg";

/// Why a single image download failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadError {
    pub reason: String,
}

impl std::fmt::Display for DownloadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason)
    }
}

impl std::error::Error for DownloadError {}

impl DownloadError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Fetches raw image bytes. Object-safe so tests can stub the network.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, DownloadError>;
}

/// Production fetcher backed by reqwest.
pub struct HttpImageFetcher {
    client: reqwest::Client,
}

impl HttpImageFetcher {
    /// Create a fetcher with the default timeout.
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS))
    }

    /// Create a fetcher with an explicit per-request timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self { client }
    }
}

impl Default for HttpImageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, DownloadError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DownloadError::new(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DownloadError::new(format!(
                "HTTP {} from image host",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| DownloadError::new(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

/// Per-item download outcome.
#[derive(Debug, Clone)]
pub enum DownloadOutcome {
    Ok(Vec<u8>),
    Failed(DownloadError),
}

/// One image's download result within an export.
#[derive(Debug, Clone)]
pub struct ImageDownload {
    /// 1-based position of the image in the listing.
    pub index: usize,
    /// Source URL.
    pub url: String,
    /// Target filename within a package (`image_<n>.<ext>`).
    pub file_name: String,
    /// Bytes or the failure reason.
    pub outcome: DownloadOutcome,
}

impl ImageDownload {
    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, DownloadOutcome::Ok(_))
    }

    pub fn bytes(&self) -> Option<&[u8]> {
        match &self.outcome {
            DownloadOutcome::Ok(bytes) => Some(bytes),
            DownloadOutcome::Failed(_) => None,
        }
    }

    /// File extension of the target filename.
    pub fn extension(&self) -> &str {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .unwrap_or(DEFAULT_EXTENSION)
    }
}

/// Download every listing image sequentially.
///
/// Failures are recorded per item and never abort the batch; the returned
/// vector always has one entry per source image, in source order.
pub async fn download_images(
    fetcher: &dyn ImageFetcher,
    images: &[ImageRef],
) -> Vec<ImageDownload> {
    let mut downloads = Vec::with_capacity(images.len());

    for (i, image) in images.iter().enumerate() {
        let index = i + 1;
        let file_name = format!("image_{}.{}", index, sniff_extension(&image.url));

        let outcome = match fetcher.fetch(&image.url).await {
            Ok(bytes) => {
                debug!(url = %image.url, size = bytes.len(), "Downloaded listing image");
                DownloadOutcome::Ok(bytes)
            }
            Err(e) => {
                warn!(url = %image.url, index, error = %e, "Image download failed; skipping");
                DownloadOutcome::Failed(e)
            }
        };

        downloads.push(ImageDownload {
            index,
            url: image.url.clone(),
            file_name,
            outcome,
        });
    }

    downloads
}

/// Sniff a file extension from the URL path, defaulting to jpg.
pub fn sniff_extension(url: &str) -> &'static str {
    let path_ext = Url::parse(url)
        .ok()
        .and_then(|u| {
            u.path()
                .rsplit_once('.')
                .map(|(_, ext)| ext.to_ascii_lowercase())
        })
        .unwrap_or_default();

    KNOWN_EXTENSIONS
        .iter()
        .find(|known| **known == path_ext)
        .copied()
        .unwrap_or(DEFAULT_EXTENSION)
}
