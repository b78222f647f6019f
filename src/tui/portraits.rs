//! Lazy portrait loading.
//!
//! Portraits are only requested for cards that are on screen (and for the
//! modal). Each request downloads the image on its own task, decodes and
//! shrinks it on the blocking pool, and reports back over a channel that the
//! view drains on tick.

use std::collections::HashMap;
use std::sync::Arc;

use image::RgbImage;
use thiserror::Error;
use tokio::sync::mpsc;

/// Longest edge kept for card thumbnails (pixels).
pub const THUMBNAIL_MAX_DIM: u32 = 64;
/// Longest edge kept for the enlarged modal portrait (pixels).
pub const MODAL_MAX_DIM: u32 = 256;

/// Errors while loading a portrait. Never surfaced beyond a placeholder.
#[derive(Debug, Error)]
pub enum PortraitError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CDN returned HTTP {0}")]
    Status(u16),

    #[error("Image decode error: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Decode task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// A decoded, downscaled portrait ready for half-block drawing.
#[derive(Debug, Clone)]
pub struct Portrait {
    pixels: RgbImage,
}

impl Portrait {
    pub fn from_rgb(pixels: RgbImage) -> Self {
        Self { pixels }
    }

    /// Decode encoded image bytes and shrink to fit `max_dim`.
    pub fn decode(bytes: &[u8], max_dim: u32) -> Result<Self, PortraitError> {
        let image = image::load_from_memory(bytes)?;
        let image = if image.width() > max_dim || image.height() > max_dim {
            image.thumbnail(max_dim, max_dim)
        } else {
            image
        };
        Ok(Self {
            pixels: image.to_rgb8(),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// RGB at `(x, y)`, clamped to the image bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let x = x.min(self.width().saturating_sub(1));
        let y = y.min(self.height().saturating_sub(1));
        self.pixels.get_pixel(x, y).0
    }
}

/// Load state of one portrait URL.
#[derive(Debug, Clone)]
pub enum PortraitSlot {
    Loading,
    Ready(Arc<Portrait>),
    Failed,
}

struct PortraitLoaded {
    url: String,
    result: Result<Portrait, PortraitError>,
}

/// Per-URL portrait store fed by background downloads.
pub struct PortraitCache {
    enabled: bool,
    http_client: reqwest::Client,
    slots: HashMap<String, PortraitSlot>,
    data_tx: mpsc::UnboundedSender<PortraitLoaded>,
    data_rx: mpsc::UnboundedReceiver<PortraitLoaded>,
}

impl PortraitCache {
    pub fn new(http_client: reqwest::Client, enabled: bool) -> Self {
        let (data_tx, data_rx) = mpsc::unbounded_channel();
        Self {
            enabled,
            http_client,
            slots: HashMap::new(),
            data_tx,
            data_rx,
        }
    }

    /// Cache that never downloads; every card shows its placeholder.
    pub fn disabled() -> Self {
        Self::new(reqwest::Client::new(), false)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Start loading `url` unless it is already known. Must run inside a
    /// tokio runtime when enabled.
    pub fn request(&mut self, url: &str, max_dim: u32) {
        if !self.enabled || self.slots.contains_key(url) {
            return;
        }

        self.slots.insert(url.to_string(), PortraitSlot::Loading);

        let http = self.http_client.clone();
        let tx = self.data_tx.clone();
        let url = url.to_string();
        tokio::spawn(async move {
            let result = download(&http, &url, max_dim).await;
            let _ = tx.send(PortraitLoaded { url, result });
        });
    }

    pub fn get(&self, url: &str) -> Option<&PortraitSlot> {
        self.slots.get(url)
    }

    /// Ready portrait for `url`, if loaded.
    pub fn ready(&self, url: &str) -> Option<&Portrait> {
        match self.slots.get(url) {
            Some(PortraitSlot::Ready(portrait)) => Some(portrait.as_ref()),
            _ => None,
        }
    }

    /// Drain finished downloads into their slots.
    pub fn poll(&mut self) {
        while let Ok(loaded) = self.data_rx.try_recv() {
            let slot = match loaded.result {
                Ok(portrait) => PortraitSlot::Ready(Arc::new(portrait)),
                Err(e) => {
                    log::warn!("Failed to load portrait {}: {e}", loaded.url);
                    PortraitSlot::Failed
                }
            };
            self.slots.insert(loaded.url, slot);
        }
    }
}

async fn download(
    http: &reqwest::Client,
    url: &str,
    max_dim: u32,
) -> Result<Portrait, PortraitError> {
    let response = http.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(PortraitError::Status(status.as_u16()));
    }
    let bytes = response.bytes().await?;
    log::debug!("Downloaded portrait {url} ({} bytes)", bytes.len());

    tokio::task::spawn_blocking(move || Portrait::decode(&bytes, max_dim)).await?
}
