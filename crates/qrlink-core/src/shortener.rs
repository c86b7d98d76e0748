use crate::qr::QrImage;
use crate::record::LinkStats;
use crate::shortcode::ShortCode;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, crate::error::ShortenerError>;

/// The outcome of shortening a URL.
#[derive(Debug, Clone)]
pub struct ShortenedLink {
    pub code: ShortCode,
    /// The public URL encoded in `qr`.
    pub short_url: String,
    pub qr: QrImage,
}

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Mints a new short code for `target_url` and renders its QR image.
    async fn shorten(&self, target_url: String) -> Result<ShortenedLink>;

    /// Counts a visit and returns the URL to redirect to.
    ///
    /// Fails with `NotFound` without touching the store if the code is unknown.
    async fn visit(&self, code: &ShortCode) -> Result<String>;

    /// Points an existing code at `new_url` and returns the stored URL.
    async fn retarget(&self, code: &ShortCode, new_url: String) -> Result<String>;

    /// Reports a record's metadata without mutating it.
    async fn stats(&self, code: &ShortCode) -> Result<LinkStats>;
}
