use crate::error::EncodeError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// An encoded QR image ready to embed in a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrImage {
    pub media_type: &'static str,
    pub bytes: Vec<u8>,
}

impl QrImage {
    pub fn new(media_type: &'static str, bytes: Vec<u8>) -> Self {
        Self { media_type, bytes }
    }

    /// Returns the image as a `data:` URL with a base64 payload.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, STANDARD.encode(&self.bytes))
    }
}

/// Renders a string (the public short URL) as a scannable QR image.
pub trait QrEncoder: Send + Sync + 'static {
    fn encode(&self, data: &str) -> Result<QrImage, EncodeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_url_uses_standard_base64() {
        let image = QrImage::new("image/png", vec![0x89, b'P', b'N', b'G']);
        assert_eq!(image.data_url(), "data:image/png;base64,iVBORw==");
    }
}
