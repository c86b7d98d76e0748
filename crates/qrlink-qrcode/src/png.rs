use crate::settings::QrSettings;
use image::codecs::png::PngEncoder;
use image::{GrayImage, ImageBuffer, Luma};
use qrcode::types::QrError;
use qrcode::{Color, QrCode};
use qrlink_core::{EncodeError, QrEncoder, QrImage};
use tracing::trace;

const MEDIA_TYPE: &str = "image/png";
const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

/// Renders QR codes as grayscale PNG images.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngQrEncoder {
    settings: QrSettings,
}

impl PngQrEncoder {
    pub fn new(settings: QrSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &QrSettings {
        &self.settings
    }

    /// Scales the module matrix plus margin onto a square canvas.
    fn rasterize(&self, code: &QrCode) -> GrayImage {
        let modules = code.width() as u64;
        let margin = u64::from(self.settings.margin);
        let total = modules + 2 * margin;
        let side = u64::from(self.settings.width).max(total);

        let module_at = |pixel: u32| -> Option<usize> {
            let index = u64::from(pixel) * total / side;
            index
                .checked_sub(margin)
                .filter(|&m| m < modules)
                .map(|m| m as usize)
        };

        ImageBuffer::from_fn(side as u32, side as u32, |x, y| {
            match (module_at(x), module_at(y)) {
                (Some(mx), Some(my)) if code[(mx, my)] == Color::Dark => DARK,
                _ => LIGHT,
            }
        })
    }
}

impl QrEncoder for PngQrEncoder {
    fn encode(&self, data: &str) -> Result<QrImage, EncodeError> {
        let code = QrCode::with_error_correction_level(data, self.settings.ec_level.into())
            .map_err(|e| match e {
                QrError::DataTooLong => EncodeError::DataTooLong(format!(
                    "{} bytes at error correction level {:?}",
                    data.len(),
                    self.settings.ec_level
                )),
                other => EncodeError::Render(other.to_string()),
            })?;

        let canvas = self.rasterize(&code);
        let mut bytes = Vec::new();
        canvas
            .write_with_encoder(PngEncoder::new(&mut bytes))
            .map_err(|e| EncodeError::Render(e.to_string()))?;

        trace!(
            modules = code.width(),
            side = canvas.width(),
            bytes = bytes.len(),
            "rendered qr code"
        );
        Ok(QrImage::new(MEDIA_TYPE, bytes))
    }
}
