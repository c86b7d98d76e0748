//! PNG rendering of QR codes for the qrlink service.
//!
//! [`PngQrEncoder`] implements [`qrlink_core::QrEncoder`] on top of the
//! `qrcode` crate for the module matrix and the `image` crate for PNG output.

pub mod png;
pub mod settings;

pub use png::PngQrEncoder;
pub use settings::{EcLevel, QrSettings};
