//! Core types and traits for the qrlink URL shortener.
//!
//! This crate provides the data model shared by the storage backends,
//! the shortener service and the HTTP gateway.

pub mod error;
pub mod qr;
pub mod record;
pub mod shortcode;
pub mod shortener;
pub mod store;

pub use error::{CoreError, EncodeError, ShortenerError, StorageError};
pub use qr::{QrEncoder, QrImage};
pub use record::{LinkRecord, LinkStats, LinkTable};
pub use shortcode::ShortCode;
pub use shortener::{ShortenedLink, Shortener};
pub use store::LinkStore;
