//! URL shortener service implementation.
//!
//! [`ShortenerService`] implements the creation, redirect, update and stats
//! operations over any [`LinkStore`](qrlink_core::LinkStore). Core types are
//! re-exported from `qrlink_core`.

pub mod service;

pub use qrlink_core::{ShortenedLink, Shortener, ShortenerError};
pub use service::ShortenerService;
