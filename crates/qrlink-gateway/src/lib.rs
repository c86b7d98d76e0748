//! HTTP gateway for the qrlink URL shortener.
//!
//! Routes requests to a [`Shortener`](qrlink_core::Shortener) through an axum
//! router, and wires configuration, logging and the JSON file store together
//! for the `qrlink` binary.

pub mod admin;
pub mod app;
pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod server;
pub mod state;
pub mod telemetry;

pub use app::App;
pub use config::{Command, Config};
pub use state::AppState;
