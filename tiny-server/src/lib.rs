//! # Tiny Server
//!
//! Stateless HTTP front for the tiny tools gallery.
//!
//! ## Routes
//!
//! - `POST /api/tiny-image-convertor`: multipart upload (field `file`),
//!   answers `{ "convertedImage": "data:image/svg+xml;base64,..." }`
//! - `GET /api/tools`: the tool gallery
//! - `GET /ping`, `GET /health`: liveness
//!
//! Every request is independent. The only shared state is read-only
//! configuration and the converter, so handlers need no locking.

pub mod app;
pub mod errors;
pub mod handlers;
pub mod infra;
pub mod routes;

pub use app::create_app;
pub use errors::{ApiError, ApiResult};
pub use infra::app_state::AppState;
