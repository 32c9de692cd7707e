//! Configuration for the tiny tools server.
//!
//! Values are layered: environment variables (optionally seeded from a
//! `.env` file) win over a TOML file, which wins over built-in defaults.
//! The server binary applies its command-line overrides on top of the
//! loaded [`Config`].

#![allow(missing_docs)]

pub mod loader;
pub mod models;
pub mod util;
pub mod validation;

pub use loader::{
    ConfigLoad, ConfigLoader, ConfigLoaderOptions, error::ConfigLoadError,
};
pub use models::{
    Config, ConfigMetadata, CorsConfig, ServerConfig, UploadConfig,
};
pub use validation::{ConfigGuardRailError, ConfigWarning, ConfigWarnings};
