use std::{fmt, sync::Arc};

use tiny_core::{ImageCodec, RasterCodec, SvgConverter};

use crate::infra::config::Config;

/// Converter shared by all requests. The codec sits behind a trait object
/// so it can be swapped without touching the handlers.
pub type SharedConverter = Arc<SvgConverter<Arc<dyn ImageCodec>>>;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub converter: SharedConverter,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(config: Arc<Config>) -> Self {
        Self::with_codec(config, Arc::new(RasterCodec))
    }

    pub fn with_codec(config: Arc<Config>, codec: Arc<dyn ImageCodec>) -> Self {
        Self {
            config,
            converter: Arc::new(SvgConverter::new(codec)),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_handle(&self) -> Arc<Config> {
        Arc::clone(&self.config)
    }

    pub fn converter(&self) -> SharedConverter {
        Arc::clone(&self.converter)
    }
}
