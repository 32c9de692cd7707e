pub use tiny_config::{
    Config, ConfigGuardRailError, ConfigLoad, ConfigLoadError, ConfigLoader,
    ConfigLoaderOptions, ConfigMetadata, ConfigWarning, ConfigWarnings,
    CorsConfig, ServerConfig, UploadConfig, loader, models, validation,
};
