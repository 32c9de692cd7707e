macro_rules! api_path {
    ($path:literal) => {
        concat!("/api", $path)
    };
}

/// Route definitions shared by the server router and the upload client.
pub const ROOT: &str = "/api";

/// Multipart WEBP upload, answers with an SVG data URI.
pub const CONVERT: &str = api_path!("/tiny-image-convertor");

/// Gallery of available tools.
pub const TOOLS: &str = api_path!("/tools");

pub const PING: &str = "/ping";
pub const HEALTH: &str = "/health";
