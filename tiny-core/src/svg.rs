use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

use crate::codec::{Dimensions, TargetFormat};

pub const SVG_MIME: &str = "image/svg+xml";
const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Wrap PNG bytes in an SVG document that references them through an
/// inline data URI. The viewBox and the `<image>` size both equal
/// `dimensions`. Output depends only on the inputs.
pub fn wrap_png(png: &[u8], dimensions: Dimensions) -> String {
    let Dimensions { width, height } = dimensions;
    let payload = BASE64.encode(png);
    format!(
        r#"<svg xmlns="{SVG_NAMESPACE}" viewBox="0 0 {width} {height}"><image href="data:{mime};base64,{payload}" width="{width}" height="{height}" /></svg>"#,
        mime = TargetFormat::Png.mime_type(),
    )
}
