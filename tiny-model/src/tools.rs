#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::routes;

/// Entry in the tool gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ToolSummary {
    pub name: String,
    pub description: String,
    /// Page that hosts the tool's upload form.
    pub href: String,
    /// API route the tool submits to.
    pub endpoint: String,
}

/// Tools currently offered. Only the image converter is implemented.
pub fn tool_catalog() -> Vec<ToolSummary> {
    vec![ToolSummary {
        name: "WEBP to SVG Converter".into(),
        description: "Quickly convert WEBP images to SVG format.".into(),
        href: "/tools/image-converter".into(),
        endpoint: routes::CONVERT.into(),
    }]
}
