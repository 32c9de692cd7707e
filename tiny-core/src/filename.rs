use std::path::Path;

const FALLBACK_STEM: &str = "converted";

/// Name under which a converted file is offered for download: the original
/// base name with its last extension replaced by `.svg`.
pub fn svg_file_name(original: &str) -> String {
    // Browsers and multipart clients may send either separator.
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original)
        .trim();

    // A bare extension such as `.webp` has no stem worth keeping.
    let stem = Path::new(base)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .filter(|stem| !(stem.starts_with('.') && *stem == base))
        .unwrap_or(FALLBACK_STEM);

    format!("{stem}.svg")
}
