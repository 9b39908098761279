//! Request path to logical page resolution.
//!
//! The served URL space is flat: the first path segment names the page,
//! and the backing file is the uppercase page name with a `.md` extension.
//! `index` and `llms` are intentional aliases for the readme page.

/// Output representation chosen from the request path alone.
/// Bot classification can still force Markdown later.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    Markdown,
    Html,
}

/// Resolved logical page for a request path.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct PageRequest {
    /// Logical page name (lowercase alias already applied).
    pub(crate) name: String,
    /// Format requested through the path.
    pub(crate) format: OutputFormat,
}

/// Resolve a request path (without leading slash) into a page request.
///
/// The first segment, stripped of slashes, whitespace and a `.md`/`.txt`
/// extension, is the candidate page name. A missing segment, `index`, or
/// `llms` resolves to `readme`. `llms` always gets Markdown; otherwise a
/// path ending in `.md` gets Markdown and everything else HTML.
pub(crate) fn resolve(request_path: &str) -> PageRequest {
    let trimmed = request_path.trim().trim_matches('/');
    let segment = trimmed.split('/').next().unwrap_or("");
    let stem = segment
        .strip_suffix(".md")
        .or_else(|| segment.strip_suffix(".txt"))
        .unwrap_or(segment);

    let name = if stem.is_empty() || stem == "index" || stem == "llms" {
        "readme".to_owned()
    } else {
        stem.to_owned()
    };
    let format = if stem == "llms" || request_path.ends_with(".md") {
        OutputFormat::Markdown
    } else {
        OutputFormat::Html
    };

    PageRequest { name, format }
}
