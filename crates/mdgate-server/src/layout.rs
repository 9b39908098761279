//! HTML page shell.
//!
//! The layout template is embedded at compile time and filled by plain
//! placeholder substitution. Rendered markdown is trusted HTML; the page
//! name, title and domain are escaped on injection.

use mdgate_renderer::escape_html;

const LAYOUT: &str = include_str!("../assets/layout.html");

/// Wrap rendered page content in the site layout.
pub(crate) fn render(page: &str, title: &str, domain: &str, content: &str) -> String {
    LAYOUT
        .replace("{{title}}", &escape_html(title))
        .replace("{{page}}", &escape_html(page))
        .replace("{{domain}}", &escape_html(domain))
        // Content goes last so placeholder-like text inside a document
        // never gets substituted
        .replace("{{content}}", content)
}
