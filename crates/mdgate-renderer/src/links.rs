//! Post-processing of rendered anchors.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static MD_HREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<a href="([^"]*\.md)">"#).expect("valid anchor pattern"));

/// Lowercase the path of every anchor `href` ending in `.md`.
///
/// Source files are stored uppercase (`README.md`) while routes are matched
/// case-insensitively on the lowercase page name, so rendered cross-links
/// must be lowercased to stay clickable. Anchor text is left untouched.
#[must_use]
pub fn lowercase_md_hrefs(html: &str) -> Cow<'_, str> {
    MD_HREF.replace_all(html, |caps: &Captures<'_>| {
        format!(r#"<a href="{}">"#, caps[1].to_lowercase())
    })
}
